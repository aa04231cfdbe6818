use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{LeadRecord, LeadStatus};
use super::repository::{LeadRepository, RepositoryError};
use crate::eligibility::{self, CatalogHandle, Lead, VerdictMap};
use crate::intake::{self, IntakeError, IntakeIssue};

/// Verdicts for a lead together with intake issues worth surfacing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub verdicts: VerdictMap,
    pub issues: Vec<IntakeIssue>,
}

/// Service composing the shared policy catalog and the lead repository.
pub struct LeadService<R> {
    repository: Arc<R>,
    catalog: Arc<CatalogHandle>,
}

impl<R> LeadService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<CatalogHandle>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Arc<CatalogHandle> {
        &self.catalog
    }

    /// Evaluate a lead against the active catalog after recomputing derived figures.
    pub fn evaluate(&self, lead: &Lead) -> EligibilityReport {
        let lead = lead.normalized();
        let catalog = self.catalog.snapshot();
        EligibilityReport {
            verdicts: eligibility::evaluate(&lead, &catalog),
            issues: intake::review(&lead),
        }
    }

    /// Evaluate and store a lead under its mobile number.
    pub fn save(&self, lead: Lead, status: LeadStatus) -> Result<LeadRecord, LeadServiceError> {
        let mobile_number = lead
            .mobile_number
            .clone()
            .ok_or(LeadServiceError::MissingMobileNumber)?;
        intake::validate_mobile_number(&mobile_number)?;

        let lead = lead.normalized();
        let catalog = self.catalog.snapshot();
        let verdicts = eligibility::evaluate(&lead, &catalog);

        let record = LeadRecord {
            mobile_number,
            lead,
            status,
            eligibility: Some(verdicts),
            updated_at: Utc::now(),
        };

        let stored = self.repository.upsert(record)?;
        info!(
            status = stored.status.label(),
            eligible = stored.eligible_lenders().len(),
            "lead saved"
        );
        Ok(stored)
    }

    /// Fetch a stored lead with its eligibility refreshed against the active catalog.
    pub fn load_draft(&self, mobile_number: &str) -> Result<LeadRecord, LeadServiceError> {
        intake::validate_mobile_number(mobile_number)?;
        let mut record = self
            .repository
            .fetch(mobile_number)?
            .ok_or(RepositoryError::NotFound)?;

        let catalog = self.catalog.snapshot();
        record.eligibility = Some(eligibility::evaluate(&record.lead, &catalog));
        Ok(record)
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("mobile number is required to save a lead")]
    MissingMobileNumber,
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
