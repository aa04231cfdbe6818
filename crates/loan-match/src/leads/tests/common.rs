use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::{CatalogHandle, Lead, PolicyCatalog};
use crate::leads::repository::{LeadRepository, RepositoryError};
use crate::leads::{LeadRecord, LeadService};
use crate::reference::ReferenceSets;

pub(super) const MOBILE: &str = "9876543210";

pub(super) fn catalog() -> PolicyCatalog {
    let mut reference = ReferenceSets::default();
    for lender in crate::eligibility::standard_lenders() {
        reference
            .pincodes
            .insert(lender.to_string(), BTreeSet::from([560001]));
    }
    PolicyCatalog::from_reference(&reference)
}

pub(super) fn lead() -> Lead {
    Lead {
        mobile_number: Some(MOBILE.to_string()),
        pincode: Some("560001".to_string()),
        vintage_years: Some(4.0.into()),
        constitution_type: Some("Sole Proprietor".to_string()),
        business_segment: Some("Textiles".to_string()),
        ownership_status: Some("Both Owned".to_string()),
        is_ntc: Some(false),
        requested_loan_type: Some("Term Loan".to_string()),
        ..Lead::default()
    }
    .with_financials(500_000.0, 50_000.0)
}

pub(super) fn build_service() -> (LeadService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LeadService::new(
        repository.clone(),
        Arc::new(CatalogHandle::new(catalog())),
    );
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<String, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn upsert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.mobile_number.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, mobile_number: &str) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(mobile_number).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn upsert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _mobile_number: &str) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
