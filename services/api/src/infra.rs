use loan_match::eligibility::{CatalogHandle, PolicyCatalog};
use loan_match::leads::{LeadRecord, LeadRepository, RepositoryError};
use loan_match::reference::{ReferenceManifest, ReferenceSets};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<CatalogHandle>,
    pub(crate) reference_dir: PathBuf,
}

/// Catalog built from the standard lender table and the CSVs under `reference_dir`.
pub(crate) fn load_catalog(reference_dir: &Path) -> PolicyCatalog {
    let reference = ReferenceSets::load(reference_dir, &ReferenceManifest::standard());
    PolicyCatalog::from_reference(&reference)
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<String, LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn upsert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store lock poisoned".to_string()))?;
        guard.insert(record.mobile_number.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, mobile_number: &str) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store lock poisoned".to_string()))?;
        Ok(guard.get(mobile_number).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use loan_match::eligibility::Lead;
    use loan_match::leads::LeadStatus;

    fn record(remarks: &str) -> LeadRecord {
        LeadRecord {
            mobile_number: "9876543210".to_string(),
            lead: Lead {
                remarks: Some(remarks.to_string()),
                ..Lead::default()
            },
            status: LeadStatus::Draft,
            eligibility: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_replaces_record_for_same_mobile_number() {
        let repository = InMemoryLeadRepository::default();
        repository.upsert(record("first call")).expect("insert");
        repository.upsert(record("follow-up")).expect("replace");

        let stored = repository
            .fetch("9876543210")
            .expect("fetch")
            .expect("record present");
        assert_eq!(stored.lead.remarks.as_deref(), Some("follow-up"));
        assert!(repository.fetch("9000000000").expect("fetch").is_none());
    }

    #[test]
    fn missing_reference_dir_yields_catalog_that_rejects_on_pincode() {
        let catalog = load_catalog(Path::new("/nonexistent/reference"));

        assert_eq!(catalog.len(), 12);
        assert!(catalog
            .rules()
            .all(|rule| rule.allowed_pincodes.as_ref().is_some_and(|set| set.is_empty())));
    }
}
