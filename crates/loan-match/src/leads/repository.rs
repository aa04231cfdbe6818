use super::domain::LeadRecord;

/// Storage abstraction for lead records so the service can run against any back-end.
pub trait LeadRepository: Send + Sync {
    /// Insert the record, or replace the one stored under the same mobile number.
    fn upsert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn fetch(&self, mobile_number: &str) -> Result<Option<LeadRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
