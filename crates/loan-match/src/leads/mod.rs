//! Lead records, their persistence contract, and the HTTP surface for eligibility checks.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LeadRecord, LeadStatus};
pub use repository::{LeadRepository, RepositoryError};
pub use router::lead_router;
pub use service::{EligibilityReport, LeadService, LeadServiceError};
