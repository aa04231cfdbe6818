use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::eligibility::{Lead, VerdictMap};

/// Lifecycle of a stored lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    Draft,
    Active,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::Draft => "draft",
            LeadStatus::Active => "active",
        }
    }
}

/// Stored snapshot of a lead, keyed by its mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub mobile_number: String,
    pub lead: Lead,
    pub status: LeadStatus,
    pub eligibility: Option<VerdictMap>,
    pub updated_at: DateTime<Utc>,
}

impl LeadRecord {
    pub fn eligible_lenders(&self) -> Vec<&str> {
        self.eligibility
            .as_ref()
            .map(crate::eligibility::eligible_lenders)
            .unwrap_or_default()
    }
}
