use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Eligibility thresholds and allow-lists for one lender product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub lender: String,
    pub min_vintage_years: f64,
    pub allowed_constitutions: BTreeSet<String>,
    pub min_yearly_turnover: u64,
    pub max_foir: f64,
    /// `None` means no geographic restriction is defined. `Some` of an empty set means the
    /// serviceable-area data is unavailable, which rejects every lead.
    pub allowed_pincodes: Option<BTreeSet<u32>>,
    pub allowed_ownership: BTreeSet<String>,
    /// Lower-cased, trimmed keywords matched as substrings of the business segment.
    pub negative_industries: Option<BTreeSet<String>>,
    pub ntc_allowed: bool,
    pub allowed_loan_types: BTreeSet<String>,
}

impl PolicyRule {
    pub fn summary(&self) -> PolicySummary {
        PolicySummary {
            lender: self.lender.clone(),
            min_vintage_years: self.min_vintage_years,
            allowed_constitutions: self.allowed_constitutions.iter().cloned().collect(),
            min_yearly_turnover: self.min_yearly_turnover,
            max_foir: self.max_foir,
            serviceable_pincodes: self.allowed_pincodes.as_ref().map(BTreeSet::len),
            allowed_ownership: self.allowed_ownership.iter().cloned().collect(),
            negative_industry_keywords: self.negative_industries.as_ref().map(BTreeSet::len),
            ntc_allowed: self.ntc_allowed,
            allowed_loan_types: self.allowed_loan_types.iter().cloned().collect(),
        }
    }
}

/// Listing view of a rule with the large reference sets reduced to their sizes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicySummary {
    pub lender: String,
    pub min_vintage_years: f64,
    pub allowed_constitutions: Vec<String>,
    pub min_yearly_turnover: u64,
    pub max_foir: f64,
    pub serviceable_pincodes: Option<usize>,
    pub allowed_ownership: Vec<String>,
    pub negative_industry_keywords: Option<usize>,
    pub ntc_allowed: bool,
    pub allowed_loan_types: Vec<String>,
}

/// Loan products a lead can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanType {
    TermLoan,
    Dlod,
    Od,
    Lap,
}

impl LoanType {
    pub const fn ordered() -> [Self; 4] {
        [Self::TermLoan, Self::Dlod, Self::Od, Self::Lap]
    }

    /// Code stored on leads and in lender allow-lists.
    pub const fn code(self) -> &'static str {
        match self {
            Self::TermLoan => "Term Loan",
            Self::Dlod => "DLOD",
            Self::Od => "OD",
            Self::Lap => "LAP",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Lap => "Loan Against Property (LAP)",
            other => other.code(),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|kind| kind.code() == code)
    }

    /// Accepts either the stored code or the display name offered to users.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.code() == label || kind.display_name() == label)
    }
}

/// Display-friendly name for a requested loan type code; unknown codes are shown verbatim.
pub fn loan_type_display(code: &str) -> &str {
    match LoanType::from_code(code) {
        Some(kind) => kind.display_name(),
        None => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lap_is_displayed_with_its_long_name() {
        assert_eq!(loan_type_display("LAP"), "Loan Against Property (LAP)");
        assert_eq!(loan_type_display("Term Loan"), "Term Loan");
        assert_eq!(loan_type_display("Gold Loan"), "Gold Loan");
    }

    #[test]
    fn labels_map_back_to_codes() {
        assert_eq!(
            LoanType::from_label("Loan Against Property (LAP)"),
            Some(LoanType::Lap)
        );
        assert_eq!(LoanType::from_label(" DLOD "), Some(LoanType::Dlod));
        assert_eq!(LoanType::from_label("lap"), None);
    }
}
