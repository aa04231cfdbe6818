//! Field rules and derived figures captured alongside a lead.
//!
//! Nothing here gates evaluation: the eligibility engine accepts any lead shape. These helpers
//! exist so callers can validate identifiers, convert amounts entered in Indian units, and flag
//! profiles that need a co-applicant before a lead is saved.

use serde::{Deserialize, Serialize};

use crate::eligibility::{foir, Lead};

pub const MOBILE_NUMBER_DIGITS: usize = 10;
pub const PINCODE_DIGITS: usize = 6;
pub const MINIMUM_APPLICANT_AGE: i64 = 18;
/// Applicants outside this age band need a co-applicant.
pub const CO_APPLICANT_FREE_AGES: std::ops::RangeInclusive<i64> = 21..=65;
/// FOIR above which intake warns that most lenders will decline.
pub const HIGH_FOIR_WARNING: f64 = 0.65;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("mobile number must be exactly {} digits", MOBILE_NUMBER_DIGITS)]
    InvalidMobileNumber,
    #[error("pincode must be exactly {} digits", PINCODE_DIGITS)]
    InvalidPincode,
    #[error("applicant must be at least {} years old (found {0})", MINIMUM_APPLICANT_AGE)]
    UnderAge(i64),
    #[error("unknown amount unit '{0}'")]
    UnknownUnit(String),
}

fn exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|byte| byte.is_ascii_digit())
}

pub fn validate_mobile_number(value: &str) -> Result<(), IntakeError> {
    if exact_digits(value, MOBILE_NUMBER_DIGITS) {
        Ok(())
    } else {
        Err(IntakeError::InvalidMobileNumber)
    }
}

pub fn validate_pincode(value: &str) -> Result<(), IntakeError> {
    if exact_digits(value, PINCODE_DIGITS) {
        Ok(())
    } else {
        Err(IntakeError::InvalidPincode)
    }
}

pub fn validate_age(age: i64) -> Result<(), IntakeError> {
    if age >= MINIMUM_APPLICANT_AGE {
        Ok(())
    } else {
        Err(IntakeError::UnderAge(age))
    }
}

/// Units amounts are entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountUnit {
    Rupees,
    Thousands,
    Lakhs,
    Crores,
}

impl AmountUnit {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Rupees => 1.0,
            Self::Thousands => 1_000.0,
            Self::Lakhs => 100_000.0,
            Self::Crores => 10_000_000.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rupees => "Rupees",
            Self::Thousands => "Thousands",
            Self::Lakhs => "Lakhs",
            Self::Crores => "Crores",
        }
    }

    pub fn to_rupees(self, value: f64) -> f64 {
        value * self.multiplier()
    }
}

impl std::str::FromStr for AmountUnit {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rupees" => Ok(Self::Rupees),
            "thousands" => Ok(Self::Thousands),
            "lakhs" | "lakh" => Ok(Self::Lakhs),
            "crores" | "crore" => Ok(Self::Crores),
            _ => Err(IntakeError::UnknownUnit(value.to_string())),
        }
    }
}

/// Turnover and obligation figures derived from amounts entered with units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub monthly_turnover: f64,
    pub yearly_turnover: f64,
    pub total_obligations: f64,
    pub foir: f64,
    pub high_foir: bool,
}

impl FinancialSnapshot {
    pub fn derive(
        turnover: f64,
        turnover_unit: AmountUnit,
        obligations: f64,
        obligations_unit: AmountUnit,
    ) -> Self {
        let monthly_turnover = turnover_unit.to_rupees(turnover);
        let total_obligations = obligations_unit.to_rupees(obligations);
        let foir = foir(monthly_turnover, total_obligations);

        Self {
            monthly_turnover,
            yearly_turnover: monthly_turnover * 12.0,
            total_obligations,
            foir,
            high_foir: foir > HIGH_FOIR_WARNING,
        }
    }

    pub fn apply(&self, lead: Lead) -> Lead {
        lead.with_financials(self.monthly_turnover, self.total_obligations)
    }
}

/// Why a co-applicant is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoApplicantReason {
    FemaleApplicant,
    AgeOutsideRange(i64),
}

/// Co-applicant requirements for the applicant's gender and age, empty when none apply.
pub fn co_applicant_requirement(gender: Option<&str>, age: Option<i64>) -> Vec<CoApplicantReason> {
    let mut reasons = Vec::new();
    if gender == Some("Female") {
        reasons.push(CoApplicantReason::FemaleApplicant);
    }
    if let Some(age) = age {
        if !CO_APPLICANT_FREE_AGES.contains(&age) {
            reasons.push(CoApplicantReason::AgeOutsideRange(age));
        }
    }
    reasons
}

/// Non-blocking problems found on a lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntakeIssue {
    InvalidMobileNumber,
    InvalidPincode,
    UnderAge { age: i64 },
    MissingCoApplicant { reasons: Vec<CoApplicantReason> },
    HighFoir { foir: f64 },
}

/// Review a lead for intake problems. Absent fields are not issues.
pub fn review(lead: &Lead) -> Vec<IntakeIssue> {
    let mut issues = Vec::new();

    if let Some(mobile) = lead.mobile_number.as_deref() {
        if validate_mobile_number(mobile).is_err() {
            issues.push(IntakeIssue::InvalidMobileNumber);
        }
    }
    if let Some(pincode) = lead.pincode() {
        if validate_pincode(pincode).is_err() {
            issues.push(IntakeIssue::InvalidPincode);
        }
    }
    if let Some(age) = lead.age {
        if let Err(IntakeError::UnderAge(age)) = validate_age(age) {
            issues.push(IntakeIssue::UnderAge { age });
        }
    }

    let reasons = co_applicant_requirement(lead.gender.as_deref(), lead.age);
    if !reasons.is_empty() && lead.co_applicant_details.is_none() {
        issues.push(IntakeIssue::MissingCoApplicant { reasons });
    }

    if let Some(foir) = lead.foir().filter(|foir| *foir > HIGH_FOIR_WARNING) {
        issues.push(IntakeIssue::HighFoir { foir });
    }

    issues
}
