//! Lender eligibility evaluation.
//!
//! [`evaluate`] runs a lead through every rule of a [`PolicyCatalog`] and returns one
//! [`Verdict`] per lender. Evaluation is total: missing or malformed lead fields skip the
//! checks that need them, except the pincode, which is mandatory whenever a rule defines a
//! serviceable-pincode set.

mod catalog;
pub mod format;
mod lead;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use catalog::{lenders, standard_lenders, CatalogHandle, PolicyCatalog};
pub use lead::{foir, CoApplicant, Lead, NumericInput};
pub use policy::{loan_type_display, LoanType, PolicyRule, PolicySummary};
pub use rules::{CheckKind, VINTAGE_DEVIATION_TOLERANCE_YEARS};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Sole reason carried by an eligible verdict.
pub const ALL_CRITERIA_PASSED: &str = "All criteria passed.";

/// Verdicts keyed by lender name.
pub type VerdictMap = BTreeMap<String, Verdict>;

/// Outcome of one lead against one lender rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub eligible: bool,
    /// One entry per failed check in check order, or [`ALL_CRITERIA_PASSED`].
    pub reasons: Vec<String>,
    /// Advisory near-miss notes. Never affect eligibility.
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_checks: Vec<CheckKind>,
}

impl Verdict {
    pub fn failed(&self, check: CheckKind) -> bool {
        self.failed_checks.contains(&check)
    }
}

/// Evaluate a lead against a single rule.
pub fn evaluate_rule(lead: &Lead, rule: &PolicyRule) -> Verdict {
    let trail = rules::run_checks(lead, rule);
    let eligible = trail.passed();
    let reasons = if eligible {
        vec![ALL_CRITERIA_PASSED.to_string()]
    } else {
        trail.reasons
    };

    Verdict {
        eligible,
        reasons,
        tips: trail.tips,
        failed_checks: trail.failed,
    }
}

/// Evaluate a lead against every lender in the catalog.
pub fn evaluate(lead: &Lead, catalog: &PolicyCatalog) -> VerdictMap {
    let verdicts: VerdictMap = catalog
        .rules()
        .map(|rule| (rule.lender.clone(), evaluate_rule(lead, rule)))
        .collect();

    debug!(
        lenders = verdicts.len(),
        eligible = verdicts.values().filter(|verdict| verdict.eligible).count(),
        "lead evaluated"
    );

    verdicts
}

/// Lenders the lead currently qualifies for, in name order.
pub fn eligible_lenders(verdicts: &VerdictMap) -> Vec<&str> {
    verdicts
        .iter()
        .filter(|(_, verdict)| verdict.eligible)
        .map(|(lender, _)| lender.as_str())
        .collect()
}
