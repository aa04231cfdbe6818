use std::collections::{BTreeSet, HashMap};

use crate::eligibility::{lenders, Lead, PolicyCatalog, PolicyRule};
use crate::reference::ReferenceSets;

pub(super) const SERVICEABLE_PINCODE: &str = "110001";

fn strings(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Rule shaped like a three-year term loan product with a small serviceable area.
pub(super) fn term_loan_rule() -> PolicyRule {
    PolicyRule {
        lender: "Acme (Term Loan)".to_string(),
        min_vintage_years: 3.0,
        allowed_constitutions: strings(&["Sole Proprietor", "Partnership", "LLP"]),
        min_yearly_turnover: 4_000_000,
        max_foir: 0.30,
        allowed_pincodes: Some(BTreeSet::from([110001, 560001])),
        allowed_ownership: strings(&["Both Owned", "Residence Owned"]),
        negative_industries: Some(strings(&["scrap", "liquor"])),
        ntc_allowed: false,
        allowed_loan_types: strings(&["Term Loan"]),
    }
}

/// Lead that clears every check of [`term_loan_rule`].
pub(super) fn qualifying_lead() -> Lead {
    Lead {
        mobile_number: Some("9876543210".to_string()),
        pincode: Some(SERVICEABLE_PINCODE.to_string()),
        vintage_years: Some(4.0.into()),
        constitution_type: Some("Sole Proprietor".to_string()),
        yearly_turnover: Some(4_500_000.0.into()),
        foir: Some(0.2.into()),
        business_segment: Some("Retail Goods".to_string()),
        ownership_status: Some("Both Owned".to_string()),
        is_ntc: Some(false),
        requested_loan_type: Some("Term Loan".to_string()),
        ..Lead::default()
    }
}

/// Lead from the Indifi walkthrough: one year of vintage, ₹45L turnover, 20% FOIR.
pub(super) fn indifi_lead() -> Lead {
    Lead {
        vintage_years: Some(1.0.into()),
        ..qualifying_lead()
    }
}

pub(super) fn reference_sets() -> ReferenceSets {
    let mut pincodes = HashMap::new();
    let mut negative_industries = HashMap::new();
    for lender in crate::eligibility::standard_lenders() {
        pincodes.insert(lender.to_string(), BTreeSet::from([110001]));
        negative_industries.insert(lender.to_string(), strings(&["scrap", "arms"]));
    }
    pincodes.insert(
        lenders::INDIFI_TERM_LOAN.to_string(),
        BTreeSet::from([110001, 400001]),
    );
    ReferenceSets {
        pincodes,
        negative_industries,
    }
}

pub(super) fn standard_catalog() -> PolicyCatalog {
    PolicyCatalog::from_reference(&reference_sets())
}
