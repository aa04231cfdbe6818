use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use tracing::warn;

use super::policy::{PolicyRule, PolicySummary};
use crate::reference::ReferenceSets;

/// Lender product names. These strings key the policy table, the reference-set manifest and
/// the verdict map, so they must match exactly.
pub mod lenders {
    pub const INDIFI_TERM_LOAN: &str = "Indifi (Term Loan)";
    pub const BAJAJ_TERM_LOAN: &str = "Bajaj (Term Loan)";
    pub const BAJAJ_STBL_LITE: &str = "Bajaj (STBL Lite T/O < 50L)";
    pub const BAJAJ_STBL: &str = "Bajaj (STBL T/O > 50L)";
    pub const FLEXI_TERM_LOAN: &str = "Flexi (Term Loan)";
    pub const KOTAK_TERM_LOAN: &str = "Kotak (Term Loan)";
    pub const KOTAK_CA_PROGRAM: &str = "Kotak (CA Program)";
    pub const LT_TERM_LOAN: &str = "L&T (Term Loan)";
    pub const LT_CA_PROGRAM: &str = "L&T (CA Program)";
    pub const HERO_TERM_LOAN: &str = "Hero (Term Loan)";
    pub const CREDIT_SAISON_SBA: &str = "Credit Saison (SBA Program)";
    pub const CREDIT_SAISON_UBL: &str = "Credit Saison (UBL Program)";
}

struct PolicyDefinition {
    lender: &'static str,
    min_vintage_years: f64,
    allowed_constitutions: &'static [&'static str],
    min_yearly_turnover: u64,
    max_foir: f64,
    allowed_ownership: &'static [&'static str],
    ntc_allowed: bool,
    allowed_loan_types: &'static [&'static str],
}

const BUSINESS_ENTITIES: &[&str] = &[
    "Sole Proprietor",
    "Partnership",
    "LLP",
    "Private Ltd",
    "Public Ltd",
];
const SOLE_PROPRIETOR: &[&str] = &["Sole Proprietor"];
const CA_PROGRAM: &[&str] = &["Sole Proprietor", "CA"];

const OWNED_PREMISES: &[&str] = &[
    "Both Owned",
    "Residence Owned",
    "Office Owned",
    "Residence Owned in Other City",
];
const OWNED_OR_RENTED_PREMISES: &[&str] = &[
    "Both Owned",
    "Residence Owned",
    "Office Owned",
    "Both Rented",
    "Residence Owned in Other City",
];

const TERM_LOAN: &[&str] = &["Term Loan"];

const POLICY_TABLE: [PolicyDefinition; 12] = [
    PolicyDefinition {
        lender: lenders::INDIFI_TERM_LOAN,
        min_vintage_years: 1.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 4_000_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_OR_RENTED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::BAJAJ_TERM_LOAN,
        min_vintage_years: 3.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 2_000_000,
        max_foir: 0.17,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: true,
        allowed_loan_types: &["Term Loan", "DLOD", "LAP"],
    },
    PolicyDefinition {
        lender: lenders::BAJAJ_STBL_LITE,
        min_vintage_years: 1.0,
        allowed_constitutions: SOLE_PROPRIETOR,
        min_yearly_turnover: 1_000_000,
        max_foir: 0.17,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: true,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::BAJAJ_STBL,
        min_vintage_years: 1.0,
        allowed_constitutions: SOLE_PROPRIETOR,
        min_yearly_turnover: 5_000_000,
        max_foir: 0.17,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: true,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::FLEXI_TERM_LOAN,
        min_vintage_years: 2.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 2_400_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: true,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::KOTAK_TERM_LOAN,
        min_vintage_years: 3.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 5_000_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: true,
        allowed_loan_types: &["Term Loan", "LAP", "OD"],
    },
    PolicyDefinition {
        lender: lenders::KOTAK_CA_PROGRAM,
        min_vintage_years: 1.0,
        allowed_constitutions: CA_PROGRAM,
        min_yearly_turnover: 5_000_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::LT_TERM_LOAN,
        min_vintage_years: 3.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 10_000_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: &["Term Loan", "DLOD"],
    },
    PolicyDefinition {
        lender: lenders::LT_CA_PROGRAM,
        min_vintage_years: 3.0,
        allowed_constitutions: CA_PROGRAM,
        min_yearly_turnover: 5_000_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::HERO_TERM_LOAN,
        min_vintage_years: 3.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 5_000_000,
        max_foir: 0.30,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::CREDIT_SAISON_SBA,
        min_vintage_years: 3.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 1_000_000,
        max_foir: 0.50,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: TERM_LOAN,
    },
    PolicyDefinition {
        lender: lenders::CREDIT_SAISON_UBL,
        min_vintage_years: 3.0,
        allowed_constitutions: BUSINESS_ENTITIES,
        min_yearly_turnover: 10_000_000,
        max_foir: 0.50,
        allowed_ownership: OWNED_PREMISES,
        ntc_allowed: false,
        allowed_loan_types: TERM_LOAN,
    },
];

/// Names of every lender product in the compiled-in policy table, in table order.
pub fn standard_lenders() -> impl Iterator<Item = &'static str> {
    POLICY_TABLE.iter().map(|definition| definition.lender)
}

fn to_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl PolicyDefinition {
    fn to_rule(&self, reference: &ReferenceSets) -> PolicyRule {
        PolicyRule {
            lender: self.lender.to_string(),
            min_vintage_years: self.min_vintage_years,
            allowed_constitutions: to_set(self.allowed_constitutions),
            min_yearly_turnover: self.min_yearly_turnover,
            max_foir: self.max_foir,
            allowed_pincodes: Some(reference.pincodes_for(self.lender)),
            allowed_ownership: to_set(self.allowed_ownership),
            negative_industries: Some(reference.negative_industries_for(self.lender)),
            ntc_allowed: self.ntc_allowed,
            allowed_loan_types: to_set(self.allowed_loan_types),
        }
    }
}

/// Immutable set of lender policy rules, keyed by lender name and kept in table order.
#[derive(Debug, Clone, Default)]
pub struct PolicyCatalog {
    rules: Vec<PolicyRule>,
    index: HashMap<String, usize>,
}

impl PolicyCatalog {
    /// Catalog over arbitrary rules. A repeated lender name replaces the earlier rule.
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        let mut catalog = Self::default();
        for rule in rules {
            match catalog.index.get(&rule.lender) {
                Some(&position) => {
                    warn!(lender = %rule.lender, "duplicate policy rule replaces earlier definition");
                    catalog.rules[position] = rule;
                }
                None => {
                    catalog
                        .index
                        .insert(rule.lender.clone(), catalog.rules.len());
                    catalog.rules.push(rule);
                }
            }
        }
        catalog
    }

    /// Standard lender table combined with the loaded reference sets. Lenders without
    /// reference data get empty sets.
    pub fn from_reference(reference: &ReferenceSets) -> Self {
        Self::new(
            POLICY_TABLE
                .iter()
                .map(|definition| definition.to_rule(reference))
                .collect(),
        )
    }

    pub fn rule(&self, lender: &str) -> Option<&PolicyRule> {
        self.index.get(lender).map(|&position| &self.rules[position])
    }

    pub fn rules(&self) -> impl Iterator<Item = &PolicyRule> {
        self.rules.iter()
    }

    pub fn lenders(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.lender.as_str())
    }

    pub fn summaries(&self) -> Vec<PolicySummary> {
        self.rules.iter().map(PolicyRule::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Shared slot holding the active catalog. Reloads swap the whole catalog; readers keep the
/// snapshot they started with.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<PolicyCatalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: PolicyCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<PolicyCatalog> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Install a new catalog, returning the one it replaced.
    pub fn replace(&self, catalog: PolicyCatalog) -> Arc<PolicyCatalog> {
        let next = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
