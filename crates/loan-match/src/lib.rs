//! Lender eligibility matching for business loan leads.
//!
//! The [`eligibility`] module holds the decision logic: a static policy table per lender
//! product, enriched at startup with serviceable pincodes and negative-industry keywords
//! loaded by [`reference`], is evaluated against a [`eligibility::Lead`] to produce one
//! verdict per lender.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod intake;
pub mod leads;
pub mod reference;
pub mod telemetry;
