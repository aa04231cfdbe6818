use crate::infra::load_catalog;
use clap::Args;
use loan_match::config::AppConfig;
use loan_match::eligibility::{self, format, Lead, PolicyCatalog};
use loan_match::error::AppError;
use loan_match::intake;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding the lead's captured fields
    #[arg(long)]
    pub(crate) lead: PathBuf,
    /// Directory with the lender reference CSVs (defaults to APP_REFERENCE_DIR)
    #[arg(long)]
    pub(crate) reference_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LendersArgs {
    /// Directory with the lender reference CSVs (defaults to APP_REFERENCE_DIR)
    #[arg(long)]
    pub(crate) reference_dir: Option<PathBuf>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let catalog = catalog_for(args.reference_dir)?;
    let lead = read_lead(&args.lead)?;
    let rendered = render_evaluation(&lead, &catalog)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_lenders(args: LendersArgs) -> Result<(), AppError> {
    let catalog = catalog_for(args.reference_dir)?;
    for line in render_lenders(&catalog) {
        println!("{line}");
    }
    Ok(())
}

fn catalog_for(reference_dir: Option<PathBuf>) -> Result<PolicyCatalog, AppError> {
    let reference_dir = match reference_dir {
        Some(dir) => dir,
        None => AppConfig::load()?.reference.data_dir,
    };
    Ok(load_catalog(&reference_dir))
}

pub(crate) fn read_lead(path: &Path) -> Result<Lead, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Verdict map as pretty JSON, followed by the eligible lenders and any intake issues.
pub(crate) fn render_evaluation(lead: &Lead, catalog: &PolicyCatalog) -> Result<String, AppError> {
    let lead = lead.normalized();
    let verdicts = eligibility::evaluate(&lead, catalog);
    let mut rendered = serde_json::to_string_pretty(&verdicts)?;

    let eligible = eligibility::eligible_lenders(&verdicts);
    if eligible.is_empty() {
        rendered.push_str("\n\nEligible lenders: none");
    } else {
        rendered.push_str(&format!("\n\nEligible lenders: {}", eligible.join(", ")));
    }

    for issue in intake::review(&lead) {
        rendered.push_str(&format!("\nIntake issue: {}", serde_json::to_string(&issue)?));
    }

    Ok(rendered)
}

pub(crate) fn render_lenders(catalog: &PolicyCatalog) -> Vec<String> {
    catalog
        .summaries()
        .into_iter()
        .map(|summary| {
            let pincodes = summary
                .serviceable_pincodes
                .map(|count| count.to_string())
                .unwrap_or_else(|| "any".to_string());
            format!(
                "- {}: vintage {}+ yrs, turnover ₹{}+, FOIR <= {}, NTC {}, pincodes {}, loans {}",
                summary.lender,
                format::years(summary.min_vintage_years),
                format::rupees(i64::try_from(summary.min_yearly_turnover).unwrap_or(i64::MAX)),
                format::percent(summary.max_foir),
                if summary.ntc_allowed { "allowed" } else { "declined" },
                pincodes,
                summary.allowed_loan_types.join("/")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_match::eligibility::lenders;
    use loan_match::reference::ReferenceSets;
    use std::collections::BTreeSet;

    fn catalog() -> PolicyCatalog {
        let mut reference = ReferenceSets::default();
        reference.pincodes.insert(
            lenders::INDIFI_TERM_LOAN.to_string(),
            BTreeSet::from([110001]),
        );
        PolicyCatalog::from_reference(&reference)
    }

    #[test]
    fn evaluation_renders_verdicts_and_eligible_lenders() {
        let lead: Lead = serde_json::from_str(
            r#"{
                "pincode": "110001",
                "vintage_years": 1,
                "constitution_type": "Partnership",
                "monthly_turnover": "400000",
                "total_obligations": 40000,
                "ownership_status": "Both Rented",
                "is_ntc": false,
                "requested_loan_type": "Term Loan",
                "age": 17
            }"#,
        )
        .expect("lead parses");

        let rendered = render_evaluation(&lead, &catalog()).expect("renders");

        assert!(rendered.contains("\"Indifi (Term Loan)\""));
        assert!(rendered.contains("Eligible lenders: Indifi (Term Loan)"));
        assert!(rendered.contains("\"issue\":\"under_age\""));
    }

    #[test]
    fn lender_listing_covers_catalog_in_table_order() {
        let lines = render_lenders(&catalog());

        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("- Indifi (Term Loan): vintage 1+ yrs"));
        assert!(lines[0].contains("turnover ₹4,000,000+, FOIR <= 30%"));
        assert!(lines[7].contains("turnover ₹10,000,000+"));
        assert!(lines[0].contains("pincodes 1"));
        assert!(lines[1].contains("pincodes 0"));
    }

    #[test]
    fn reading_a_missing_lead_file_is_an_io_error() {
        let err = read_lead(Path::new("/nonexistent/lead.json")).expect_err("missing file");
        assert!(matches!(err, AppError::Io(_)));
    }
}
