use super::common::*;
use crate::eligibility::{lenders, Lead, PolicyCatalog};
use crate::intake::IntakeIssue;
use crate::leads::{LeadServiceError, LeadStatus, RepositoryError};

#[test]
fn evaluate_recomputes_foir_from_monthly_figures() {
    let (service, _) = build_service();
    let mut lead = lead();
    lead.foir = Some(0.9.into());

    let report = service.evaluate(&lead);

    let indifi = &report.verdicts[lenders::INDIFI_TERM_LOAN];
    assert!(indifi.eligible, "reasons: {:?}", indifi.reasons);
    assert!(report.issues.is_empty());
}

#[test]
fn evaluate_surfaces_intake_issues_without_blocking() {
    let (service, _) = build_service();
    let lead = Lead {
        gender: Some("Female".to_string()),
        age: Some(35),
        ..lead()
    };

    let report = service.evaluate(&lead);

    assert_eq!(report.verdicts.len(), 12);
    assert!(report
        .issues
        .iter()
        .any(|issue| matches!(issue, IntakeIssue::MissingCoApplicant { .. })));
}

#[test]
fn save_upserts_by_mobile_number_with_eligibility() {
    let (service, repository) = build_service();

    let draft = service
        .save(lead(), LeadStatus::Draft)
        .expect("draft saved");
    assert_eq!(draft.status, LeadStatus::Draft);
    assert!(draft.eligible_lenders().contains(&lenders::INDIFI_TERM_LOAN));

    let mut updated = lead();
    updated.remarks = Some("Collect GST returns".to_string());
    let active = service
        .save(updated, LeadStatus::Active)
        .expect("lead saved");

    let records = repository.records.lock().expect("lock");
    assert_eq!(records.len(), 1);
    let stored = &records[MOBILE];
    assert_eq!(stored.status, LeadStatus::Active);
    assert_eq!(stored.lead.remarks.as_deref(), Some("Collect GST returns"));
    assert!(stored.updated_at >= draft.updated_at);
    assert_eq!(stored, &active);
}

#[test]
fn save_requires_valid_mobile_number() {
    let (service, _) = build_service();

    let missing = Lead {
        mobile_number: None,
        ..lead()
    };
    assert!(matches!(
        service.save(missing, LeadStatus::Draft),
        Err(LeadServiceError::MissingMobileNumber)
    ));

    let short = Lead {
        mobile_number: Some("98765".to_string()),
        ..lead()
    };
    assert!(matches!(
        service.save(short, LeadStatus::Draft),
        Err(LeadServiceError::Intake(_))
    ));
}

#[test]
fn load_draft_refreshes_eligibility_against_current_catalog() {
    let (service, _) = build_service();
    service
        .save(lead(), LeadStatus::Draft)
        .expect("draft saved");

    service
        .catalog()
        .replace(PolicyCatalog::from_reference(&Default::default()));
    let record = service.load_draft(MOBILE).expect("draft loads");

    let verdicts = record.eligibility.expect("eligibility present");
    assert!(verdicts.values().all(|verdict| !verdict.eligible));
}

#[test]
fn load_draft_reports_missing_record() {
    let (service, _) = build_service();

    assert!(matches!(
        service.load_draft("9999999999"),
        Err(LeadServiceError::Repository(RepositoryError::NotFound))
    ));
}
