use super::format;
use super::lead::Lead;
use super::policy::{loan_type_display, PolicyRule};
use serde::{Deserialize, Serialize};

/// Near-miss window below the vintage minimum that earns a deviation tip.
pub const VINTAGE_DEVIATION_TOLERANCE_YEARS: f64 = 0.25;

/// Individual eligibility checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Vintage,
    Constitution,
    Turnover,
    Foir,
    Pincode,
    NegativeIndustry,
    Ownership,
    NewToCredit,
    LoanType,
}

/// Reasons and tips accumulated while a lead runs through one rule.
#[derive(Debug, Default)]
pub(crate) struct CheckTrail {
    pub(crate) failed: Vec<CheckKind>,
    pub(crate) reasons: Vec<String>,
    pub(crate) tips: Vec<String>,
}

impl CheckTrail {
    fn fail(&mut self, check: CheckKind, reason: String) {
        self.failed.push(check);
        self.reasons.push(reason);
    }

    fn tip(&mut self, tip: String) {
        self.tips.push(tip);
    }

    pub(crate) fn passed(&self) -> bool {
        self.failed.is_empty()
    }
}

type Check = fn(&Lead, &PolicyRule, &mut CheckTrail);

pub(crate) const CHECKS: [(CheckKind, Check); 9] = [
    (CheckKind::Vintage, check_vintage),
    (CheckKind::Constitution, check_constitution),
    (CheckKind::Turnover, check_turnover),
    (CheckKind::Foir, check_foir),
    (CheckKind::Pincode, check_pincode),
    (CheckKind::NegativeIndustry, check_negative_industry),
    (CheckKind::Ownership, check_ownership),
    (CheckKind::NewToCredit, check_new_to_credit),
    (CheckKind::LoanType, check_loan_type),
];

/// Run every check against the rule. Checks never short-circuit each other.
pub(crate) fn run_checks(lead: &Lead, rule: &PolicyRule) -> CheckTrail {
    let mut trail = CheckTrail::default();
    for (_, check) in CHECKS {
        check(lead, rule, &mut trail);
    }
    trail
}

fn check_vintage(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    let Some(vintage) = lead.vintage_years() else {
        return;
    };
    let minimum = rule.min_vintage_years;

    if vintage < minimum {
        trail.fail(
            CheckKind::Vintage,
            format!(
                "Business vintage is {vintage:.2} years (requires {}+ years).",
                format::years(minimum)
            ),
        );
    }

    let lower_bound = (minimum - VINTAGE_DEVIATION_TOLERANCE_YEARS).max(0.0);
    if lower_bound <= vintage && vintage < minimum {
        trail.tip(format!(
            "Tip: Vintage is {vintage:.2} years, close to the {}-year requirement. \
             If additional evidence (e.g., earlier business documents) is available or if the \
             underwriter considers associated/previous business history, a deviation may be \
             considered.",
            format::years(minimum)
        ));
    }
}

fn check_constitution(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    if let Some(constitution) = lead.constitution_type.as_deref() {
        if !rule.allowed_constitutions.contains(constitution) {
            trail.fail(
                CheckKind::Constitution,
                format!("Constitution type '{constitution}' is not supported."),
            );
        }
    }
}

fn check_turnover(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    let Some(turnover) = lead.yearly_turnover() else {
        return;
    };
    if turnover < rule.min_yearly_turnover as f64 {
        trail.fail(
            CheckKind::Turnover,
            format!(
                "Yearly turnover is ₹{} (requires ₹{}+).",
                format::rupees(turnover.trunc() as i64),
                format::rupees(i64::try_from(rule.min_yearly_turnover).unwrap_or(i64::MAX))
            ),
        );
    }
}

fn check_foir(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    let Some(foir) = lead.foir() else {
        return;
    };
    if foir > rule.max_foir {
        trail.fail(
            CheckKind::Foir,
            format!(
                "FOIR is {} (max allowed is {}).",
                format::percent(foir),
                format::percent(rule.max_foir)
            ),
        );
    }
}

fn check_pincode(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    let Some(allowed) = rule.allowed_pincodes.as_ref() else {
        return;
    };
    let Some(pincode) = lead.pincode() else {
        trail.fail(CheckKind::Pincode, "Pincode is missing.".to_string());
        return;
    };

    if !is_integer_text(pincode.trim()) {
        trail.fail(
            CheckKind::Pincode,
            format!("Pincode '{pincode}' is invalid."),
        );
        return;
    }

    // Integers outside the u32 range cannot be serviceable.
    let serviceable = pincode
        .trim()
        .parse::<u32>()
        .map(|code| allowed.contains(&code))
        .unwrap_or(false);
    if !serviceable {
        trail.fail(
            CheckKind::Pincode,
            format!("Pincode {pincode} is not in a serviceable area."),
        );
    }
}

/// Optionally signed run of ASCII digits, of any length.
fn is_integer_text(raw: &str) -> bool {
    let digits = raw
        .strip_prefix('-')
        .or_else(|| raw.strip_prefix('+'))
        .unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

fn check_negative_industry(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    let (Some(keywords), Some(segment)) =
        (rule.negative_industries.as_ref(), lead.business_segment())
    else {
        return;
    };

    let normalized = segment.trim().to_lowercase();
    let hit = keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .find(|keyword| normalized.contains(keyword.as_str()));

    if let Some(keyword) = hit {
        trail.fail(
            CheckKind::NegativeIndustry,
            format!("Industry '{segment}' is negative (contains '{keyword}')."),
        );
    }
}

fn check_ownership(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    if let Some(ownership) = lead.ownership_status.as_deref() {
        if !rule.allowed_ownership.contains(ownership) {
            trail.fail(
                CheckKind::Ownership,
                format!("Ownership status '{ownership}' is not supported."),
            );
        }
    }
}

fn check_new_to_credit(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    if lead.is_new_to_credit() && !rule.ntc_allowed {
        trail.fail(
            CheckKind::NewToCredit,
            "New to Credit (NTC) customers are not supported.".to_string(),
        );
    }
}

fn check_loan_type(lead: &Lead, rule: &PolicyRule, trail: &mut CheckTrail) {
    if let Some(requested) = lead.requested_loan_type() {
        if !rule.allowed_loan_types.contains(requested) {
            trail.fail(
                CheckKind::LoanType,
                format!(
                    "Requested loan type '{}' is not offered by {}.",
                    loan_type_display(requested),
                    rule.lender
                ),
            );
        }
    }
}
