use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Numeric lead input as captured by intake: a number, text that may or may not parse, or
/// some other JSON value that never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    Other(Value),
}

impl NumericInput {
    /// Finite value when the input is a number or numeric text, `None` otherwise.
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            NumericInput::Number(value) => Some(*value),
            NumericInput::Text(raw) => raw.trim().parse::<f64>().ok(),
            NumericInput::Other(_) => None,
        };
        parsed.filter(|value| value.is_finite())
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Co-applicant captured when the primary applicant's profile requires one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoApplicant {
    #[serde(deserialize_with = "text_or_blank")]
    pub name: String,
    #[serde(deserialize_with = "text_or_blank")]
    pub relationship: String,
}

/// One applicant's captured attributes. Every field is optional until intake supplies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub firm_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vintage_years: Option<NumericInput>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub constitution_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_turnover: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_turnover: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_obligations: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foir: Option<NumericInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_last_year: Option<NumericInput>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub business_segment: Option<String>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub nature_of_business: Option<String>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub ownership_status: Option<String>,
    #[serde(deserialize_with = "whole_number", skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "boolean_only", skip_serializing_if = "Option::is_none")]
    pub is_ntc: Option<bool>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub requested_loan_type: Option<String>,
    #[serde(deserialize_with = "co_applicant_or_none", skip_serializing_if = "Option::is_none")]
    pub co_applicant_details: Option<CoApplicant>,
    #[serde(deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(deserialize_with = "step_number", skip_serializing_if = "Option::is_none")]
    pub draft_step: Option<u32>,
}

impl Lead {
    pub fn vintage_years(&self) -> Option<f64> {
        self.vintage_years.as_ref().and_then(NumericInput::value)
    }

    pub fn monthly_turnover(&self) -> Option<f64> {
        self.monthly_turnover.as_ref().and_then(NumericInput::value)
    }

    pub fn yearly_turnover(&self) -> Option<f64> {
        self.yearly_turnover.as_ref().and_then(NumericInput::value)
    }

    pub fn total_obligations(&self) -> Option<f64> {
        self.total_obligations.as_ref().and_then(NumericInput::value)
    }

    pub fn foir(&self) -> Option<f64> {
        self.foir.as_ref().and_then(NumericInput::value)
    }

    /// Pincode as supplied, with blank input treated as absent.
    pub fn pincode(&self) -> Option<&str> {
        non_blank(self.pincode.as_deref())
    }

    pub fn business_segment(&self) -> Option<&str> {
        non_blank(self.business_segment.as_deref())
    }

    pub fn requested_loan_type(&self) -> Option<&str> {
        non_blank(self.requested_loan_type.as_deref())
    }

    pub fn is_new_to_credit(&self) -> bool {
        self.is_ntc == Some(true)
    }

    /// Record monthly turnover and obligations together with the figures derived from them.
    pub fn with_financials(mut self, monthly_turnover: f64, total_obligations: f64) -> Self {
        self.monthly_turnover = Some(monthly_turnover.into());
        self.total_obligations = Some(total_obligations.into());
        self.yearly_turnover = Some((monthly_turnover * 12.0).into());
        self.foir = Some(foir(monthly_turnover, total_obligations).into());
        self
    }

    /// Copy of the lead with yearly turnover and FOIR recomputed from the monthly figures.
    ///
    /// Leads that lack a parseable monthly turnover or obligations keep the derived values
    /// they arrived with.
    pub fn normalized(&self) -> Lead {
        match (self.monthly_turnover(), self.total_obligations()) {
            (Some(turnover), Some(obligations)) => {
                self.clone().with_financials(turnover, obligations)
            }
            _ => self.clone(),
        }
    }
}

/// Obligations over turnover, zero when there is no turnover to divide by.
pub fn foir(monthly_turnover: f64, total_obligations: f64) -> f64 {
    if monthly_turnover > 0.0 {
        total_obligations / monthly_turnover
    } else {
        0.0
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

fn text_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or_number(deserializer)?.unwrap_or_default())
}

/// Integral numbers or integer text; anything else reads as absent.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                .map(|value| value as i64)
        }),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn step_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(whole_number(deserializer)?.and_then(|step| u32::try_from(step).ok()))
}

/// Only a JSON boolean counts; `"Yes"` or `1` leave the flag unset.
fn boolean_only<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => Some(flag),
        _ => None,
    })
}

fn co_applicant_or_none<'de, D>(deserializer: D) -> Result<Option<CoApplicant>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(details @ Value::Object(_)) => serde_json::from_value(details).ok(),
        _ => None,
    })
}
