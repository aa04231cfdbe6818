use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;

use super::ReferenceDataError;

#[derive(Debug, Deserialize)]
struct PincodeRow {
    pincode: String,
}

#[derive(Debug, Deserialize)]
struct NegativeIndustryRow {
    negative_industries: String,
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

/// Serviceable pincodes from a CSV with a `pincode` column. Blank cells are skipped; any
/// other non-integer cell rejects the file.
pub fn parse_pincodes<R: Read>(source: R) -> Result<BTreeSet<u32>, ReferenceDataError> {
    let mut pincodes = BTreeSet::new();
    for row in reader(source).deserialize::<PincodeRow>() {
        let row = row?;
        if row.pincode.is_empty() {
            continue;
        }
        pincodes.insert(parse_pincode_cell(&row.pincode)?);
    }
    Ok(pincodes)
}

/// Negative-industry keywords from a CSV with a `negative_industries` column, trimmed and
/// lower-cased. Blank cells are dropped.
pub fn parse_negative_industries<R: Read>(
    source: R,
) -> Result<BTreeSet<String>, ReferenceDataError> {
    let mut keywords = BTreeSet::new();
    for row in reader(source).deserialize::<NegativeIndustryRow>() {
        let keyword = row?.negative_industries.trim().to_lowercase();
        if !keyword.is_empty() {
            keywords.insert(keyword);
        }
    }
    Ok(keywords)
}

/// Spreadsheet exports often write pincodes as `110001.0`; integral floats are accepted.
fn parse_pincode_cell(cell: &str) -> Result<u32, ReferenceDataError> {
    if let Ok(code) = cell.parse::<u32>() {
        return Ok(code);
    }

    cell.parse::<f64>()
        .ok()
        .filter(|value| value.fract() == 0.0 && *value >= 0.0 && *value <= u32::MAX as f64)
        .map(|value| value as u32)
        .ok_or_else(|| ReferenceDataError::InvalidPincode {
            value: cell.to_string(),
        })
}
