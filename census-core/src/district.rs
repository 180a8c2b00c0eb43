use csv::StringRecord;

use crate::columns::{self, ColumnIndex};
use crate::error::{CensusError, Result};

/// Embedded sample of the merged district census CSV, in the source's
/// original header spelling.
pub static SAMPLE_CSV: &str = include_str!("../../fixtures/sample_districts.csv");

/// One administrative district as it appears in the merged census file.
///
/// These are base values only. Growth, literacy, and per-school ratios are
/// derived on demand and never stored here.
#[derive(Debug, PartialEq, Clone)]
pub struct DistrictRecord {
    pub province: String,
    /// Unique within its province
    pub district: String,
    pub population_2023: u64,
    pub population_1998: u64,
    pub male: u64,
    pub female: u64,
    pub total_schools: u64,
    /// People per km²
    pub density: Option<f64>,
    /// Reported literacy rate (%), when the source carries one
    pub literacy_rate: Option<f64>,
}

fn is_null_token(ess: &str) -> bool {
    matches!(
        ess.to_lowercase().as_str(),
        "" | "null" | "na" | "n/a" | "nan"
    )
}

/// Largest count a float cell can carry without rounding.
const MAX_FLOAT_COUNT: f64 = 9_007_199_254_740_992.0;

fn invalid(line: u64, column: &'static str, raw: &str) -> CensusError {
    CensusError::InvalidValue {
        line,
        column,
        value: raw.to_string(),
    }
}

/// Parse a non-negative count. Null-like cells count as zero; integral
/// floats such as `1234.0` are accepted.
fn parse_count(raw: &str, line: u64, column: &'static str) -> Result<u64> {
    let trimmed = raw.trim();
    if is_null_token(trimmed) {
        return Ok(0);
    }
    let digits = trimmed.replace(',', "");
    if let Ok(v) = digits.parse::<u64>() {
        return Ok(v);
    }
    match digits.parse::<f64>() {
        Ok(v) if v >= 0.0 && v <= MAX_FLOAT_COUNT && v.fract() == 0.0 => Ok(v as u64),
        _ => Err(invalid(line, column, raw)),
    }
}

/// Parse an optional non-negative measurement. Null-like cells are `None`.
fn parse_measure(raw: &str, line: u64, column: &'static str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if is_null_token(trimmed) {
        return Ok(None);
    }
    match trimmed.replace(',', "").parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(invalid(line, column, raw)),
    }
}

fn parse_label(raw: &str, line: u64, column: &'static str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(line, column, raw));
    }
    Ok(trimmed.to_string())
}

impl DistrictRecord {
    /// Build a record from one CSV row using resolved column positions.
    ///
    /// `line` is the 1-based source line, used only for error reporting.
    pub fn from_row(row: &StringRecord, index: &ColumnIndex, line: u64) -> Result<Self> {
        let cell = |i: usize| row.get(i).unwrap_or("");
        Ok(Self {
            province: parse_label(cell(index.province), line, columns::PROVINCE)?,
            district: parse_label(cell(index.district), line, columns::DISTRICT)?,
            population_2023: parse_count(
                cell(index.population_2023),
                line,
                columns::POPULATION_2023,
            )?,
            population_1998: parse_count(
                cell(index.population_1998),
                line,
                columns::POPULATION_1998,
            )?,
            male: parse_count(cell(index.male), line, columns::MALE)?,
            female: parse_count(cell(index.female), line, columns::FEMALE)?,
            total_schools: parse_count(cell(index.total_schools), line, columns::TOTAL_SCHOOLS)?,
            density: parse_measure(cell(index.density), line, columns::DENSITY)?,
            literacy_rate: match index.literacy_rate {
                Some(i) => parse_measure(cell(i), line, columns::LITERACY_RATE)?,
                None => None,
            },
        })
    }
}
