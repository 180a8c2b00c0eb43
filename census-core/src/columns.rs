//! Canonical column names for the merged census CSV.
//!
//! Source files are inconsistent about header spelling (`population 1998`
//! next to `population_2023`), so every header is normalized once at load
//! time and matched against the names below.

use csv::StringRecord;

use crate::error::{CensusError, Result};

pub const PROVINCE: &str = "province";
pub const DISTRICT: &str = "district";
pub const POPULATION_2023: &str = "population_2023";
pub const POPULATION_1998: &str = "population_1998";
pub const MALE: &str = "male";
pub const FEMALE: &str = "female";
pub const TOTAL_SCHOOLS: &str = "total_schools";
pub const LITERACY_RATE: &str = "literacy_rate";

/// Any normalized header starting with this prefix is the density column,
/// e.g. `density_2023(people/km²)`.
pub const DENSITY_PREFIX: &str = "density";

/// Reported name of the density column in errors.
pub const DENSITY: &str = "density";

/// Normalize a raw header: trim, lowercase, collapse inner whitespace to `_`.
///
/// ```
/// use census_core::columns::normalize_header;
///
/// assert_eq!(normalize_header(" Population 1998 "), "population_1998");
/// assert_eq!(normalize_header("population_2023"), "population_2023");
/// ```
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Positions of each known column within a CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub province: usize,
    pub district: usize,
    pub population_2023: usize,
    pub population_1998: usize,
    pub male: usize,
    pub female: usize,
    pub total_schools: usize,
    pub density: usize,
    pub literacy_rate: Option<usize>,
}

impl ColumnIndex {
    /// Resolve column positions from a header row.
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);
        let require = |name: &'static str| find(name).ok_or(CensusError::MissingColumn(name));

        let density = normalized
            .iter()
            .position(|h| h.starts_with(DENSITY_PREFIX))
            .ok_or(CensusError::MissingColumn(DENSITY))?;

        Ok(Self {
            province: require(PROVINCE)?,
            district: require(DISTRICT)?,
            population_2023: require(POPULATION_2023)?,
            population_1998: require(POPULATION_1998)?,
            male: require(MALE)?,
            female: require(FEMALE)?,
            total_schools: require(TOTAL_SCHOOLS)?,
            density,
            literacy_rate: find(LITERACY_RATE),
        })
    }

    /// Whether the source carries a reported literacy column.
    pub fn has_literacy_rate(&self) -> bool {
        self.literacy_rate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> StringRecord {
        StringRecord::from(cols.to_vec())
    }

    #[test]
    fn test_resolve_source_headers() {
        let index = ColumnIndex::resolve(&headers(&[
            "province",
            "district",
            "population_2023",
            "population 1998",
            "male",
            "female",
            "total_schools",
            "density_2023(people/km²)",
        ]))
        .unwrap();
        assert_eq!(index.population_1998, 3);
        assert_eq!(index.density, 7);
        assert!(!index.has_literacy_rate());
    }

    #[test]
    fn test_resolve_any_order_with_literacy() {
        let index = ColumnIndex::resolve(&headers(&[
            "Literacy_Rate",
            "DENSITY",
            "Total_Schools",
            "Female",
            "Male",
            "Population_1998",
            "Population_2023",
            "District",
            "\u{feff}Province",
        ]))
        .unwrap();
        assert_eq!(index.province, 8);
        assert_eq!(index.district, 7);
        assert_eq!(index.density, 1);
        assert_eq!(index.literacy_rate, Some(0));
    }

    #[test]
    fn test_missing_column_is_named() {
        let err = ColumnIndex::resolve(&headers(&[
            "province",
            "district",
            "population_2023",
            "male",
            "female",
            "total_schools",
            "density",
        ]))
        .unwrap_err();
        assert!(matches!(err, CensusError::MissingColumn(POPULATION_1998)));
    }

    #[test]
    fn test_missing_density_is_named() {
        let err = ColumnIndex::resolve(&headers(&[
            "province",
            "district",
            "population_2023",
            "population 1998",
            "male",
            "female",
            "total_schools",
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing required column: density");
    }
}
