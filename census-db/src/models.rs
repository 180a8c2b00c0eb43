//! Query result models.
//!
//! All structs derive `Serialize` so the CLI can emit them as JSON or CSV.

use serde::Serialize;

/// A province offered by the selector, with its district count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProvinceInfo {
    pub province: String,
    pub districts: u64,
}

/// Aggregate figures for one province.
///
/// Ratios only count districts where they are defined: growth uses
/// districts with a 1998 baseline, people per school uses districts that
/// have schools. Both are `None` when no district qualifies.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProvinceSummary {
    pub province: String,
    pub districts: u64,
    pub population_2023: u64,
    pub population_1998: u64,
    pub growth_pct: Option<f64>,
    pub total_schools: u64,
    pub people_per_school: Option<f64>,
}
