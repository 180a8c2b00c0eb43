//! Derived per-district metrics.
//!
//! Every metric is a pure function of a record's base fields and returns
//! `None` when its denominator is zero. Nothing here is cached: callers
//! recompute from the immutable dataset for each view.

use census_core::{Dataset, DistrictRecord};
use serde::{Deserialize, Serialize};

/// Population growth between the two censuses, in percent.
///
/// Undefined when the 1998 population is zero (e.g. districts created later).
pub fn population_growth_pct(record: &DistrictRecord) -> Option<f64> {
    if record.population_1998 == 0 {
        return None;
    }
    let before = record.population_1998 as f64;
    let after = record.population_2023 as f64;
    Some((after - before) / before * 100.0)
}

/// Schools per 100 residents, used as a stand-in for literacy when the
/// source has no literacy column.
///
/// This is a placeholder: it is not a rate of literate people and should be
/// replaced once a real literacy measure is available.
pub fn schools_per_capita_proxy(record: &DistrictRecord) -> Option<f64> {
    if record.population_2023 == 0 {
        return None;
    }
    Some(record.total_schools as f64 / record.population_2023 as f64 * 100.0)
}

/// Residents per school. Undefined without schools.
pub fn people_per_school(record: &DistrictRecord) -> Option<f64> {
    if record.total_schools == 0 {
        return None;
    }
    Some(record.population_2023 as f64 / record.total_schools as f64)
}

/// Males per female. Undefined when no females are recorded.
pub fn male_female_ratio(record: &DistrictRecord) -> Option<f64> {
    if record.female == 0 {
        return None;
    }
    Some(record.male as f64 / record.female as f64)
}

/// Which literacy figure the dashboard should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteracyPolicy {
    /// Reported column when the dataset has one, otherwise the proxy
    #[default]
    Auto,
    /// Reported column only
    Reported,
    /// Always the schools-per-capita proxy
    SchoolsPerCapitaProxy,
}

/// A literacy policy resolved against a concrete dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteracySource {
    Reported,
    SchoolsPerCapitaProxy,
}

impl LiteracyPolicy {
    /// Pick the literacy source once for the whole dataset so every view
    /// agrees on it.
    pub fn resolve(self, dataset: &Dataset) -> LiteracySource {
        match self {
            LiteracyPolicy::Reported => LiteracySource::Reported,
            LiteracyPolicy::SchoolsPerCapitaProxy => LiteracySource::SchoolsPerCapitaProxy,
            LiteracyPolicy::Auto if dataset.has_reported_literacy() => LiteracySource::Reported,
            LiteracyPolicy::Auto => LiteracySource::SchoolsPerCapitaProxy,
        }
    }
}

impl LiteracySource {
    pub fn literacy_rate(self, record: &DistrictRecord) -> Option<f64> {
        match self {
            LiteracySource::Reported => record.literacy_rate,
            LiteracySource::SchoolsPerCapitaProxy => schools_per_capita_proxy(record),
        }
    }

    /// Axis label that makes the proxy visible to readers.
    pub fn axis_label(self) -> &'static str {
        match self {
            LiteracySource::Reported => "Literacy Rate (%)",
            LiteracySource::SchoolsPerCapitaProxy => "Estimated Literacy Rate (%)",
        }
    }
}

/// A record together with its derived metrics for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictMetrics<'a> {
    pub record: &'a DistrictRecord,
    pub population_growth_pct: Option<f64>,
    pub literacy_rate: Option<f64>,
    pub people_per_school: Option<f64>,
    pub male_female_ratio: Option<f64>,
}

impl<'a> DistrictMetrics<'a> {
    pub fn compute(record: &'a DistrictRecord, literacy: LiteracySource) -> Self {
        Self {
            record,
            population_growth_pct: population_growth_pct(record),
            literacy_rate: literacy.literacy_rate(record),
            people_per_school: people_per_school(record),
            male_female_ratio: male_female_ratio(record),
        }
    }

    pub fn district(&self) -> &'a str {
        &self.record.district
    }

    pub fn province(&self) -> &'a str {
        &self.record.province
    }
}

/// Derive metrics for every record, preserving input order.
pub fn derive_all<'a, I>(records: I, literacy: LiteracySource) -> Vec<DistrictMetrics<'a>>
where
    I: IntoIterator<Item = &'a DistrictRecord>,
{
    records
        .into_iter()
        .map(|record| DistrictMetrics::compute(record, literacy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn record(pop2023: u64, pop1998: u64, male: u64, female: u64, schools: u64) -> DistrictRecord {
        DistrictRecord {
            province: "P".to_string(),
            district: "A".to_string(),
            population_2023: pop2023,
            population_1998: pop1998,
            male,
            female,
            total_schools: schools,
            density: Some(10.0),
            literacy_rate: None,
        }
    }

    #[test]
    fn test_growth() {
        assert!((population_growth_pct(&record(200, 100, 1, 1, 1)).unwrap() - 100.0).abs() < EPS);
        assert!((population_growth_pct(&record(150, 100, 1, 1, 1)).unwrap() - 50.0).abs() < EPS);
        assert!((population_growth_pct(&record(80, 100, 1, 1, 1)).unwrap() + 20.0).abs() < EPS);
        assert_eq!(population_growth_pct(&record(150, 0, 1, 1, 1)), None);
    }

    #[test]
    fn test_growth_matches_formula_on_sample() {
        let dataset = Dataset::sample().unwrap();
        for r in dataset.records().iter().filter(|r| r.population_1998 > 0) {
            let expected = (r.population_2023 as f64 - r.population_1998 as f64)
                / r.population_1998 as f64
                * 100.0;
            assert!((population_growth_pct(r).unwrap() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_denominators_are_undefined() {
        let r = record(0, 0, 5, 0, 0);
        assert_eq!(population_growth_pct(&r), None);
        assert_eq!(schools_per_capita_proxy(&r), None);
        assert_eq!(people_per_school(&r), None);
        assert_eq!(male_female_ratio(&r), None);
    }

    #[test]
    fn test_ratios() {
        let r = record(1000, 500, 520, 480, 4);
        assert!((people_per_school(&r).unwrap() - 250.0).abs() < EPS);
        assert!((male_female_ratio(&r).unwrap() - 520.0 / 480.0).abs() < EPS);
        assert!((schools_per_capita_proxy(&r).unwrap() - 0.4).abs() < EPS);
    }

    #[test]
    fn test_literacy_policy_resolution() {
        let proxy_only = Dataset::sample().unwrap();
        assert_eq!(
            LiteracyPolicy::Auto.resolve(&proxy_only),
            LiteracySource::SchoolsPerCapitaProxy
        );
        assert_eq!(
            LiteracyPolicy::Reported.resolve(&proxy_only),
            LiteracySource::Reported
        );

        let mut with_reported = record(1000, 500, 1, 1, 4);
        with_reported.literacy_rate = Some(61.5);
        let reported = Dataset::from_records(vec![with_reported.clone()]).unwrap();
        assert_eq!(LiteracyPolicy::Auto.resolve(&reported), LiteracySource::Reported);
        assert_eq!(
            LiteracyPolicy::SchoolsPerCapitaProxy.resolve(&reported),
            LiteracySource::SchoolsPerCapitaProxy
        );
        assert_eq!(
            LiteracySource::Reported.literacy_rate(&with_reported),
            Some(61.5)
        );
    }

    #[test]
    fn test_reported_source_missing_value_is_undefined() {
        let r = record(1000, 500, 1, 1, 4);
        assert_eq!(LiteracySource::Reported.literacy_rate(&r), None);
    }

    #[test]
    fn test_derive_all_does_not_touch_records() {
        let dataset = Dataset::sample().unwrap();
        let before = dataset.clone();
        let metrics = derive_all(dataset.records(), LiteracySource::SchoolsPerCapitaProxy);
        assert_eq!(metrics.len(), dataset.len());
        assert_eq!(metrics[0].district(), "Lahore");
        assert_eq!(dataset, before);
    }
}
