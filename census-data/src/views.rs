//! Chart views for the dashboard.
//!
//! Each [`ChartView`] is a serializable description of one chart: labels,
//! colouring, and the exact points to draw. A host UI passes these to its
//! plotting layer as JSON; nothing here knows how to draw.

use std::fmt;
use std::str::FromStr;

use census_core::Dataset;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardConfig;
use crate::metrics::{derive_all, DistrictMetrics, LiteracySource};
use crate::ranking::{dual_top_n, top_n, SortOrder};

/// Stable identifier of each chart, addressable by a host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKey {
    Growth,
    LitPop,
    Underserved,
    MaleSkewed,
    FemaleSkewed,
    Density,
    SchoolLitCorr,
    PopSchoolScatter,
}

impl ChartKey {
    /// All charts in dashboard order.
    pub const ALL: [ChartKey; 8] = [
        ChartKey::Growth,
        ChartKey::LitPop,
        ChartKey::Underserved,
        ChartKey::MaleSkewed,
        ChartKey::FemaleSkewed,
        ChartKey::Density,
        ChartKey::SchoolLitCorr,
        ChartKey::PopSchoolScatter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKey::Growth => "growth",
            ChartKey::LitPop => "lit_pop",
            ChartKey::Underserved => "underserved",
            ChartKey::MaleSkewed => "male_skewed",
            ChartKey::FemaleSkewed => "female_skewed",
            ChartKey::Density => "density",
            ChartKey::SchoolLitCorr => "school_lit_corr",
            ChartKey::PopSchoolScatter => "pop_school_scatter",
        }
    }

    /// Only the growth chart follows the province selector unless every
    /// chart is scoped regionally.
    pub fn is_regional_by_default(self) -> bool {
        matches!(self, ChartKey::Growth)
    }
}

impl fmt::Display for ChartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| {
                let known: Vec<&str> = ChartKey::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown chart '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

/// Which dimension a chart colours its marks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBy {
    District,
    Province,
}

/// Extra value shown on hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverField {
    pub label: &'static str,
    pub value: f64,
}

/// One bar: a district and its metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub district: String,
    pub province: String,
    pub value: f64,
    pub hover: Vec<HoverField>,
}

/// One scatter point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterDatum {
    pub district: String,
    pub province: String,
    pub x: f64,
    pub y: f64,
    /// Marker size, when the chart encodes a third variable
    pub size: Option<f64>,
    pub hover: Vec<HoverField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum ChartData {
    Bar(Vec<BarDatum>),
    Scatter(Vec<ScatterDatum>),
}

impl ChartData {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Bar(points) => points.len(),
            ChartData::Scatter(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// District names in plotting order.
    pub fn districts(&self) -> Vec<&str> {
        match self {
            ChartData::Bar(points) => points.iter().map(|p| p.district.as_str()).collect(),
            ChartData::Scatter(points) => points.iter().map(|p| p.district.as_str()).collect(),
        }
    }
}

/// A fully described chart, ready for a plotting layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub key: ChartKey,
    /// Dashboard section heading the chart sits under
    pub section: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color_by: ColorBy,
    pub note: Option<&'static str>,
    pub data: ChartData,
}

const SCHOOL_LITERACY_NOTE: &str = "Districts with more schools tend to show higher literacy, \
but the relationship is not linear. Where many schools coexist with low literacy, school \
quality, access, or gender imbalance are the likelier constraints, so teacher training or \
female access may matter more than building additional schools.";

fn bar(m: &DistrictMetrics<'_>, value: f64, hover: Vec<HoverField>) -> BarDatum {
    BarDatum {
        district: m.district().to_string(),
        province: m.province().to_string(),
        value,
        hover,
    }
}

fn scatter(
    m: &DistrictMetrics<'_>,
    x: f64,
    y: f64,
    size: Option<f64>,
    hover: Vec<HoverField>,
) -> ScatterDatum {
    ScatterDatum {
        district: m.district().to_string(),
        province: m.province().to_string(),
        x,
        y,
        size,
        hover,
    }
}

fn population_and_schools(m: &DistrictMetrics<'_>) -> Vec<HoverField> {
    vec![
        HoverField {
            label: "population_2023",
            value: m.record.population_2023 as f64,
        },
        HoverField {
            label: "total_schools",
            value: m.record.total_schools as f64,
        },
    ]
}

/// Builds chart views from the immutable dataset.
///
/// Every call derives metrics afresh for the records in the chart's scope.
#[derive(Debug, Clone, Copy)]
pub struct ViewSelector<'a> {
    dataset: &'a Dataset,
    literacy: LiteracySource,
    top_n: usize,
    regional_scope: bool,
}

impl<'a> ViewSelector<'a> {
    pub fn new(dataset: &'a Dataset, config: &DashboardConfig) -> Self {
        Self {
            dataset,
            literacy: config.literacy.resolve(dataset),
            top_n: config.top_n,
            regional_scope: config.regional_scope,
        }
    }

    pub fn literacy_source(&self) -> LiteracySource {
        self.literacy
    }

    fn is_regional(&self, key: ChartKey) -> bool {
        self.regional_scope || key.is_regional_by_default()
    }

    /// Metrics for the records a chart is allowed to see.
    fn scoped_metrics(&self, key: ChartKey, province: Option<&str>) -> Vec<DistrictMetrics<'a>> {
        if !self.is_regional(key) {
            return derive_all(self.dataset.records(), self.literacy);
        }
        match province {
            Some(p) => derive_all(self.dataset.in_province(p), self.literacy),
            None => Vec::new(),
        }
    }

    fn title(&self, key: ChartKey, base: String, province: Option<&str>) -> String {
        match province {
            Some(p) if self.is_regional(key) => format!("{} in {}", base, p),
            _ => base,
        }
    }

    /// Build one chart for the selected province.
    ///
    /// A province with no records, or no selection at all, produces an empty
    /// regional chart rather than an error.
    pub fn build(&self, key: ChartKey, province: Option<&str>) -> ChartView {
        let metrics = self.scoped_metrics(key, province);
        let n = self.top_n;
        let view = match key {
            ChartKey::Growth => {
                let ranked = top_n(&metrics, |m| m.population_growth_pct, SortOrder::Descending, n);
                ChartView {
                    key,
                    section: "Population Growth by District",
                    title: self.title(key, format!("Top {} Growing Districts", n), province),
                    x_label: "District",
                    y_label: "Growth %",
                    color_by: ColorBy::District,
                    note: None,
                    data: ChartData::Bar(
                        ranked
                            .into_iter()
                            .filter_map(|m| m.population_growth_pct.map(|v| bar(m, v, Vec::new())))
                            .collect(),
                    ),
                }
            }
            ChartKey::LitPop => ChartView {
                key,
                section: "Literacy Rate vs Population (by District)",
                title: self.title(
                    key,
                    "Literacy Rate vs Population (District-wise)".to_string(),
                    province,
                ),
                x_label: "Population (2023)",
                y_label: self.literacy.axis_label(),
                color_by: ColorBy::Province,
                note: None,
                data: ChartData::Scatter(
                    metrics
                        .iter()
                        .filter_map(|m| {
                            let literacy = m.literacy_rate?;
                            let r = m.record;
                            Some(scatter(
                                m,
                                r.population_2023 as f64,
                                literacy,
                                Some(r.total_schools as f64),
                                vec![
                                    HoverField {
                                        label: "male",
                                        value: r.male as f64,
                                    },
                                    HoverField {
                                        label: "female",
                                        value: r.female as f64,
                                    },
                                    HoverField {
                                        label: "total_schools",
                                        value: r.total_schools as f64,
                                    },
                                ],
                            ))
                        })
                        .collect(),
                ),
            },
            ChartKey::Underserved => {
                let ranked = top_n(&metrics, |m| m.people_per_school, SortOrder::Descending, n);
                ChartView {
                    key,
                    section: "Districts with Highest People per School",
                    title: self.title(
                        key,
                        format!("Top {} Underserved Districts by School Access", n),
                        province,
                    ),
                    x_label: "District",
                    y_label: "People per School",
                    color_by: ColorBy::Province,
                    note: None,
                    data: ChartData::Bar(
                        ranked
                            .into_iter()
                            .filter_map(|m| {
                                m.people_per_school
                                    .map(|v| bar(m, v, population_and_schools(m)))
                            })
                            .collect(),
                    ),
                }
            }
            ChartKey::MaleSkewed | ChartKey::FemaleSkewed => {
                let dual = dual_top_n(&metrics, |m| m.male_female_ratio, n);
                let (ranked, title) = if key == ChartKey::MaleSkewed {
                    (dual.highest, format!("Top {} Male-Skewed Districts", n))
                } else {
                    (dual.lowest, format!("Top {} Female-Skewed Districts", n))
                };
                ChartView {
                    key,
                    section: "Gender Imbalance Across Districts",
                    title: self.title(key, title, province),
                    x_label: "District",
                    y_label: "Male/Female Ratio",
                    color_by: ColorBy::Province,
                    note: None,
                    data: ChartData::Bar(
                        ranked
                            .into_iter()
                            .filter_map(|m| m.male_female_ratio.map(|v| bar(m, v, Vec::new())))
                            .collect(),
                    ),
                }
            }
            ChartKey::Density => {
                let ranked = top_n(&metrics, |m| m.record.density, SortOrder::Descending, n);
                ChartView {
                    key,
                    section: "Most Densely Populated Districts (Urban Proxies)",
                    title: self.title(
                        key,
                        format!("Top {} Densely Populated Districts", n),
                        province,
                    ),
                    x_label: "District",
                    y_label: "People per km²",
                    color_by: ColorBy::Province,
                    note: None,
                    data: ChartData::Bar(
                        ranked
                            .into_iter()
                            .filter_map(|m| m.record.density.map(|v| bar(m, v, Vec::new())))
                            .collect(),
                    ),
                }
            }
            ChartKey::SchoolLitCorr => ChartView {
                key,
                section: "Literacy Rate vs Total Number of Schools",
                title: self.title(
                    key,
                    "Correlation Between Total Schools and Literacy Rate".to_string(),
                    province,
                ),
                x_label: "Total Schools",
                y_label: self.literacy.axis_label(),
                color_by: ColorBy::Province,
                note: Some(SCHOOL_LITERACY_NOTE),
                data: ChartData::Scatter(
                    metrics
                        .iter()
                        .filter_map(|m| {
                            let literacy = m.literacy_rate.filter(|v| *v > 0.0)?;
                            let schools = m.record.total_schools;
                            (schools > 0).then(|| {
                                scatter(
                                    m,
                                    schools as f64,
                                    literacy,
                                    Some(m.record.population_2023 as f64),
                                    Vec::new(),
                                )
                            })
                        })
                        .collect(),
                ),
            },
            ChartKey::PopSchoolScatter => ChartView {
                key,
                section: "Population vs Total Schools",
                title: self.title(
                    key,
                    "Total Schools vs Population (by District)".to_string(),
                    province,
                ),
                x_label: "Population (2023)",
                y_label: "Total Schools",
                color_by: ColorBy::Province,
                note: None,
                data: ChartData::Scatter(
                    metrics
                        .iter()
                        .filter(|m| m.record.population_2023 > 0 && m.record.total_schools > 0)
                        .map(|m| {
                            scatter(
                                m,
                                m.record.population_2023 as f64,
                                m.record.total_schools as f64,
                                None,
                                Vec::new(),
                            )
                        })
                        .collect(),
                ),
            },
        };
        debug!(
            "[census] views: {} built with {} points",
            view.key,
            view.data.len()
        );
        view
    }

    /// Build the requested charts in the given order.
    pub fn build_many(&self, keys: &[ChartKey], province: Option<&str>) -> Vec<ChartView> {
        keys.iter().map(|key| self.build(*key, province)).collect()
    }
}
