//! Dashboard session: page navigation, province selection, and rendering.
//!
//! A session starts on the welcome page. The single `explore` action moves
//! it to the dashboard, where it stays. Every render rebuilds all chart
//! views from the shared dataset.

use std::rc::Rc;

use census_core::Dataset;
use log::{info, warn};
use serde::Serialize;

use crate::metrics::{LiteracyPolicy, LiteracySource};
use crate::ranking::DEFAULT_TOP_N;
use crate::views::{ChartKey, ChartView, ViewSelector};

pub const WELCOME_TITLE: &str = "Pakistan Census 2023";
pub const WELCOME_DESCRIPTION: &str = "Explore population, literacy, gender, and educational \
institutions across Pakistan's districts, based on the 1998 and 2023 censuses.";
pub const DASHBOARD_TITLE: &str = "Pakistan Census - District Level Analysis";

/// Which page the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Welcome,
    Dashboard,
}

impl Page {
    /// The "explore" transition. Welcome moves to Dashboard; Dashboard has
    /// no outgoing transition.
    pub fn explore(self) -> Page {
        match self {
            Page::Welcome => Page::Dashboard,
            Page::Dashboard => Page::Dashboard,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Page::Dashboard
    }
}

/// Options that shape every rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Rows per ranked chart
    pub top_n: usize,
    pub literacy: LiteracyPolicy,
    /// Apply the province filter to every chart, not just growth
    pub regional_scope: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            literacy: LiteracyPolicy::default(),
            regional_scope: false,
        }
    }
}

/// Everything one interaction produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Frame {
    Welcome {
        title: &'static str,
        description: &'static str,
    },
    Dashboard {
        title: &'static str,
        provinces: Vec<String>,
        province: Option<String>,
        literacy_source: LiteracySource,
        charts: Vec<ChartView>,
    },
}

impl Frame {
    pub fn charts(&self) -> &[ChartView] {
        match self {
            Frame::Welcome { .. } => &[],
            Frame::Dashboard { charts, .. } => charts,
        }
    }

    pub fn chart(&self, key: ChartKey) -> Option<&ChartView> {
        self.charts().iter().find(|c| c.key == key)
    }
}

/// One user's dashboard session over a shared, immutable dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Rc<Dataset>,
    config: DashboardConfig,
    page: Page,
    selected: Option<String>,
}

impl Dashboard {
    pub fn new(dataset: Rc<Dataset>, config: DashboardConfig) -> Self {
        Self {
            dataset,
            config,
            page: Page::Welcome,
            selected: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn explore(&mut self) {
        let next = self.page.explore();
        if next != self.page {
            info!("[census] dashboard: {:?} -> {:?}", self.page, next);
        }
        self.page = next;
    }

    /// Provinces offered by the selector, in first-appearance order.
    pub fn provinces(&self) -> Vec<&str> {
        self.dataset.provinces()
    }

    /// The explicit selection, or the first province when none was made.
    pub fn selected_province(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .or_else(|| self.dataset.provinces().first().copied())
    }

    /// Select a province. Unknown names are accepted and render empty
    /// regional charts.
    pub fn select_province(&mut self, province: impl Into<String>) {
        let province = province.into();
        if !self.dataset.provinces().contains(&province.as_str()) {
            warn!(
                "[census] dashboard: province '{}' has no districts",
                province
            );
        }
        self.selected = Some(province);
    }

    /// Render every chart for the current state.
    pub fn render(&self) -> Frame {
        self.render_charts(&ChartKey::ALL)
    }

    /// Render only the requested charts for the current state.
    pub fn render_charts(&self, keys: &[ChartKey]) -> Frame {
        match self.page {
            Page::Welcome => Frame::Welcome {
                title: WELCOME_TITLE,
                description: WELCOME_DESCRIPTION,
            },
            Page::Dashboard => {
                let selector = ViewSelector::new(&self.dataset, &self.config);
                let province = self.selected_province();
                let charts = selector.build_many(keys, province);
                info!(
                    "[census] dashboard: rendered {} charts for {}",
                    charts.len(),
                    province.unwrap_or("no province")
                );
                Frame::Dashboard {
                    title: DASHBOARD_TITLE,
                    provinces: self.provinces().into_iter().map(String::from).collect(),
                    province: province.map(String::from),
                    literacy_source: selector.literacy_source(),
                    charts,
                }
            }
        }
    }
}
