//! The `views` command: explore the dashboard and emit chart views.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use census_data::dashboard::{Dashboard, DashboardConfig, Frame};
use census_data::metrics::LiteracyPolicy;
use census_data::views::{ChartData, ChartKey, ChartView};
use log::info;

use crate::{load_dataset, open_output, OutputFormat};

/// Options for one `views` run.
#[derive(Debug, Clone)]
pub struct ViewsOptions {
    pub province: Option<String>,
    /// Empty means every chart
    pub charts: Vec<ChartKey>,
    pub top_n: usize,
    pub literacy: LiteracyPolicy,
    pub regional: bool,
    pub format: OutputFormat,
}

/// Build the dashboard frame for the given options.
pub fn render_frame(dataset: Rc<census_core::Dataset>, options: &ViewsOptions) -> Frame {
    let config = DashboardConfig {
        top_n: options.top_n,
        literacy: options.literacy,
        regional_scope: options.regional,
    };
    let mut dashboard = Dashboard::new(dataset, config);
    dashboard.explore();
    if let Some(province) = &options.province {
        dashboard.select_province(province.clone());
    }
    if options.charts.is_empty() {
        dashboard.render()
    } else {
        dashboard.render_charts(&options.charts)
    }
}

fn format_value(v: f64) -> String {
    format!("{:.2}", v)
}

fn render_chart_table(out: &mut String, chart: &ChartView) {
    let _ = writeln!(out, "== {} | {} ==", chart.key, chart.title);
    match &chart.data {
        ChartData::Bar(points) => {
            let _ = writeln!(out, "{:<28} {:<28} {:>16}", "District", "Province", chart.y_label);
            for p in points {
                let _ = writeln!(
                    out,
                    "{:<28} {:<28} {:>16}",
                    p.district,
                    p.province,
                    format_value(p.value)
                );
            }
        }
        ChartData::Scatter(points) => {
            let _ = writeln!(
                out,
                "{:<28} {:<28} {:>18} {:>28}",
                "District", "Province", chart.x_label, chart.y_label
            );
            for p in points {
                let _ = writeln!(
                    out,
                    "{:<28} {:<28} {:>18} {:>28}",
                    p.district,
                    p.province,
                    format_value(p.x),
                    format_value(p.y)
                );
            }
        }
    }
    if chart.data.is_empty() {
        let _ = writeln!(out, "(no eligible districts)");
    }
    if let Some(note) = chart.note {
        let _ = writeln!(out, "Note: {}", note);
    }
    out.push('\n');
}

/// Plain-text rendering of a frame, one table per chart.
pub fn render_table(frame: &Frame) -> String {
    let mut out = String::new();
    match frame {
        Frame::Welcome { title, description } => {
            let _ = writeln!(out, "{}\n\n{}", title, description);
        }
        Frame::Dashboard {
            title,
            provinces,
            province,
            literacy_source,
            charts,
        } => {
            let _ = writeln!(out, "{}", title);
            let _ = writeln!(out, "Provinces: {}", provinces.join(", "));
            let _ = writeln!(out, "Selected: {}", province.as_deref().unwrap_or("(none)"));
            let _ = writeln!(out, "Literacy source: {:?}\n", literacy_source);
            for chart in charts {
                render_chart_table(&mut out, chart);
            }
        }
    }
    out
}

/// Run the `views` command.
pub fn run_views(data: &Path, options: &ViewsOptions, output: Option<&Path>) -> anyhow::Result<()> {
    let dataset = Rc::new(load_dataset(data)?);
    let frame = render_frame(dataset, options);
    info!(
        "[census] views: rendering {} charts as {:?}",
        frame.charts().len(),
        options.format
    );
    let rendered = match options.format {
        OutputFormat::Json => serde_json::to_string_pretty(&frame)?,
        OutputFormat::Table => render_table(&frame),
    };
    let mut out = open_output(output)?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}
