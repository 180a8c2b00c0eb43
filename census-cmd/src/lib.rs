//! Command implementations for the census CLI.
//!
//! Provides subcommands for listing provinces, rendering dashboard chart
//! views, and summarizing provinces from a merged census CSV.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use census_core::Dataset;
use census_data::metrics::LiteracyPolicy;
use census_data::ranking::DEFAULT_TOP_N;
use census_data::views::ChartKey;
use clap::{Subcommand, ValueEnum};

pub mod summary;
pub mod views;

/// Literacy source selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LiteracyArg {
    /// Reported column when present, otherwise the schools-per-capita proxy
    Auto,
    /// Reported literacy_rate column only
    Reported,
    /// Always the schools-per-capita proxy
    Proxy,
}

impl From<LiteracyArg> for LiteracyPolicy {
    fn from(arg: LiteracyArg) -> Self {
        match arg {
            LiteracyArg::Auto => LiteracyPolicy::Auto,
            LiteracyArg::Reported => LiteracyPolicy::Reported,
            LiteracyArg::Proxy => LiteracyPolicy::SchoolsPerCapitaProxy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

fn parse_top_n(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("top-n must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List provinces in dataset order with their district counts
    Provinces {
        /// Path to the merged census CSV (optionally .gz)
        #[arg(short = 'd', long, env = "CENSUS_DATA")]
        data: PathBuf,
    },

    /// Render dashboard chart views for a province
    Views {
        /// Path to the merged census CSV (optionally .gz)
        #[arg(short = 'd', long, env = "CENSUS_DATA")]
        data: PathBuf,

        /// Province to select (defaults to the first province in the data)
        #[arg(short = 'p', long)]
        province: Option<String>,

        /// Only render these charts (repeatable or comma separated)
        #[arg(short = 'c', long = "chart", value_delimiter = ',')]
        charts: Vec<ChartKey>,

        /// Rows per ranked chart
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
        top_n: usize,

        /// Literacy source for literacy charts
        #[arg(long, value_enum, default_value_t = LiteracyArg::Auto)]
        literacy: LiteracyArg,

        /// Apply the province filter to every chart, not just growth
        #[arg(long)]
        regional: bool,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Per-province totals and ratios as CSV
    Summary {
        /// Path to the merged census CSV (optionally .gz)
        #[arg(short = 'd', long, env = "CENSUS_DATA")]
        data: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

/// Load the census dataset, naming the file in any error.
pub fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    Dataset::from_path(path)
        .with_context(|| format!("Failed to load census data from {}", path.display()))
}

/// Open the output destination: a file when given, stdout otherwise.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("Failed to create output file {}", p.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Provinces { data } => summary::run_provinces(&data),
        Command::Views {
            data,
            province,
            charts,
            top_n,
            literacy,
            regional,
            format,
            output,
        } => {
            let options = views::ViewsOptions {
                province,
                charts,
                top_n,
                literacy: literacy.into(),
                regional,
                format,
            };
            views::run_views(&data, &options, output.as_deref())
        }
        Command::Summary { data, output } => summary::run_summary(&data, output.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn parse_views_defaults() {
        let cli = TestCli::try_parse_from(["census", "views", "--data", "merged.csv"]).unwrap();
        match cli.command {
            Command::Views {
                data,
                province,
                charts,
                top_n,
                literacy,
                regional,
                format,
                output,
            } => {
                assert_eq!(data, PathBuf::from("merged.csv"));
                assert_eq!(province, None);
                assert!(charts.is_empty());
                assert_eq!(top_n, 10);
                assert_eq!(literacy, LiteracyArg::Auto);
                assert!(!regional);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(output, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_views_chart_list() {
        let cli = TestCli::try_parse_from([
            "census",
            "views",
            "-d",
            "merged.csv",
            "--chart",
            "growth,density",
            "-c",
            "male_skewed",
            "--literacy",
            "proxy",
            "--format",
            "table",
        ])
        .unwrap();
        let Command::Views {
            charts,
            literacy,
            format,
            ..
        } = cli.command
        else {
            panic!("expected views command");
        };
        assert_eq!(
            charts,
            vec![ChartKey::Growth, ChartKey::Density, ChartKey::MaleSkewed]
        );
        assert_eq!(LiteracyPolicy::from(literacy), LiteracyPolicy::SchoolsPerCapitaProxy);
        assert_eq!(format, OutputFormat::Table);
    }

    #[test]
    fn parse_rejects_unknown_chart_and_zero_top_n() {
        assert!(TestCli::try_parse_from(["census", "views", "-d", "x.csv", "-c", "pie"]).is_err());
        assert!(TestCli::try_parse_from(["census", "views", "-d", "x.csv", "-n", "0"]).is_err());
    }

    #[test]
    fn load_dataset_names_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/merged.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/merged.csv"));
    }
}
