//! Province-level commands backed by the in-memory SQLite store.

use std::io::Write;
use std::path::Path;

use census_core::Dataset;
use census_db::models::{ProvinceInfo, ProvinceSummary};
use census_db::Database;
use log::info;

use crate::{load_dataset, open_output};

fn load_database(dataset: &Dataset) -> anyhow::Result<Database> {
    let db = Database::new()?;
    db.load_districts(dataset.records())?;
    Ok(db)
}

/// Province list with district counts.
pub fn province_list(dataset: &Dataset) -> anyhow::Result<Vec<ProvinceInfo>> {
    load_database(dataset)?.query_provinces()
}

/// Per-province aggregates.
pub fn province_summaries(dataset: &Dataset) -> anyhow::Result<Vec<ProvinceSummary>> {
    load_database(dataset)?.query_province_summaries()
}

/// Write summaries as CSV with a header row. Undefined ratios are blank.
pub fn write_summaries<W: Write>(writer: W, summaries: &[ProvinceSummary]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Run the `provinces` command.
pub fn run_provinces(data: &Path) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let provinces = province_list(&dataset)?;
    let mut out = open_output(None)?;
    for p in &provinces {
        writeln!(out, "{}\t{}", p.province, p.districts)?;
    }
    out.flush()?;
    info!("[census] provinces: listed {} provinces", provinces.len());
    Ok(())
}

/// Run the `summary` command.
pub fn run_summary(data: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let dataset = load_dataset(data)?;
    let summaries = province_summaries(&dataset)?;
    write_summaries(open_output(output)?, &summaries)?;
    info!("[census] summary: wrote {} provinces", summaries.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn province_list_matches_dataset_order() {
        let dataset = Dataset::sample().unwrap();
        let provinces = province_list(&dataset).unwrap();
        let names: Vec<&str> = provinces.iter().map(|p| p.province.as_str()).collect();
        assert_eq!(names, dataset.provinces());
    }

    #[test]
    fn summaries_csv_has_header_and_rows() {
        let dataset = Dataset::sample().unwrap();
        let summaries = province_summaries(&dataset).unwrap();
        let mut buf = Vec::new();
        write_summaries(&mut buf, &summaries).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "province,districts,population_2023,population_1998,growth_pct,total_schools,people_per_school"
        );
        assert_eq!(lines.count(), 5);
        assert!(text.contains("\nPunjab,3,28198865,15112203,"));
    }

    #[test]
    fn summaries_csv_leaves_undefined_ratios_blank() {
        let csv_data = "province,district,population_2023,population 1998,male,female,total_schools,density\n\
P,New,1000,0,500,500,0,12.5\n";
        let dataset = Dataset::from_csv_str(csv_data).unwrap();
        let mut buf = Vec::new();
        write_summaries(&mut buf, &province_summaries(&dataset).unwrap()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("P,1,1000,0,,0,\n"));
    }
}
