//! Typed query methods over the districts table.
//!
//! Every query orders by `ordinal` (or the first ordinal of a province) so
//! results follow the source file's order.

use crate::models::{ProvinceInfo, ProvinceSummary};
use crate::Database;
use census_core::DistrictRecord;
use rusqlite::{params, Row};

fn count(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}

fn district_from_row(row: &Row<'_>) -> rusqlite::Result<DistrictRecord> {
    Ok(DistrictRecord {
        province: row.get(0)?,
        district: row.get(1)?,
        population_2023: count(row, 2)?,
        population_1998: count(row, 3)?,
        male: count(row, 4)?,
        female: count(row, 5)?,
        total_schools: count(row, 6)?,
        density: row.get(7)?,
        literacy_rate: row.get(8)?,
    })
}

const DISTRICT_COLUMNS: &str = "province, district, population_2023, population_1998, \
     male, female, total_schools, density, literacy_rate";

impl Database {
    /// Districts in source order, optionally restricted to one province.
    ///
    /// An unknown province returns an empty list.
    pub fn query_districts(&self, province: Option<&str>) -> anyhow::Result<Vec<DistrictRecord>> {
        let conn = self.conn.borrow();
        let rows = match province {
            Some(p) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {DISTRICT_COLUMNS} FROM districts WHERE province = ?1 ORDER BY ordinal"
                ))?;
                let rows = stmt
                    .query_map(params![p], district_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {DISTRICT_COLUMNS} FROM districts ORDER BY ordinal"
                ))?;
                let rows = stmt
                    .query_map([], district_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        log::info!(
            "[census] db: query_districts({}) returned {} records",
            province.unwrap_or("*"),
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct provinces in first-appearance order with district counts.
    pub fn query_provinces(&self) -> anyhow::Result<Vec<ProvinceInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT province, COUNT(*)
             FROM districts
             GROUP BY province
             ORDER BY MIN(ordinal)",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ProvinceInfo {
                    province: row.get(0)?,
                    districts: count(row, 1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[census] db: query_provinces returned {} provinces",
            rows.len()
        );
        Ok(rows)
    }

    /// Per-province aggregates in first-appearance order.
    pub fn query_province_summaries(&self) -> anyhow::Result<Vec<ProvinceSummary>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT province,
                    COUNT(*),
                    SUM(population_2023),
                    SUM(population_1998),
                    100.0 * (SUM(CASE WHEN population_1998 > 0 THEN population_2023 ELSE 0 END)
                             - SUM(population_1998))
                          / NULLIF(SUM(population_1998), 0),
                    SUM(total_schools),
                    1.0 * SUM(CASE WHEN total_schools > 0 THEN population_2023 ELSE 0 END)
                        / NULLIF(SUM(total_schools), 0)
             FROM districts
             GROUP BY province
             ORDER BY MIN(ordinal)",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ProvinceSummary {
                    province: row.get(0)?,
                    districts: count(row, 1)?,
                    population_2023: count(row, 2)?,
                    population_1998: count(row, 3)?,
                    growth_pct: row.get(4)?,
                    total_schools: count(row, 5)?,
                    people_per_school: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[census] db: query_province_summaries returned {} records",
            rows.len()
        );
        Ok(rows)
    }
}
