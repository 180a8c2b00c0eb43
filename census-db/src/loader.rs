//! Loading parsed district records into the database.

use crate::Database;
use anyhow::Context;
use census_core::DistrictRecord;
use rusqlite::params;

fn as_sql_int(value: u64, column: &str, district: &str) -> anyhow::Result<i64> {
    i64::try_from(value)
        .with_context(|| format!("{} for district '{}' does not fit in SQLite", column, district))
}

impl Database {
    /// Insert records in order. Their position becomes the `ordinal` used to
    /// keep first-appearance ordering in queries.
    pub fn load_districts(&self, records: &[DistrictRecord]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let start: i64 = tx.query_row(
            "SELECT COALESCE(MAX(ordinal), -1) + 1 FROM districts",
            [],
            |row| row.get(0),
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO districts
                 (ordinal, province, district, population_2023, population_1998,
                  male, female, total_schools, density, literacy_rate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (offset, r) in (0i64..).zip(records) {
                stmt.execute(params![
                    start + offset,
                    r.province,
                    r.district,
                    as_sql_int(r.population_2023, "population_2023", &r.district)?,
                    as_sql_int(r.population_1998, "population_1998", &r.district)?,
                    as_sql_int(r.male, "male", &r.district)?,
                    as_sql_int(r.female, "female", &r.district)?,
                    as_sql_int(r.total_schools, "total_schools", &r.district)?,
                    r.density,
                    r.literacy_rate,
                ])
                .with_context(|| {
                    format!("failed to insert district '{}' ({})", r.district, r.province)
                })?;
            }
        }
        tx.commit()?;
        log::info!("[census] db: Loaded {} districts", records.len());
        Ok(())
    }
}
