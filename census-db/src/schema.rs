//! SQL schema for the in-memory census database.

/// Returns the full SQL schema as a single batch string.
///
/// `ordinal` preserves the source row order so queries can return districts
/// and provinces in first-appearance order.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS districts (
        ordinal INTEGER PRIMARY KEY,
        province TEXT NOT NULL,
        district TEXT NOT NULL,
        population_2023 INTEGER NOT NULL,
        population_1998 INTEGER NOT NULL,
        male INTEGER NOT NULL,
        female INTEGER NOT NULL,
        total_schools INTEGER NOT NULL,
        density REAL,
        literacy_rate REAL,
        UNIQUE (province, district)
    );
    CREATE INDEX IF NOT EXISTS idx_districts_province ON districts(province);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_table_and_index() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for (kind, name) in [("table", "districts"), ("index", "idx_districts_province")] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                    [kind, name],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} '{}' should exist", kind, name);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
