//! In-memory SQLite store for the district census.
//!
//! The CLI loads the parsed dataset into this store once and answers
//! province-level questions (selector lists, aggregate summaries) with SQL.
//!
//! # Usage
//!
//! ```rust
//! use census_core::Dataset;
//! use census_db::Database;
//!
//! let dataset = Dataset::sample().unwrap();
//! let db = Database::new().unwrap();
//! db.load_districts(dataset.records()).unwrap();
//!
//! let provinces = db.query_provinces().unwrap();
//! assert_eq!(provinces[0].province, "Punjab");
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding district records.
///
/// Cheaply cloneable via `Rc`; clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
