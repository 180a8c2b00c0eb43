//! The loaded census dataset.
//!
//! A `Dataset` is built once at startup and never mutated afterwards. Views
//! borrow from it and compute their own derived values.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use log::{info, warn};

use crate::columns::ColumnIndex;
use crate::district::{DistrictRecord, SAMPLE_CSV};
use crate::error::{CensusError, Result};

/// Immutable collection of district records in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<DistrictRecord>,
    /// True when at least one record carries a reported literacy value
    reported_literacy: bool,
}

impl Dataset {
    /// Build a dataset from records already in memory.
    ///
    /// Rejects duplicate (province, district) pairs. Reported literacy is
    /// considered present when any record carries a value.
    pub fn from_records(records: Vec<DistrictRecord>) -> Result<Self> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for (i, r) in records.iter().enumerate() {
            if !seen.insert((r.province.as_str(), r.district.as_str())) {
                return Err(CensusError::DuplicateDistrict {
                    line: i as u64 + 1,
                    province: r.province.clone(),
                    district: r.district.clone(),
                });
            }
        }
        Ok(Self::new(records))
    }

    fn new(records: Vec<DistrictRecord>) -> Self {
        let reported_literacy = records.iter().any(|r| r.literacy_rate.is_some());
        Self {
            records,
            reported_literacy,
        }
    }

    /// Parse a merged census CSV from any reader.
    ///
    /// Expected columns (any order, header spelling normalized):
    /// province, district, population_2023, population 1998, male, female,
    /// total_schools, density*, and optionally literacy_rate. Rows with
    /// fewer cells than the header are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?;
        let width = headers.len();
        let index = ColumnIndex::resolve(headers)?;

        let mut records = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for (i, row) in rdr.records().enumerate() {
            let row = row?;
            let line = row.position().map_or(i as u64 + 2, |p| p.line());
            if row.len() < width {
                return Err(CensusError::ShortRow {
                    line,
                    expected: width,
                    found: row.len(),
                });
            }
            let record = DistrictRecord::from_row(&row, &index, line)?;
            if !seen.insert((record.province.clone(), record.district.clone())) {
                return Err(CensusError::DuplicateDistrict {
                    line,
                    province: record.province,
                    district: record.district,
                });
            }
            records.push(record);
        }

        if records.is_empty() {
            warn!("[census] loader: dataset has a header but no district rows");
        }
        let dataset = Self::new(records);
        if index.has_literacy_rate() && !dataset.has_reported_literacy() {
            warn!("[census] loader: literacy_rate column is present but every cell is blank");
        }
        info!(
            "[census] loader: Loaded {} districts (reported literacy: {})",
            dataset.len(),
            dataset.has_reported_literacy()
        );
        Ok(dataset)
    }

    /// Parse a merged census CSV held in a string.
    pub fn from_csv_str(csv_data: &str) -> Result<Self> {
        Self::from_reader(csv_data.as_bytes())
    }

    /// Load a census CSV from disk. Files ending in `.gz` are decompressed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);
        let gzipped = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        info!(
            "[census] loader: Reading {} (gzip: {})",
            path.display(),
            gzipped
        );
        if gzipped {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
    }

    /// The embedded sample dataset.
    pub fn sample() -> Result<Self> {
        Self::from_csv_str(SAMPLE_CSV)
    }

    pub fn records(&self) -> &[DistrictRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_reported_literacy(&self) -> bool {
        self.reported_literacy
    }

    /// Distinct provinces in order of first appearance.
    pub fn provinces(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.province.as_str())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Records of one province, in source order. Unknown provinces yield
    /// an empty list.
    pub fn in_province(&self, province: &str) -> Vec<&DistrictRecord> {
        self.records
            .iter()
            .filter(|r| r.province == province)
            .collect()
    }
}
