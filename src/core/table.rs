//! Loosely typed tabular uploads and the cell parsers used to type them.

use crate::core::error::{DashboardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use tracing::debug;

/// Cell values treated as "no observation" rather than a parse failure.
/// Matched case-insensitively; a subset of pandas' default NA markers.
const MISSING_TOKENS: [&str; 8] = ["", "nan", "na", "n/a", "#n/a", "<na>", "null", "none"];

/// Offset-aware layouts, kept at their local wall-clock time.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%:z",
];
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// A CSV upload held as strings, with a header row naming every column.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(DashboardError::malformed("table has no columns"));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(DashboardError::malformed(format!(
                "row {} has {} fields, expected {}",
                i + 1,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Parses CSV text with a header row. Fields are trimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(String::is_empty) {
            return Err(DashboardError::malformed("file is empty or has no header row"));
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        debug!(columns = ?headers, rows = rows.len(), "Parsed CSV upload");

        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Raw cells of a named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Typed values of a named column. Missing tokens become `None`; any other
    /// non-numeric text fails with the offending row number.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let cells = self
            .column(name)
            .ok_or_else(|| DashboardError::malformed(format!("no column named '{name}'")))?;
        cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                parse_number(cell).map_err(|_| {
                    DashboardError::malformed(format!(
                        "non-numeric value '{cell}' in column '{name}' at row {}",
                        i + 1
                    ))
                })
            })
            .collect()
    }

    /// Whether every non-missing cell of the column parses as a number, with at
    /// least one value present.
    pub fn is_numeric_column(&self, name: &str) -> bool {
        match self.numeric_column(name) {
            Ok(values) => values.iter().any(Option::is_some),
            Err(_) => false,
        }
    }
}

pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

pub fn parse_number(cell: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    if is_missing(cell) {
        return Ok(None);
    }
    cell.trim().parse::<f64>().map(Some)
}

/// Parses the date formats commonly found in exported price tables.
/// Plain dates are placed at midnight. Timestamps with an offset keep their
/// local date and time so the axis matches what the upload shows.
pub fn parse_date(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(cell, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
