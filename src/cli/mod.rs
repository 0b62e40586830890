//! Terminal rendering for each dashboard section.

pub mod ask;
pub mod dashboard;
pub mod headlines;
pub mod metrics;
pub mod setup;
pub mod stock;
pub mod ui;
pub mod wacc;

use crate::core::DataTable;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

/// Opens and parses an uploaded CSV file.
pub fn load_table(path: &Path) -> Result<DataTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open upload: {}", path.display()))?;
    DataTable::from_reader(file).with_context(|| format!("Failed to read {}", path.display()))
}
