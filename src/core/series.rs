//! Date-aligned ticker series indexed to a common base, ready for a
//! multi-line chart.

use crate::core::error::{DashboardError, Result};
use crate::core::table::{DataTable, parse_date};
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, warn};

/// Value every indexed series starts from.
pub const INDEX_BASE: f64 = 100.0;
pub const MAX_COMPETITORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexMode {
    /// Values are already based at 100 and pass through unchanged.
    AlreadyIndexed,
    /// Values are decimal daily returns to be compounded from the base.
    RawReturns,
}

/// What the user supplied for the stock chart.
#[derive(Debug, Clone)]
pub enum SeriesUpload {
    NoUpload,
    AlreadyIndexed(DataTable),
    RawReturns(DataTable),
}

impl SeriesUpload {
    /// Indexed prices win when both tables are supplied.
    pub fn resolve(prices: Option<DataTable>, returns: Option<DataTable>) -> Self {
        match (prices, returns) {
            (Some(table), _) => SeriesUpload::AlreadyIndexed(table),
            (None, Some(table)) => SeriesUpload::RawReturns(table),
            (None, None) => SeriesUpload::NoUpload,
        }
    }

    /// `None` for [`SeriesUpload::NoUpload`]; the caller shows its empty state.
    pub fn build(
        &self,
        date_column: &str,
        requested: &[String],
    ) -> Option<Result<IndexedSeries>> {
        match self {
            SeriesUpload::NoUpload => None,
            SeriesUpload::AlreadyIndexed(table) => Some(build_indexed_series(
                table,
                date_column,
                requested,
                IndexMode::AlreadyIndexed,
            )),
            SeriesUpload::RawReturns(table) => Some(build_indexed_series(
                table,
                date_column,
                requested,
                IndexMode::RawReturns,
            )),
        }
    }
}

/// Primary ticker plus competitors, each expected to name an upload column.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSelection {
    pub primary: String,
    pub competitors: Vec<String>,
}

impl TickerSelection {
    pub fn new(primary: impl Into<String>, competitors: Vec<String>) -> Self {
        Self {
            primary: primary.into(),
            competitors,
        }
    }

    /// The primary ticker followed by up to three non-blank competitors,
    /// skipping any competitor equal to the primary. Names are matched as
    /// given, without case or whitespace normalization.
    pub fn requested_columns(&self) -> Vec<String> {
        let competitors = self
            .competitors
            .iter()
            .filter(|c| !c.trim().is_empty())
            .take(MAX_COMPETITORS)
            .filter(|c| **c != self.primary)
            .cloned();
        std::iter::once(self.primary.clone())
            .chain(competitors)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn first_value(&self) -> Option<f64> {
        self.values.iter().flatten().next().copied()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.iter().rev().flatten().next().copied()
    }

    /// Percent change from the first to the last observation.
    pub fn total_change(&self) -> Option<f64> {
        match (self.first_value(), self.last_value()) {
            (Some(first), Some(last)) if first != 0.0 => Some((last / first - 1.0) * 100.0),
            _ => None,
        }
    }
}

/// Rows ascending by date; every series shares the same date axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesTable {
    pub dates: Vec<NaiveDateTime>,
    pub series: Vec<Series>,
}

impl TimeSeriesTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Writes `date,<ticker>...` rows. Gaps are written as empty cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["date".to_string()];
        header.extend(self.series.iter().map(|s| s.name.clone()));
        wtr.write_record(&header)?;

        for (row, date) in self.dates.iter().enumerate() {
            let mut record = vec![format_date(date)];
            record.extend(
                self.series
                    .iter()
                    .map(|s| s.values[row].map_or(String::new(), |v| v.to_string())),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Outcome of indexing: the chart-ready table plus which requested tickers
/// were absent from the upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedSeries {
    pub mode: IndexMode,
    pub table: TimeSeriesTable,
    pub found: Vec<String>,
    pub missing: Vec<String>,
}

impl IndexedSeries {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// The partial-match warning, if any requested ticker was not found.
    pub fn mismatch(&self) -> Option<DashboardError> {
        (!self.is_complete()).then(|| DashboardError::PartialColumnMismatch {
            missing: self.missing.clone(),
        })
    }

    /// Turns a partial match into an error, for callers that refuse to chart
    /// a subset.
    pub fn strict(self) -> Result<Self> {
        match self.mismatch() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

pub fn build_indexed_series(
    table: &DataTable,
    date_column: &str,
    requested: &[String],
    mode: IndexMode,
) -> Result<IndexedSeries> {
    let date_cells = table
        .column(date_column)
        .ok_or_else(|| DashboardError::MissingDateColumn {
            column: date_column.to_string(),
        })?;

    let dates = date_cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            parse_date(cell).ok_or_else(|| {
                DashboardError::malformed(format!("unparseable date '{cell}' at row {}", i + 1))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Stable, so rows sharing a date keep their upload order.
    let mut order: Vec<usize> = (0..dates.len()).collect();
    order.sort_by_key(|&i| dates[i]);

    let (found, missing): (Vec<String>, Vec<String>) = requested
        .iter()
        .cloned()
        .partition(|name| name != date_column && table.has_column(name));

    if found.is_empty() {
        return Err(DashboardError::NoMatchingColumns {
            requested: requested.to_vec(),
        });
    }
    if !missing.is_empty() {
        warn!(?missing, "Some requested tickers are not in the upload");
    }
    debug!(?found, ?mode, rows = dates.len(), "Building indexed series");

    let mut series = Vec::with_capacity(found.len());
    for name in &found {
        let raw = table.numeric_column(name)?;
        let sorted: Vec<Option<f64>> = order.iter().map(|&i| raw[i]).collect();
        let values = match mode {
            IndexMode::AlreadyIndexed => sorted,
            IndexMode::RawReturns => index_returns(&sorted).into_iter().map(Some).collect(),
        };
        series.push(Series {
            name: name.clone(),
            values,
        });
    }

    Ok(IndexedSeries {
        mode,
        table: TimeSeriesTable {
            dates: order.iter().map(|&i| dates[i]).collect(),
            series,
        },
        found,
        missing,
    })
}

/// `100 * prod(1 + r)` over the sequence, with missing returns counted as 0.
pub fn index_returns(returns: &[Option<f64>]) -> Vec<f64> {
    returns
        .iter()
        .scan(INDEX_BASE, |level, r| {
            *level *= 1.0 + r.unwrap_or(0.0);
            Some(*level)
        })
        .collect()
}

pub fn format_date(date: &NaiveDateTime) -> String {
    if date.num_seconds_from_midnight() == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
