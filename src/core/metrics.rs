//! Generic trend view over an uploaded metrics table (Year, Revenue, EBITDA...).

use crate::core::error::{DashboardError, Result};
use crate::core::table::DataTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub x: String,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTrend {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<MetricPoint>,
    pub summary: Option<MetricSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    /// Percent change from first to last, absent when the first value is zero.
    pub change: Option<f64>,
}

pub fn numeric_columns(table: &DataTable) -> Vec<String> {
    table
        .headers()
        .iter()
        .filter(|h| table.is_numeric_column(h))
        .cloned()
        .collect()
}

/// Plots `y` against `x`. Defaults: the first column for `x`, the first
/// numeric column for `y`. Returns `Ok(None)` when the table has no numeric
/// column to plot.
pub fn metric_trend(
    table: &DataTable,
    x: Option<&str>,
    y: Option<&str>,
) -> Result<Option<MetricTrend>> {
    let numeric = numeric_columns(table);
    let y_column = match y {
        Some(y) if !table.has_column(y) => {
            return Err(DashboardError::malformed(format!("no column named '{y}'")));
        }
        Some(y) if !numeric.iter().any(|c| c == y) => {
            return Err(DashboardError::malformed(format!(
                "column '{y}' is not numeric"
            )));
        }
        Some(y) => y.to_string(),
        None => match numeric.first() {
            Some(first) => first.clone(),
            None => return Ok(None),
        },
    };

    let x_column = match x {
        Some(x) if !table.has_column(x) => {
            return Err(DashboardError::malformed(format!("no column named '{x}'")));
        }
        Some(x) => x.to_string(),
        None => table.headers()[0].clone(),
    };

    let xs = table.column(&x_column).unwrap_or_default();
    let ys = table.numeric_column(&y_column)?;
    let points: Vec<MetricPoint> = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| MetricPoint {
            x: x.to_string(),
            y,
        })
        .collect();

    let summary = summarize(points.iter().filter_map(|p| p.y));

    Ok(Some(MetricTrend {
        x_column,
        y_column,
        points,
        summary,
    }))
}

fn summarize(values: impl Iterator<Item = f64>) -> Option<MetricSummary> {
    let values: Vec<f64> = values.collect();
    let first = *values.first()?;
    let last = *values.last()?;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let change = (first != 0.0).then(|| (last / first - 1.0) * 100.0);
    Some(MetricSummary {
        first,
        last,
        min,
        max,
        change,
    })
}
