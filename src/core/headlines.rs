//! Headline list for the dashboard's news panel.

use crate::core::error::{DashboardError, Result};
use crate::core::table::{DataTable, parse_date};
use serde::Serialize;
use std::cmp::Reverse;

pub const DEFAULT_HEADLINE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub date: String,
    pub headline: String,
}

/// Most recent `limit` headlines, newest first.
///
/// Dates are compared chronologically when every row parses as a date and
/// as plain text otherwise. Ties keep upload order.
pub fn latest_headlines(table: &DataTable, limit: usize) -> Result<Vec<Headline>> {
    let (Some(dates), Some(texts)) = (table.column("date"), table.column("headline")) else {
        return Err(DashboardError::malformed("Expected columns: date, headline"));
    };

    let mut headlines: Vec<Headline> = dates
        .into_iter()
        .zip(texts)
        .map(|(date, headline)| Headline {
            date: date.to_string(),
            headline: headline.to_string(),
        })
        .collect();

    let parsed: Option<Vec<_>> = headlines.iter().map(|h| parse_date(&h.date)).collect();
    match parsed {
        Some(keys) => {
            let mut keyed: Vec<_> = keys.into_iter().zip(headlines).collect();
            keyed.sort_by_key(|(key, _)| Reverse(*key));
            headlines = keyed.into_iter().map(|(_, h)| h).collect();
        }
        None => headlines.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    headlines.truncate(limit);
    Ok(headlines)
}
