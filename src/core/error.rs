//! Errors reported by the dashboard sections.
//!
//! Every variant is recoverable: a failing section reports it and the rest of
//! the dashboard keeps rendering.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Expected a '{column}' column in the uploaded table")]
    MissingDateColumn { column: String },

    #[error("No matching ticker columns found (requested: {})", .requested.join(", "))]
    NoMatchingColumns { requested: Vec<String> },

    #[error("Missing columns in data: {}", .missing.join(", "))]
    PartialColumnMismatch { missing: Vec<String> },

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
}

impl DashboardError {
    pub fn malformed(message: impl Into<String>) -> Self {
        DashboardError::MalformedUpload(message.into())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        DashboardError::MalformedUpload(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_list_the_offending_columns() {
        let err = DashboardError::PartialColumnMismatch {
            missing: vec!["RTX".to_string(), "GD".to_string()],
        };
        assert_eq!(err.to_string(), "Missing columns in data: RTX, GD");

        let err = DashboardError::MissingDateColumn {
            column: "date".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Expected a 'date' column in the uploaded table"
        );
    }
}
