//! Dashboard computations and their supporting configuration.

pub mod ask;
pub mod config;
pub mod error;
pub mod headlines;
pub mod log;
pub mod metrics;
pub mod series;
pub mod table;
pub mod wacc;

// Re-export main types for cleaner imports
pub use error::DashboardError;
pub use series::{IndexMode, IndexedSeries, SeriesUpload, TickerSelection, TimeSeriesTable};
pub use table::DataTable;
pub use wacc::{CapitalStructureInputs, WaccResult, compute_wacc};
