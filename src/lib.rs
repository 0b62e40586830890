pub mod cli;
pub mod core;

use crate::cli::dashboard::DashboardRequest;
use crate::cli::stock::StockRequest;
use crate::cli::wacc::WaccOverrides;
use crate::core::TickerSelection;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Uploads and ticker choices for the stock section, before config defaults
/// are applied.
#[derive(Debug, Clone, Default)]
pub struct StockArgs {
    pub prices: Option<PathBuf>,
    pub returns: Option<PathBuf>,
    pub ticker: Option<String>,
    /// Empty means "use the configured competitors".
    pub competitors: Vec<String>,
    pub strict: bool,
    pub tail: Option<usize>,
    pub export: Option<PathBuf>,
    pub json: bool,
}

impl StockArgs {
    fn into_request(self, config: &AppConfig) -> StockRequest {
        let mut selection = config.ticker_selection();
        if let Some(ticker) = self.ticker {
            selection = TickerSelection::new(ticker, selection.competitors);
        }
        if !self.competitors.is_empty() {
            selection.competitors = self.competitors;
        }
        StockRequest {
            prices: self.prices,
            returns: self.returns,
            selection,
            date_column: config.date_column.clone(),
            strict: self.strict || config.strict_columns,
            tail: self.tail,
            export: self.export,
            as_json: self.json,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    Wacc {
        overrides: WaccOverrides,
        json: bool,
    },
    Stock(StockArgs),
    Headlines {
        path: Option<PathBuf>,
        limit: Option<usize>,
    },
    Metrics {
        path: Option<PathBuf>,
        x: Option<String>,
        y: Option<String>,
    },
    Ask {
        question: String,
    },
    Dashboard {
        headlines: Option<PathBuf>,
        metrics: Option<PathBuf>,
        wacc: WaccOverrides,
        stock: StockArgs,
    },
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Company dashboard starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Wacc { overrides, json } => {
            let inputs = overrides.apply(&config.wacc);
            println!("{}", cli::wacc::render(&inputs, json)?);
        }
        AppCommand::Stock(args) => {
            let request = args.into_request(&config);
            println!("{}", cli::stock::render(&request)?);
        }
        AppCommand::Headlines { path, limit } => {
            let limit = limit.unwrap_or(config.headlines_limit);
            println!("{}", cli::headlines::render(path.as_deref(), limit)?);
        }
        AppCommand::Metrics { path, x, y } => {
            println!(
                "{}",
                cli::metrics::render(path.as_deref(), x.as_deref(), y.as_deref())?
            );
        }
        AppCommand::Ask { question } => {
            println!("{}", cli::ask::render(&question));
        }
        AppCommand::Dashboard {
            headlines,
            metrics,
            wacc,
            stock,
        } => {
            let request = DashboardRequest {
                headlines,
                headlines_limit: config.headlines_limit,
                metrics,
                wacc: wacc.apply(&config.wacc),
                stock: stock.into_request(&config),
            };
            cli::dashboard::run(&request)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_args_fall_back_to_config() {
        let config = AppConfig::default();
        let request = StockArgs::default().into_request(&config);
        assert_eq!(
            request.selection.requested_columns(),
            vec!["LMT", "NOC", "RTX", "GD"]
        );
        assert!(!request.strict);
        assert_eq!(request.date_column, "date");
    }

    #[test]
    fn stock_args_override_config() {
        let config = AppConfig {
            strict_columns: true,
            ..Default::default()
        };
        let args = StockArgs {
            ticker: Some("NOC".to_string()),
            competitors: vec!["LMT".to_string()],
            ..Default::default()
        };
        let request = args.into_request(&config);
        assert_eq!(request.selection.requested_columns(), vec!["NOC", "LMT"]);
        assert!(request.strict);
    }
}
