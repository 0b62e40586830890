use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use compdash::cli::wacc::WaccOverrides;
use compdash::core::log::init_logging;
use compdash::{AppCommand, StockArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct WaccFlags {
    /// Risk-free rate (%)
    #[arg(long, allow_negative_numbers = true)]
    rf: Option<f64>,
    /// Market risk premium (%)
    #[arg(long, allow_negative_numbers = true)]
    mrp: Option<f64>,
    /// Equity beta
    #[arg(long, allow_negative_numbers = true)]
    beta: Option<f64>,
    /// Pre-tax cost of debt (%)
    #[arg(long, allow_negative_numbers = true)]
    kd_pre: Option<f64>,
    /// Tax rate (%)
    #[arg(long, allow_negative_numbers = true)]
    tax: Option<f64>,
    /// Equity weight, E/V (%)
    #[arg(long, allow_negative_numbers = true)]
    equity_weight: Option<f64>,
    /// Debt weight, D/V (%)
    #[arg(long, allow_negative_numbers = true)]
    debt_weight: Option<f64>,
}

impl From<WaccFlags> for WaccOverrides {
    fn from(flags: WaccFlags) -> Self {
        WaccOverrides {
            risk_free_rate: flags.rf,
            market_risk_premium: flags.mrp,
            beta: flags.beta,
            pre_tax_cost_of_debt: flags.kd_pre,
            tax_rate: flags.tax,
            equity_weight: flags.equity_weight,
            debt_weight: flags.debt_weight,
        }
    }
}

#[derive(Args)]
struct StockFlags {
    /// CSV of prices already indexed to 100 (date + one column per ticker)
    #[arg(long)]
    prices: Option<PathBuf>,
    /// CSV of decimal daily returns (date + one column per ticker)
    #[arg(long)]
    returns: Option<PathBuf>,
    /// Primary ticker
    #[arg(short, long)]
    ticker: Option<String>,
    /// Competitor ticker, repeat up to three times
    #[arg(long = "competitor")]
    competitors: Vec<String>,
    /// Skip the chart if any requested ticker is missing
    #[arg(long)]
    strict: bool,
}

impl StockFlags {
    fn into_args(self, tail: Option<usize>, export: Option<PathBuf>, json: bool) -> StockArgs {
        StockArgs {
            prices: self.prices,
            returns: self.returns,
            ticker: self.ticker,
            competitors: self.competitors,
            strict: self.strict,
            tail,
            export,
            json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Compute cost of equity, after-tax cost of debt and WACC
    Wacc {
        #[command(flatten)]
        flags: WaccFlags,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare indexed stock performance against competitors
    Stock {
        #[command(flatten)]
        flags: StockFlags,
        /// Only show the last N rows
        #[arg(long)]
        tail: Option<usize>,
        /// Write the chart-ready indexed table to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Print the indexed series as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the latest headlines from a CSV with `date, headline` columns
    Headlines {
        file: Option<PathBuf>,
        /// Number of headlines to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a metrics table and the trend of one metric
    Metrics {
        file: Option<PathBuf>,
        /// X-axis column (defaults to the first column)
        #[arg(short)]
        x: Option<String>,
        /// Metric to plot (defaults to the first numeric column)
        #[arg(short)]
        y: Option<String>,
    },
    /// Ask about the charts or financials
    Ask { question: Vec<String> },
    /// Render every section at once
    Dashboard {
        /// Headlines CSV
        #[arg(long)]
        headlines: Option<PathBuf>,
        /// Metrics CSV
        #[arg(long)]
        metrics: Option<PathBuf>,
        #[command(flatten)]
        wacc: WaccFlags,
        #[command(flatten)]
        stock: StockFlags,
        /// Only show the last N stock rows
        #[arg(long)]
        tail: Option<usize>,
    },
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Wacc { flags, json } => AppCommand::Wacc {
                overrides: flags.into(),
                json,
            },
            Commands::Stock {
                flags,
                tail,
                export,
                json,
            } => AppCommand::Stock(flags.into_args(tail, export, json)),
            Commands::Headlines { file, limit } => AppCommand::Headlines { path: file, limit },
            Commands::Metrics { file, x, y } => AppCommand::Metrics { path: file, x, y },
            Commands::Ask { question } => AppCommand::Ask {
                question: question.join(" "),
            },
            Commands::Dashboard {
                headlines,
                metrics,
                wacc,
                stock,
                tail,
            } => AppCommand::Dashboard {
                headlines,
                metrics,
                wacc: wacc.into(),
                stock: stock.into_args(tail, None, false),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => compdash::cli::setup::setup(),
        Some(cmd) => compdash::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
