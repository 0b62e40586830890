use compdash::cli::wacc::WaccOverrides;
use compdash::{AppCommand, StockArgs};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use super::*;

    pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    pub fn write_config(dir: &Path) -> PathBuf {
        write_file(
            dir,
            "config.yaml",
            r#"
ticker: "LMT"
competitors: ["NOC", "RTX", "GD"]
wacc:
  risk_free_rate: 4.0
  beta: 0.75
date_column: "date"
"#,
        )
    }
}

fn run(command: AppCommand, config: &Path) -> anyhow::Result<()> {
    compdash::run_command(command, Some(config.to_str().expect("Non UTF-8 temp path")))
}

#[test_log::test]
fn test_wacc_with_overrides() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_config(dir.path());

    let command = AppCommand::Wacc {
        overrides: WaccOverrides {
            equity_weight: Some(0.0),
            debt_weight: Some(0.0),
            ..Default::default()
        },
        json: true,
    };
    let result = run(command, &config);
    assert!(result.is_ok(), "WACC failed with: {:?}", result.err());
}

#[test_log::test]
fn test_returns_upload_is_indexed_and_exported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_config(dir.path());
    let returns = test_utils::write_file(
        dir.path(),
        "returns.csv",
        "date,LMT,NOC,RTX,GD\n\
         2024-01-03,-0.05,0.01,,0.0\n\
         2024-01-01,0.0,0.0,0.0,0.0\n\
         2024-01-02,0.10,-0.02,0.03,0.0\n",
    );
    let export = dir.path().join("indexed.csv");

    let args = StockArgs {
        returns: Some(returns),
        export: Some(export.clone()),
        ..Default::default()
    };
    let result = run(AppCommand::Stock(args), &config);
    assert!(result.is_ok(), "Stock failed with: {:?}", result.err());

    let exported = fs::read_to_string(&export).expect("Export missing");
    info!(%exported, "Exported series");
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines[0], "date,LMT,NOC,RTX,GD");
    assert_eq!(lines[1], "2024-01-01,100,100,100,100");
    assert!(lines[3].starts_with("2024-01-03,104.5"));
    assert!(lines[3].ends_with(",100"));
}

#[test_log::test]
fn test_partial_match_still_succeeds_unless_strict() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_config(dir.path());
    let prices = test_utils::write_file(
        dir.path(),
        "prices.csv",
        "date,LMT,NOC\n2024-01-01,100,100\n2024-01-02,101.2,99.4\n",
    );

    let args = StockArgs {
        prices: Some(prices.clone()),
        ..Default::default()
    };
    assert!(run(AppCommand::Stock(args), &config).is_ok());

    let strict = StockArgs {
        prices: Some(prices),
        strict: true,
        ..Default::default()
    };
    let err = run(AppCommand::Stock(strict), &config).unwrap_err();
    assert!(err.to_string().contains("RTX, GD"));
}

#[test_log::test]
fn test_stock_errors_are_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_config(dir.path());

    let no_date = test_utils::write_file(dir.path(), "no_date.csv", "day,LMT\n1,100\n");
    let err = run(
        AppCommand::Stock(StockArgs {
            prices: Some(no_date),
            ..Default::default()
        }),
        &config,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Expected a 'date' column"));

    let other = test_utils::write_file(dir.path(), "other.csv", "date,AAPL\n2024-01-01,0.01\n");
    let err = run(
        AppCommand::Stock(StockArgs {
            returns: Some(other),
            ..Default::default()
        }),
        &config,
    )
    .unwrap_err();
    assert!(err.to_string().contains("No matching ticker columns"));
}

#[test_log::test]
fn test_dashboard_survives_broken_uploads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_config(dir.path());
    let headlines = test_utils::write_file(dir.path(), "headlines.csv", "date\n2024-01-01\n");
    let metrics = test_utils::write_file(
        dir.path(),
        "metrics.csv",
        "Year,Revenue,EBITDA\n2022,65.98,9.1\n2023,67.57,9.5\n",
    );
    let prices = test_utils::write_file(dir.path(), "prices.csv", "LMT\n100\n");

    let command = AppCommand::Dashboard {
        headlines: Some(headlines),
        metrics: Some(metrics),
        wacc: WaccOverrides::default(),
        stock: StockArgs {
            prices: Some(prices),
            ..Default::default()
        },
    };
    let result = run(command, &config);
    assert!(result.is_ok(), "Dashboard failed with: {:?}", result.err());
}

#[test_log::test]
fn test_headlines_metrics_and_ask() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_config(dir.path());
    let headlines = test_utils::write_file(
        dir.path(),
        "headlines.csv",
        "date,headline\n2024-04-23,Q1 results\n2024-01-23,Q4 results\n",
    );
    let metrics = test_utils::write_file(dir.path(), "metrics.csv", "Year,EPS\n2022,21.66\n2023,27.55\n");

    assert!(
        run(
            AppCommand::Headlines {
                path: Some(headlines),
                limit: Some(1),
            },
            &config,
        )
        .is_ok()
    );
    assert!(
        run(
            AppCommand::Metrics {
                path: Some(metrics),
                x: None,
                y: Some("EPS".to_string()),
            },
            &config,
        )
        .is_ok()
    );
    assert!(
        run(
            AppCommand::Ask {
                question: "What changes most if WACC rises by 100 bps?".to_string(),
            },
            &config,
        )
        .is_ok()
    );
}

#[test_log::test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_utils::write_file(dir.path(), "config.yaml", "ticker: [unclosed\n");

    let err = run(
        AppCommand::Ask {
            question: String::new(),
        },
        &config,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
