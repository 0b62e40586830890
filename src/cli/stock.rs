use super::{load_table, ui};
use crate::core::series::{IndexMode, IndexedSeries, format_date};
use crate::core::{SeriesUpload, TickerSelection};
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything the stock section needs for one render.
#[derive(Debug, Clone)]
pub struct StockRequest {
    pub prices: Option<PathBuf>,
    pub returns: Option<PathBuf>,
    pub selection: TickerSelection,
    pub date_column: String,
    pub strict: bool,
    /// Only show the most recent rows in the terminal table.
    pub tail: Option<usize>,
    pub export: Option<PathBuf>,
    pub as_json: bool,
}

pub fn render(request: &StockRequest) -> Result<String> {
    let prices = request.prices.as_deref().map(load_table).transpose()?;
    let returns = request.returns.as_deref().map(load_table).transpose()?;
    let upload = SeriesUpload::resolve(prices, returns);

    let requested = request.selection.requested_columns();
    debug!(?requested, "Resolved ticker selection");

    let mut output = ui::section_header(
        "Stock",
        "Upload an indexed price table or daily returns to compare relative performance.",
    );

    let Some(built) = upload.build(&request.date_column, &requested) else {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text(
                "Upload either indexed prices or returns to see the multi-line chart.",
                ui::StyleType::Subtle
            )
        ));
        return Ok(output);
    };

    let mut series = built?;
    if request.strict {
        series = series.strict()?;
    }

    if let Some(path) = &request.export {
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        series
            .table
            .write_csv(file)
            .with_context(|| format!("Failed to write export: {}", path.display()))?;
        info!("Exported indexed series to {}", path.display());
    }

    if request.as_json {
        return Ok(serde_json::to_string_pretty(&series)?);
    }

    output.push_str(&format!("\n{}\n", display_series(&series, request.tail)));
    output.push_str(&format!("\n{}\n", display_performance(&series)));
    if let Some(warning) = series.mismatch() {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text(&warning.to_string(), ui::StyleType::Warning)
        ));
    }
    if let Some(path) = &request.export {
        output.push_str(&format!("\nSaved chart data to {}\n", path.display()));
    }
    Ok(output)
}

fn display_series(series: &IndexedSeries, tail: Option<usize>) -> String {
    let title = match series.mode {
        IndexMode::AlreadyIndexed => "Indexed Price (Start=100)",
        IndexMode::RawReturns => "Indexed Price (Start=100, from daily returns)",
    };

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Date")];
    header.extend(series.table.series.iter().map(|s| ui::header_cell(&s.name)));
    table.set_header(header);

    let rows = series.table.len();
    let start = tail.map_or(0, |n| rows.saturating_sub(n));
    for row in start..rows {
        let mut cells = vec![Cell::new(format_date(&series.table.dates[row]))];
        cells.extend(
            series
                .table
                .series
                .iter()
                .map(|s| ui::format_optional_cell(s.values[row], |v| format!("{v:.2}"))),
        );
        table.add_row(cells);
    }

    format!("{}\n{table}", ui::style_text(title, ui::StyleType::Label))
}

fn display_performance(series: &IndexedSeries) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Start"),
        ui::header_cell("End"),
        ui::header_cell("Change"),
    ]);

    for s in &series.table.series {
        table.add_row(vec![
            Cell::new(&s.name),
            ui::format_optional_cell(s.first_value(), |v| format!("{v:.2}")),
            ui::format_optional_cell(s.last_value(), |v| format!("{v:.2}")),
            s.total_change()
                .map_or_else(|| ui::na_cell(false), ui::change_cell),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn request(dir: &TempDir) -> StockRequest {
        StockRequest {
            prices: None,
            returns: None,
            selection: TickerSelection::new(
                "LMT",
                vec!["NOC".to_string(), "RTX".to_string(), "GD".to_string()],
            ),
            date_column: "date".to_string(),
            strict: false,
            tail: None,
            export: Some(dir.path().join("indexed.csv")),
            as_json: false,
        }
    }

    #[test]
    fn no_upload_shows_empty_state() {
        let dir = TempDir::new().unwrap();
        let output = render(&request(&dir)).unwrap();
        assert!(output.contains("Upload either indexed prices or returns"));
        assert!(!dir.path().join("indexed.csv").exists());
    }

    #[test]
    fn partial_match_plots_found_subset_with_warning() {
        let dir = TempDir::new().unwrap();
        let returns = dir.path().join("returns.csv");
        fs::write(
            &returns,
            "date,LMT,NOC\n2024-01-01,0.0,0.0\n2024-01-02,0.10,-0.02\n2024-01-03,-0.05,0.01\n",
        )
        .unwrap();

        let mut req = request(&dir);
        req.returns = Some(returns);
        let output = render(&req).unwrap();

        assert!(output.contains("104.50"));
        assert!(output.contains("Missing columns in data: RTX, GD"));

        let exported = fs::read_to_string(dir.path().join("indexed.csv")).unwrap();
        assert!(exported.starts_with("date,LMT,NOC\n2024-01-01,100,100\n"));
    }

    #[test]
    fn strict_mode_refuses_partial_match() {
        let dir = TempDir::new().unwrap();
        let prices = dir.path().join("prices.csv");
        fs::write(&prices, "date,LMT,NOC\n2024-01-01,100,100\n").unwrap();

        let mut req = request(&dir);
        req.prices = Some(prices);
        req.strict = true;
        let err = render(&req).unwrap_err();
        assert!(err.to_string().contains("RTX, GD"));
    }

    #[test]
    fn tail_limits_rows_shown() {
        let series = crate::core::series::build_indexed_series(
            &crate::core::DataTable::from_reader(
                "date,X\n2024-01-01,100\n2024-01-02,101\n2024-01-03,102\n".as_bytes(),
            )
            .unwrap(),
            "date",
            &["X".to_string()],
            IndexMode::AlreadyIndexed,
        )
        .unwrap();

        let output = display_series(&series, Some(1));
        assert!(output.contains("2024-01-03"));
        assert!(!output.contains("2024-01-01"));
    }
}
