use super::{load_table, ui};
use crate::core::DataTable;
use crate::core::metrics::{MetricTrend, metric_trend, numeric_columns};
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

pub fn render(path: Option<&Path>, x: Option<&str>, y: Option<&str>) -> Result<String> {
    let mut output = ui::section_header(
        "Metrics",
        "CSV with columns like: Year, Revenue, EBITDA, EPS...",
    );

    let Some(path) = path else {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text("Skip if you don't have this yet.", ui::StyleType::Subtle)
        ));
        return Ok(output);
    };

    let table = load_table(path)?;
    if table.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text("The file has a header but no rows.", ui::StyleType::Subtle)
        ));
        return Ok(output);
    }
    output.push_str(&format!("\n{}\n", display_table(&table)));

    let numeric = numeric_columns(&table);
    if numeric.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text("No numeric columns to plot.", ui::StyleType::Subtle)
        ));
        return Ok(output);
    }
    output.push_str(&format!(
        "\n{} {}\n",
        ui::style_text("Numeric columns:", ui::StyleType::Label),
        numeric.join(", ")
    ));

    if let Some(trend) = metric_trend(&table, x, y)? {
        output.push_str(&format!("\n{}\n", display_trend(&trend)));
    }
    Ok(output)
}

fn display_table(data: &DataTable) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(data.headers().iter().map(|h| ui::header_cell(h)));
    for row in data.rows() {
        table.add_row(row.iter().map(Cell::new));
    }
    table.to_string()
}

fn display_trend(trend: &MetricTrend) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&trend.x_column),
        ui::header_cell(&trend.y_column),
    ]);
    for point in &trend.points {
        table.add_row(vec![
            Cell::new(&point.x),
            ui::format_optional_cell(point.y, |v| format!("{v:.2}")),
        ]);
    }

    let mut output = format!(
        "{}\n{table}",
        ui::style_text(
            &format!("{} over {}", trend.y_column, trend.x_column),
            ui::StyleType::Label
        )
    );
    if let Some(summary) = trend.summary {
        let change = summary
            .change
            .map_or("N/A".to_string(), |c| format!("{c:+.2}%"));
        output.push_str(&format!(
            "\nFirst {:.2}, last {:.2}, min {:.2}, max {:.2}, change {}",
            summary.first, summary.last, summary.min, summary.max, change
        ));
    }
    output
}
