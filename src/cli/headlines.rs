use super::{load_table, ui};
use crate::core::headlines::latest_headlines;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn render(path: Option<&Path>, limit: usize) -> Result<String> {
    let mut output = ui::section_header(
        "Headlines",
        "Optional: upload a CSV with columns `date, headline`.",
    );

    let Some(path) = path else {
        output.push_str(&format!(
            "\n{}\n",
            ui::style_text("No headlines uploaded yet.", ui::StyleType::Subtle)
        ));
        return Ok(output);
    };

    let table = load_table(path)?;
    let headlines = latest_headlines(&table, limit)?;
    output.push('\n');
    if headlines.is_empty() {
        output.push_str(&ui::style_text("The file has no headlines.", ui::StyleType::Subtle));
        output.push('\n');
    }
    for h in &headlines {
        output.push_str(&format!("• {} - {}\n", style(&h.date).bold(), h.headline));
    }
    Ok(output)
}
