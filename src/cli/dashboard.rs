use super::stock::StockRequest;
use super::{headlines, metrics, stock, ui, wacc};
use crate::core::CapitalStructureInputs;
use anyhow::Result;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct DashboardRequest {
    pub headlines: Option<PathBuf>,
    pub headlines_limit: usize,
    pub metrics: Option<PathBuf>,
    pub wacc: CapitalStructureInputs,
    pub stock: StockRequest,
}

/// Renders every section. A failing section is reported in place and never
/// stops the others.
pub fn render_sections(request: &DashboardRequest) -> Vec<String> {
    let sections: [(&str, Result<String>); 4] = [
        (
            "Headlines",
            headlines::render(request.headlines.as_deref(), request.headlines_limit),
        ),
        ("Financials", wacc::render(&request.wacc, false)),
        (
            "Metrics",
            metrics::render(request.metrics.as_deref(), None, None),
        ),
        ("Stock", stock::render(&request.stock)),
    ];

    sections
        .into_iter()
        .map(|(name, result)| match result {
            Ok(output) => output,
            Err(e) => {
                warn!(section = name, error = %e, "Section failed");
                format!(
                    "{}\n{}\n",
                    ui::style_text(name, ui::StyleType::Title),
                    ui::style_text(&format!("{e:#}"), ui::StyleType::Error)
                )
            }
        })
        .collect()
}

pub fn run(request: &DashboardRequest) -> Result<()> {
    let sections = render_sections(request);
    let count = sections.len();
    for (i, section) in sections.iter().enumerate() {
        println!("{section}");
        if i < count - 1 {
            ui::print_separator();
        }
    }
    Ok(())
}
