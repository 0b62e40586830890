use super::ui;
use crate::core::{CapitalStructureInputs, compute_wacc};
use anyhow::Result;
use comfy_table::Cell;
use serde_json::json;

/// Per-invocation overrides for the configured WACC inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaccOverrides {
    pub risk_free_rate: Option<f64>,
    pub market_risk_premium: Option<f64>,
    pub beta: Option<f64>,
    pub pre_tax_cost_of_debt: Option<f64>,
    pub tax_rate: Option<f64>,
    pub equity_weight: Option<f64>,
    pub debt_weight: Option<f64>,
}

impl WaccOverrides {
    pub fn apply(&self, base: &CapitalStructureInputs) -> CapitalStructureInputs {
        CapitalStructureInputs {
            risk_free_rate: self.risk_free_rate.unwrap_or(base.risk_free_rate),
            market_risk_premium: self.market_risk_premium.unwrap_or(base.market_risk_premium),
            beta: self.beta.unwrap_or(base.beta),
            pre_tax_cost_of_debt: self.pre_tax_cost_of_debt.unwrap_or(base.pre_tax_cost_of_debt),
            tax_rate: self.tax_rate.unwrap_or(base.tax_rate),
            equity_weight: self.equity_weight.unwrap_or(base.equity_weight),
            debt_weight: self.debt_weight.unwrap_or(base.debt_weight),
        }
    }
}

pub fn render(inputs: &CapitalStructureInputs, as_json: bool) -> Result<String> {
    let result = compute_wacc(inputs);
    let warnings = inputs.warnings();

    if as_json {
        let value = json!({
            "inputs": inputs,
            "result": result,
            "warnings": warnings,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Input"), ui::header_cell("Value")]);
    let rows = [
        ("Risk-free rate", format!("{:.2}%", inputs.risk_free_rate)),
        (
            "Market risk premium",
            format!("{:.2}%", inputs.market_risk_premium),
        ),
        ("Equity beta (β)", format!("{:.2}", inputs.beta)),
        (
            "Pre-tax cost of debt",
            format!("{:.2}%", inputs.pre_tax_cost_of_debt),
        ),
        ("Tax rate", format!("{:.2}%", inputs.tax_rate)),
        (
            "Equity weight (E/V)",
            format!("{:.2}% → {:.2}%", inputs.equity_weight, result.equity_share * 100.0),
        ),
        (
            "Debt weight (D/V)",
            format!("{:.2}% → {:.2}%", inputs.debt_weight, result.debt_share * 100.0),
        ),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }

    let mut metrics = ui::new_styled_table();
    metrics.set_header(vec![
        ui::header_cell("Cost of Equity (k_e)"),
        ui::header_cell("After-Tax Cost of Debt (k_d(1-T))"),
        ui::header_cell("WACC"),
    ]);
    metrics.add_row(vec![
        ui::format_percentage_cell(result.cost_of_equity),
        ui::format_percentage_cell(result.after_tax_cost_of_debt),
        ui::format_percentage_cell(result.wacc_percent()),
    ]);

    let mut output = ui::section_header(
        "Financials",
        "Adjust inputs to compute WACC. Weights are normalized to sum to 100%.",
    );
    output.push_str(&format!("\n{table}\n\n{metrics}\n"));
    output.push_str(&format!(
        "\n{} {}\n",
        ui::style_text("WACC:", ui::StyleType::Label),
        ui::style_text(&format!("{:.2}%", result.wacc_percent()), ui::StyleType::Value)
    ));
    for warning in &warnings {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(&format!("Warning: {warning}"), ui::StyleType::Warning)
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = WaccOverrides {
            beta: Some(1.1),
            debt_weight: Some(40.0),
            ..Default::default()
        };
        let inputs = overrides.apply(&CapitalStructureInputs::default());
        assert_eq!(inputs.beta, 1.1);
        assert_eq!(inputs.debt_weight, 40.0);
        assert_eq!(inputs.equity_weight, 75.0);
        assert_eq!(inputs.risk_free_rate, 4.0);
    }

    #[test]
    fn renders_headline_metrics() {
        let output = render(&CapitalStructureInputs::default(), false).unwrap();
        assert!(output.contains("7.75%"));
        assert!(output.contains("6.70%"));
        assert!(!output.contains("Warning"));
    }

    #[test]
    fn renders_json() {
        let output = render(&CapitalStructureInputs::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["result"]["cost_of_equity"], 7.75);
        assert_eq!(value["inputs"]["beta"], 0.75);
        assert!(value["warnings"].as_array().unwrap().is_empty());
    }
}
