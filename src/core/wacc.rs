//! Weighted-average cost of capital.
//!
//! All rates are in percent, beta is unitless. The computation never fails:
//! questionable inputs are surfaced through [`CapitalStructureInputs::warnings`]
//! and still flow through the arithmetic.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Floor for `equity_weight + debt_weight` so zero weights never divide by zero.
pub const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalStructureInputs {
    /// Risk-free rate (%)
    pub risk_free_rate: f64,
    /// Market risk premium (%)
    pub market_risk_premium: f64,
    pub beta: f64,
    /// Pre-tax cost of debt (%)
    pub pre_tax_cost_of_debt: f64,
    /// Tax rate (%)
    pub tax_rate: f64,
    /// E/V (%)
    pub equity_weight: f64,
    /// D/V (%)
    pub debt_weight: f64,
}

impl Default for CapitalStructureInputs {
    fn default() -> Self {
        Self {
            risk_free_rate: 4.0,
            market_risk_premium: 5.0,
            beta: 0.75,
            pre_tax_cost_of_debt: 4.5,
            tax_rate: 21.0,
            equity_weight: 75.0,
            debt_weight: 25.0,
        }
    }
}

impl CapitalStructureInputs {
    /// Lists inputs that are arithmetically valid but unlikely to be intended.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let rates = [
            ("Risk-free rate", self.risk_free_rate),
            ("Market risk premium", self.market_risk_premium),
            ("Pre-tax cost of debt", self.pre_tax_cost_of_debt),
        ];
        for (label, value) in rates {
            if value < 0.0 {
                warnings.push(format!("{label} is negative ({value:.2}%)"));
            }
        }
        if !(0.0..=100.0).contains(&self.tax_rate) {
            warnings.push(format!(
                "Tax rate {:.2}% is outside 0-100%",
                self.tax_rate
            ));
        }
        if self.equity_weight < 0.0 || self.debt_weight < 0.0 {
            warnings.push("Capital structure weights should not be negative".to_string());
        }
        if self.equity_weight + self.debt_weight <= WEIGHT_EPSILON {
            warnings.push(
                "Equity and debt weights sum to zero; shares are computed against a near-zero total"
                    .to_string(),
            );
        }
        warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaccResult {
    /// k_e (%)
    pub cost_of_equity: f64,
    /// k_d(1-T) (%)
    pub after_tax_cost_of_debt: f64,
    /// Fraction, multiply by 100 for display.
    pub wacc: f64,
    /// E / (E + D) after normalization.
    pub equity_share: f64,
    /// D / (E + D) after normalization.
    pub debt_share: f64,
}

impl WaccResult {
    pub fn wacc_percent(&self) -> f64 {
        self.wacc * 100.0
    }
}

pub fn compute_wacc(inputs: &CapitalStructureInputs) -> WaccResult {
    let total = (inputs.equity_weight + inputs.debt_weight).max(WEIGHT_EPSILON);
    let equity_share = inputs.equity_weight / total;
    let debt_share = inputs.debt_weight / total;

    let cost_of_equity = inputs.risk_free_rate + inputs.beta * inputs.market_risk_premium;
    let after_tax_cost_of_debt = inputs.pre_tax_cost_of_debt * (1.0 - inputs.tax_rate / 100.0);
    let wacc = (equity_share * cost_of_equity + debt_share * after_tax_cost_of_debt) / 100.0;

    debug!(
        ?inputs,
        cost_of_equity, after_tax_cost_of_debt, wacc, "Computed WACC"
    );

    WaccResult {
        cost_of_equity,
        after_tax_cost_of_debt,
        wacc,
        equity_share,
        debt_share,
    }
}
