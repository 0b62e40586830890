//! Canned guidance for the dashboard's question box.

const CHECKLIST: [&str; 4] = [
    "Check the Financials -> WACC inputs to see sensitivity.",
    "In Stock, look at indexed lines to compare relative performance.",
    "If you uploaded headlines, correlate date spikes with events.",
    "Consider running an event window around major dates (earnings, contract awards).",
];

/// The answer does not depend on the question; every question gets the
/// same checklist of where to look.
pub fn answer(_question: &str) -> Vec<&'static str> {
    CHECKLIST.to_vec()
}
