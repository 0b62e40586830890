use super::ui;
use crate::core::ask;

pub fn render(question: &str) -> String {
    let mut output = ui::section_header("Ask a question", "Ask about the charts or financials");
    if !question.trim().is_empty() {
        output.push_str(&format!("\n> {}\n", question.trim()));
    }
    output.push_str("\nHere's a quick checklist to answer that:\n");
    for item in ask::answer(question) {
        output.push_str(&format!("  • {item}\n"));
    }
    output
}
