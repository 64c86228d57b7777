//! Prompt template management module.
//!
//! Templates live in `templates/prompts/` and use Jinja2 syntax. The copies in
//! the repository are compiled in as defaults; `PROMPT_TEMPLATE_DIR` can point
//! at a directory with edited versions.
//!
//! # Usage
//!
//! ```ignore
//! let engine = PromptEngine::from_dir("templates/prompts")?;
//! let prompt = render_equity_report_prompt(&engine, "Acme", "Q3FY25", &combined)?;
//! ```

pub mod engine;

pub use engine::{PromptEngine, TemplateError, EQUITY_REPORT_TEMPLATE};

use minijinja::context;

/// Render the equity research report prompt.
///
/// # Arguments
/// * `company_name` - Company as entered by the uploader
/// * `analysis_quarter` - Free-form quarter label (e.g. "Q3FY25")
/// * `combined_text` - The labelled source documents
pub fn render_equity_report_prompt(
    engine: &PromptEngine,
    company_name: &str,
    analysis_quarter: &str,
    combined_text: &str,
) -> Result<String, TemplateError> {
    engine.render(
        EQUITY_REPORT_TEMPLATE,
        context! {
            company_name => company_name,
            analysis_quarter => analysis_quarter,
            combined_text => combined_text,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION_HEADINGS: [&str; 8] = [
        "Executive Summary",
        "Financial Performance Summary",
        "Key Highlights from the Earnings Call",
        "Industry & Macroeconomic Trends",
        "Risks & Challenges",
        "Valuation & Peer Comparison",
        "Future Growth Outlook",
        "Investment Recommendation & Final Verdict",
    ];

    #[test]
    fn test_equity_report_prompt_interpolates_inputs() {
        let engine = PromptEngine::builtin().unwrap();
        let prompt =
            render_equity_report_prompt(&engine, "Tata Motors", "Q3FY25", "Quarterly Report:\nRevenue up")
                .unwrap();

        assert!(prompt.contains("Investment Research Report: Tata Motors"));
        assert!(prompt.contains("Analysis Quarter: Q3FY25"));
        assert!(prompt.contains("| Valuation Metric | Tata Motors |"));
        assert!(prompt.ends_with("**Data Sources:**\nQuarterly Report:\nRevenue up"));
    }

    #[test]
    fn test_equity_report_prompt_keeps_section_order() {
        let engine = PromptEngine::builtin().unwrap();
        let prompt = render_equity_report_prompt(&engine, "Acme", "Q1", "text").unwrap();

        let positions: Vec<usize> = SECTION_HEADINGS
            .iter()
            .map(|heading| prompt.find(heading).unwrap_or_else(|| panic!("missing {}", heading)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_equity_report_prompt_does_not_escape_source_text() {
        let engine = PromptEngine::builtin().unwrap();
        let prompt =
            render_equity_report_prompt(&engine, "AT&T", "Q2", "EBITDA <up> & \"margins\"").unwrap();

        assert!(prompt.contains("Investment Research Report: AT&T"));
        assert!(prompt.contains("EBITDA <up> & \"margins\""));
    }
}
