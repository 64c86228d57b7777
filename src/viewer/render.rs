//! Plain-text rendering for the viewer. Colors are applied by the binary.

use crate::features::analyses::dtos::CompanySummaryResponseDto;

pub const NO_COMPANIES_WARNING: &str = "No companies available. Try uploading data.";
pub const NO_SUMMARIES_WARNING: &str = "No summaries found for this company.";
pub const FETCH_SUMMARIES_ERROR: &str = "Failed to fetch summaries.";
pub const SUMMARY_HEADING: &str = "AI-Generated Summary";
pub const SEPARATOR: &str = "---";

/// Numbered list, starting at 1
pub fn company_menu(companies: &[String]) -> String {
    companies
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>3}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Map a 1-based menu choice back to an index
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Every stored quarter in the order received, each followed by a separator
pub fn summary(response: &CompanySummaryResponseDto) -> String {
    let mut out = format!("## {}: {}\n\n", SUMMARY_HEADING, response.company_name);
    for entry in &response.summaries {
        out.push_str(&format!(
            "### {}\n\n{}\n\n{}\n\n",
            entry.analysis_quarter,
            entry.final_summary.trim_end(),
            SEPARATOR
        ));
    }
    out
}
