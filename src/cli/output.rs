//! Output formatting for the command line
//!
//! Colours are applied through `colored`, which honours `NO_COLOR` and
//! non-terminal output on its own.

use crate::core::{ResultMeta, Solution};
use colored::Colorize;

/// Format an error notification for stderr
pub fn format_notification(summary: &str, body: &str) -> String {
    format!("{} {}: {}", "error:".red().bold(), summary.bold(), body)
}

/// Format one search result line
pub fn format_result(meta: &ResultMeta) -> String {
    format!(
        "{}  {}  {}",
        meta.name.bold(),
        meta.description,
        format!("[{}]", meta.id).dimmed()
    )
}

/// Format one solution for `list`
pub fn format_solution(solution: &Solution) -> String {
    format!(
        "{}  {}\n    {} {}",
        solution.name.bold(),
        solution.path,
        "id:".dimmed(),
        solution.id
    )
}

/// Heading printed above the results of one provider
pub fn format_provider_heading(provider_id: &str, app_name: &str, count: usize) -> String {
    format!(
        "{} ({}, {} result{})",
        provider_id.cyan().bold(),
        app_name,
        count,
        if count == 1 { "" } else { "s" }
    )
}
