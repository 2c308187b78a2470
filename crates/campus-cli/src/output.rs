//! Output formatting utilities.

use campus_core::{Dependency, EventRecord};
use serde::Serialize;

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats an event as a simple table row.
pub fn format_event_row(event: &EventRecord) -> String {
    format!(
        "{:<36} {:<30} {:<12} {:<10} {:<10} {:>5}/{:<5} {}",
        truncate(event.id.as_str(), 36),
        truncate(&event.title, 30),
        truncate(&event.category, 12),
        event.date.to_string(),
        event.modality.as_str(),
        event.registration_count,
        event.capacity,
        event.status.as_str()
    )
}

/// Prints the event table header.
#[allow(clippy::print_literal)]
pub fn print_events_header() {
    println!(
        "{:<36} {:<30} {:<12} {:<10} {:<10} {:>11} {}",
        "ID", "TITLE", "CATEGORY", "DATE", "MODALITY", "SEATS", "STATUS"
    );
    println!("{}", "-".repeat(130));
}

/// Formats an organizational unit as a simple table row.
pub fn format_dependency_row(dependency: &Dependency) -> String {
    format!(
        "{:<36} {:<10} {:<40} {}",
        truncate(dependency.id.as_str(), 36),
        truncate(&dependency.acronym, 10),
        truncate(&dependency.name, 40),
        dependency.email
    )
}

/// Prints the organizational unit table header.
#[allow(clippy::print_literal)]
pub fn print_dependencies_header() {
    println!("{:<36} {:<10} {:<40} {}", "ID", "ACRONYM", "NAME", "EMAIL");
    println!("{}", "-".repeat(110));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
