use crate::types::{TicketPriority, TicketStatus};
use owo_colors::OwoColorize;

pub mod cli_formatting;
pub mod data_formatting;

pub use cli_formatting::*;
pub use data_formatting::*;

pub fn format_status_colored(status: TicketStatus) -> String {
    format_status_colored_with_format(status, |s| format!("[{}]", s))
}

pub fn format_status_colored_with_format<F>(status: TicketStatus, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(status_label(status));
    match status {
        TicketStatus::Open => badge.yellow().to_string(),
        TicketStatus::InProgress => badge.cyan().to_string(),
        TicketStatus::Done => badge.green().to_string(),
    }
}

pub fn format_priority_colored(priority: TicketPriority) -> String {
    format_priority_colored_with_format(priority, |p| format!("[{}]", p))
}

pub fn format_priority_colored_with_format<F>(priority: TicketPriority, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(priority_label(priority));
    match priority {
        TicketPriority::High => badge.red().to_string(),
        TicketPriority::Medium => badge.yellow().to_string(),
        TicketPriority::Low => badge.dimmed().to_string(),
    }
}
