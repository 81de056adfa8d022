use jiff::Timestamp;

use crate::types::{TicketCategory, TicketPriority, TicketStatus};

/// Format options for ticket display
#[derive(Default)]
pub struct FormatOptions {
    pub show_priority: bool,
    pub suffix: Option<String>,
}

/// Human-readable status label, as shown on the board.
pub fn status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "Abierto",
        TicketStatus::InProgress => "En progreso",
        TicketStatus::Done => "Resuelto",
    }
}

/// Human-readable priority label.
pub fn priority_label(priority: TicketPriority) -> &'static str {
    match priority {
        TicketPriority::Low => "Baja",
        TicketPriority::Medium => "Media",
        TicketPriority::High => "Alta",
    }
}

/// Human-readable category label.
pub fn category_label(category: TicketCategory) -> &'static str {
    match category {
        TicketCategory::Billing => "Facturación",
        TicketCategory::Tech => "Técnico",
        TicketCategory::Other => "Otro",
    }
}

/// Describe how long ago a timestamp was, in whole days.
///
/// Timestamps under a day old (including anything in the future) read as
/// "hoy".
///
/// # Examples
///
/// ```
/// use jiff::{SignedDuration, Timestamp};
/// use taquilla::display::relative_day;
///
/// let now = Timestamp::UNIX_EPOCH + SignedDuration::from_hours(100);
/// assert_eq!(relative_day(now, now), "hoy");
/// assert_eq!(relative_day(now - SignedDuration::from_hours(36), now), "hace 1 día");
/// ```
pub fn relative_day(ts: Timestamp, now: Timestamp) -> String {
    let days = now.duration_since(ts).as_hours() / 24;
    match days {
        d if d <= 0 => "hoy".to_string(),
        1 => "hace 1 día".to_string(),
        d => format!("hace {d} días"),
    }
}

/// Format a timestamp as a plain calendar date (YYYY-MM-DD).
pub fn format_date(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%d").to_string()
}
