use jiff::Timestamp;
use owo_colors::OwoColorize;

use crate::types::{Comment, Ticket, TicketPriority, TicketStatus};

use super::data_formatting::{
    FormatOptions, category_label, format_date, priority_label, relative_day, status_label,
};

/// Format a ticket for single-line display with colors
pub fn format_ticket_line(ticket: &Ticket, options: FormatOptions) -> String {
    let id_padded = format!("{:>4}", format!("#{}", ticket.id));

    let priority_str = if options.show_priority {
        format!("[{}]", priority_label(ticket.priority))
    } else {
        String::new()
    };

    let status_str = format!("[{}]", status_label(ticket.status));

    let suffix = options.suffix.unwrap_or_default();

    // Apply colors based on status
    let colored_status = match ticket.status {
        TicketStatus::Open => status_str.yellow().to_string(),
        TicketStatus::InProgress => status_str.cyan().to_string(),
        TicketStatus::Done => status_str.green().to_string(),
    };

    let colored_id = id_padded.cyan().to_string();

    let colored_priority = if options.show_priority {
        match ticket.priority {
            TicketPriority::High => priority_str.red().to_string(),
            TicketPriority::Medium => priority_str.yellow().to_string(),
            TicketPriority::Low => priority_str,
        }
    } else {
        priority_str
    };

    format!(
        "{} {}{} - {}{}",
        colored_id, colored_priority, colored_status, ticket.title, suffix
    )
}

/// Format the full detail block for a ticket (header, badges, dates, body)
pub fn format_ticket_detail(ticket: &Ticket, now: Timestamp) -> String {
    let header = format!(
        "{} {}",
        format!("#{}", ticket.id).cyan().bold(),
        ticket.title.bold()
    );

    let badges = format!(
        "{}{} [{}] asignado a {}",
        super::format_priority_colored(ticket.priority),
        super::format_status_colored(ticket.status),
        category_label(ticket.category),
        ticket.assignee
    );

    let dates = format!(
        "Creado el {} · actualizado {}",
        format_date(ticket.created_at),
        relative_day(ticket.updated_at, now)
    );

    format!(
        "{header}\n{badges}\n{}\n\n{}",
        dates.dimmed(),
        ticket.description
    )
}

/// Format a single comment for thread display with colors
pub fn format_comment(comment: &Comment, now: Timestamp) -> String {
    format!(
        "{} {}\n  {}",
        comment.author.bold(),
        format!("({})", relative_day(comment.created_at, now)).dimmed(),
        comment.message
    )
}
