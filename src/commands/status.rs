use std::sync::Arc;

use serde_json::json;

use crate::commands::{print_json, settle, wait_while};
use crate::display::{
    FormatOptions, format_priority_colored_with_format, format_status_colored_with_format,
    format_ticket_line,
};
use crate::error::{Result, TaquillaError};
use crate::screen::DetailScreen;
use crate::service::TicketService;
use crate::store::seed;
use crate::types::{TicketId, TicketPriority, TicketStatus};

/// Change a ticket's status
pub async fn cmd_status(id: TicketId, status: TicketStatus, output_json: bool) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let screen = DetailScreen::open(api, id);
    let mut ticket_state = screen.ticket_state();
    let mut flags = screen.flags();

    let Some(before) = settle(&mut ticket_state).await else {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };

    screen.change_status(status);
    let outcome = wait_while(&mut flags, |f| f.saving).await;
    if outcome.save_error {
        println!("No se pudo actualizar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    }

    let Some(ticket) = settle(&mut ticket_state).await else {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };

    if output_json {
        return print_json(&json!({
            "id": id,
            "action": "status_changed",
            "previousStatus": before.status,
            "newStatus": ticket.status,
        }));
    }

    println!(
        "Estado actualizado: {} -> {}",
        format_status_colored_with_format(before.status, |s| s.to_string()),
        format_status_colored_with_format(ticket.status, |s| s.to_string()),
    );
    println!("{}", format_ticket_line(&ticket, FormatOptions::default()));

    Ok(())
}

/// Change a ticket's priority
pub async fn cmd_priority(id: TicketId, priority: TicketPriority, output_json: bool) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let screen = DetailScreen::open(api, id);
    let mut ticket_state = screen.ticket_state();
    let mut flags = screen.flags();

    let Some(before) = settle(&mut ticket_state).await else {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };

    screen.change_priority(priority);
    let outcome = wait_while(&mut flags, |f| f.saving).await;
    if outcome.save_error {
        println!("No se pudo actualizar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    }

    let Some(ticket) = settle(&mut ticket_state).await else {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };

    if output_json {
        return print_json(&json!({
            "id": id,
            "action": "priority_changed",
            "previousPriority": before.priority,
            "newPriority": ticket.priority,
        }));
    }

    println!(
        "Prioridad actualizada: {} -> {}",
        format_priority_colored_with_format(before.priority, |s| s.to_string()),
        format_priority_colored_with_format(ticket.priority, |s| s.to_string()),
    );
    println!(
        "{}",
        format_ticket_line(
            &ticket,
            FormatOptions {
                show_priority: true,
                ..Default::default()
            }
        )
    );

    Ok(())
}
