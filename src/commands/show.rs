use std::sync::Arc;

use jiff::Timestamp;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::commands::{print_json, settle};
use crate::display::{format_comment, format_ticket_detail};
use crate::error::{Result, TaquillaError};
use crate::screen::DetailScreen;
use crate::service::TicketService;
use crate::store::seed;
use crate::types::TicketId;

/// Show one ticket with its comment thread
pub async fn cmd_show(id: TicketId, output_json: bool) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let screen = DetailScreen::open(api, id);
    let mut ticket_state = screen.ticket_state();
    let mut comments_state = screen.comments_state();

    let Some(ticket) = settle(&mut ticket_state).await else {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };
    let Some(comments) = settle(&mut comments_state).await else {
        println!("No se pudieron cargar los comentarios.");
        return Err(TaquillaError::LoadFailed("comments"));
    };

    if output_json {
        return print_json(&json!({
            "ticket": ticket,
            "comments": comments,
        }));
    }

    let now = Timestamp::now();
    println!("{}", format_ticket_detail(&ticket, now));

    println!();
    println!("{}", format!("Comentarios ({})", comments.len()).bold());
    if comments.is_empty() {
        println!("Sin comentarios todavía.");
    } else {
        for comment in &comments {
            println!();
            println!("{}", format_comment(comment, now));
        }
    }

    Ok(())
}
