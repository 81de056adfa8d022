use std::sync::Arc;

use jiff::Timestamp;
use serde_json::json;

use crate::commands::{print_json, settle, wait_while};
use crate::display::{FormatOptions, format_comment, format_ticket_line};
use crate::error::{Result, TaquillaError};
use crate::screen::DetailScreen;
use crate::service::TicketService;
use crate::store::seed;
use crate::types::TicketId;

/// Add a comment to a ticket's thread
pub async fn cmd_comment(id: TicketId, message: &str, output_json: bool) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let screen = DetailScreen::open(api, id);
    let mut ticket_state = screen.ticket_state();
    let mut comments_state = screen.comments_state();
    let mut flags = screen.flags();

    let Some(ticket) = settle(&mut ticket_state).await else {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };

    screen.set_comment_message(message);
    screen.submit_comment();
    let outcome = wait_while(&mut flags, |f| f.submitting).await;
    if outcome.submit_error {
        println!("No se pudo añadir el comentario.");
        return Err(TaquillaError::TicketNotFound(id));
    }

    let Some(comments) = settle(&mut comments_state).await else {
        println!("No se pudieron cargar los comentarios.");
        return Err(TaquillaError::LoadFailed("comments"));
    };

    if output_json {
        return print_json(&json!({
            "ticketId": id,
            "comments": comments,
        }));
    }

    let suffix = match comments.len() {
        1 => " (1 comentario)".to_string(),
        n => format!(" ({n} comentarios)"),
    };
    println!("Comentario añadido");
    println!(
        "{}",
        format_ticket_line(
            &ticket,
            FormatOptions {
                suffix: Some(suffix),
                ..Default::default()
            }
        )
    );

    let now = Timestamp::now();
    for comment in &comments {
        println!();
        println!("{}", format_comment(comment, now));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_comment_on_seeded_ticket_succeeds() {
        let result = cmd_comment(1, "Reproducido en un segundo equipo.", true).await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_comment_on_missing_ticket_fails() {
        let result = cmd_comment(999, "Un mensaje válido de prueba.", false).await;
        assert!(matches!(result, Err(TaquillaError::TicketNotFound(999))));
    }
}
