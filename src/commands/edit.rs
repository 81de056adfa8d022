use std::sync::Arc;

use serde_json::json;

use crate::commands::{CliNavigator, print_json, wait_while};
use crate::display::{FormatOptions, format_ticket_line};
use crate::error::{Result, TaquillaError};
use crate::screen::{FormMode, FormPhase, FormScreen, Navigator};
use crate::service::TicketService;
use crate::store::seed;
use crate::types::{TicketId, TicketPatch};

/// Edit an existing ticket through the form screen
pub async fn cmd_edit(id: TicketId, changes: TicketPatch, output_json: bool) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let navigator = Arc::new(CliNavigator::new(output_json));
    let screen = FormScreen::open(
        api,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        FormMode::Edit(id),
    );
    let mut state = screen.state();

    let loaded = wait_while(&mut state, |s| s.phase == FormPhase::Loading).await;
    if loaded.phase == FormPhase::LoadFailed {
        println!("No se pudo cargar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    }

    screen.edit_fields(|fields| {
        if let Some(title) = changes.title {
            fields.title = title;
        }
        if let Some(description) = changes.description {
            fields.description = description;
        }
        if let Some(status) = changes.status {
            fields.status = Some(status);
        }
        if let Some(priority) = changes.priority {
            fields.priority = Some(priority);
        }
        if let Some(category) = changes.category {
            fields.category = Some(category);
        }
        if let Some(assignee) = changes.assignee {
            fields.assignee = assignee;
        }
    });
    screen.submit();

    let outcome = wait_while(&mut state, |s| s.phase == FormPhase::Saving).await;
    if outcome.save_error {
        println!("No se pudo guardar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    }
    let Some(ticket) = outcome.saved else {
        println!("No se pudo guardar el ticket.");
        return Err(TaquillaError::TicketNotFound(id));
    };

    if output_json {
        print_json(&json!(ticket))?;
    } else {
        println!("Ticket actualizado");
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
    }

    navigator.wait().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketStatus;

    #[tokio::test(start_paused = true)]
    async fn test_edit_applies_the_requested_changes() {
        let changes = TicketPatch {
            status: Some(TicketStatus::Done),
            ..Default::default()
        };
        let result = cmd_edit(1, changes, true).await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_missing_ticket_fails() {
        let changes = TicketPatch {
            title: Some("Un título cualquiera".to_string()),
            ..Default::default()
        };
        let result = cmd_edit(999, changes, false).await;
        assert!(matches!(result, Err(TaquillaError::TicketNotFound(999))));
    }
}
