use std::sync::Arc;

use serde_json::json;

use crate::commands::{CliNavigator, print_json, wait_while};
use crate::display::{FormatOptions, format_ticket_line};
use crate::error::{Result, TaquillaError};
use crate::screen::{FormMode, FormPhase, FormScreen, Navigator};
use crate::service::TicketService;
use crate::store::seed;
use crate::types::{TicketCategory, TicketPriority};

/// Create a new ticket through the form screen
pub async fn cmd_create(
    title: String,
    description: String,
    priority: TicketPriority,
    category: TicketCategory,
    assignee: String,
    output_json: bool,
) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let navigator = Arc::new(CliNavigator::new(output_json));
    let screen = FormScreen::open(
        api,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        FormMode::Create,
    );
    let mut state = screen.state();

    screen.edit_fields(|fields| {
        fields.title = title;
        fields.description = description;
        fields.priority = Some(priority);
        fields.category = Some(category);
        fields.assignee = assignee;
    });
    screen.submit();

    let outcome = wait_while(&mut state, |s| s.phase == FormPhase::Saving).await;
    if outcome.save_error {
        println!("No se pudo guardar el ticket.");
        return Err(TaquillaError::SaveFailed("ticket"));
    }
    let Some(ticket) = outcome.saved else {
        println!("No se pudo guardar el ticket.");
        return Err(TaquillaError::SaveFailed("ticket"));
    };

    if output_json {
        print_json(&json!(ticket))?;
    } else {
        println!("Ticket creado");
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
