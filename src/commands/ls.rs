use std::sync::Arc;

use jiff::Timestamp;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::commands::{print_json, settle};
use crate::display::{category_label, priority_label, relative_day, status_label};
use crate::error::{Result, TaquillaError};
use crate::query::{DEFAULT_PAGE_SIZE, SortField, page_count};
use crate::screen::{ListInputs, ListScreen};
use crate::service::TicketService;
use crate::store::seed;
use crate::types::Ticket;

/// A row in the ticket list table
#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Título")]
    title: String,
    #[tabled(rename = "Estado")]
    status: String,
    #[tabled(rename = "Prioridad")]
    priority: String,
    #[tabled(rename = "Categoría")]
    category: String,
    #[tabled(rename = "Asignado")]
    assignee: String,
    #[tabled(rename = "Actualizado")]
    updated: String,
}

impl TicketRow {
    fn from_ticket(ticket: &Ticket, now: Timestamp) -> Self {
        Self {
            id: format!("#{}", ticket.id),
            title: ticket.title.clone(),
            status: status_label(ticket.status).to_string(),
            priority: priority_label(ticket.priority).to_string(),
            category: category_label(ticket.category).to_string(),
            assignee: ticket.assignee.clone(),
            updated: relative_day(ticket.updated_at, now),
        }
    }
}

/// List tickets through the list screen, with filters, sort and paging
pub async fn cmd_ls(inputs: ListInputs, output_json: bool) -> Result<()> {
    let api = Arc::new(TicketService::new(seed::seeded_store()));
    let screen = ListScreen::open(api, inputs.clone());
    let mut listing = screen.state();

    let Some(page) = settle(&mut listing).await else {
        println!("No se pudieron cargar los tickets.");
        return Err(TaquillaError::LoadFailed("tickets"));
    };

    let pages = page_count(page.total, DEFAULT_PAGE_SIZE);

    if output_json {
        return print_json(&json!({
            "items": page.items,
            "total": page.total,
            "page": inputs.page,
            "pageCount": pages,
        }));
    }

    if page.total == 0 {
        println!("No hay tickets que coincidan.");
        return Ok(());
    }
    if page.items.is_empty() {
        println!(
            "No hay tickets en la página {}. Hay {} páginas.",
            inputs.page, pages
        );
        return Ok(());
    }

    let now = Timestamp::now();
    let rows: Vec<TicketRow> = page
        .items
        .iter()
        .map(|ticket| TicketRow::from_ticket(ticket, now))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    println!(
        "\n{} de {} tickets · página {} de {}",
        page.items.len(),
        page.total,
        inputs.page,
        pages
    );

    if inputs != ListInputs::default() {
        println!("Repite esta vista: {}", reproduce_command(&inputs));
    }

    Ok(())
}

/// Rebuild the command line that reproduces the current view.
fn reproduce_command(inputs: &ListInputs) -> String {
    let mut cmd = String::from("taquilla ls");
    let filters = &inputs.filters;
    if let Some(search) = &filters.search {
        cmd.push_str(&format!(" --search \"{search}\""));
    }
    if let Some(status) = filters.status {
        cmd.push_str(&format!(" --status {status}"));
    }
    if let Some(priority) = filters.priority {
        cmd.push_str(&format!(" --priority {priority}"));
    }
    if let Some(category) = filters.category {
        cmd.push_str(&format!(" --category {category}"));
    }
    if let Some(assignee) = &filters.assignee {
        cmd.push_str(&format!(" --assignee \"{assignee}\""));
    }
    if inputs.sort != SortField::default() {
        cmd.push_str(&format!(" --sort {}", inputs.sort));
    }
    if inputs.page != 1 {
        cmd.push_str(&format!(" --page {}", inputs.page));
    }
    cmd
}
