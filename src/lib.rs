#[macro_use]
pub mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod query;
pub mod screen;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Result, TaquillaError};
pub use query::{SortField, TicketFilters, TicketPage};
pub use screen::{DetailScreen, FormMode, FormScreen, ListScreen, Navigator, ViewState};
pub use service::{ListRequest, TicketApi, TicketService};
pub use store::TicketStore;
pub use types::{
    Comment, NewTicket, Ticket, TicketCategory, TicketId, TicketPatch, TicketPriority,
    TicketStatus,
};
