//! Data-access layer over the ticket store.
//!
//! `TicketService` is a deliberate fake of a remote backend: every
//! operation computes its result against the in-memory store at call time,
//! then withholds it for a fixed per-operation delay before returning.
//! Failures take the same delay, like an error response arriving after a
//! full round trip. The delays force every consumer to handle transient
//! loading and error states even though the underlying work is a
//! synchronous in-memory computation.
//!
//! The store mutex is never held across an await; each operation takes the
//! lock, computes, releases, then sleeps.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Result, TaquillaError};
use crate::query::{DEFAULT_PAGE_SIZE, SortField, TicketFilters, TicketPage, TicketQueryBuilder};
use crate::store::TicketStore;
use crate::types::{Comment, NewTicket, Ticket, TicketId, TicketPatch};

/// Parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub filters: TicketFilters,
    pub sort: SortField,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            filters: TicketFilters::default(),
            sort: SortField::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The operations screens consume.
///
/// Object-safe so controllers can hold any backend: the simulated one in
/// production, hand-rolled fakes in tests.
#[async_trait]
pub trait TicketApi: Send + Sync {
    async fn list_tickets(&self, request: ListRequest) -> Result<TicketPage>;
    async fn get_ticket(&self, id: TicketId) -> Result<Ticket>;
    async fn create_ticket(&self, fields: NewTicket) -> Result<Ticket>;
    async fn update_ticket(&self, id: TicketId, patch: TicketPatch) -> Result<Ticket>;
    async fn list_comments(&self, ticket_id: TicketId) -> Result<Vec<Comment>>;
    async fn add_comment(&self, ticket_id: TicketId, message: &str) -> Result<Comment>;
}

/// Fixed delay per operation type, inside the 400-600ms band the screens
/// were tuned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub comments: Duration,
    pub add_comment: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(500),
            get: Duration::from_millis(400),
            create: Duration::from_millis(600),
            update: Duration::from_millis(550),
            comments: Duration::from_millis(450),
            add_comment: Duration::from_millis(500),
        }
    }
}

/// The simulated backend over an owned store.
pub struct TicketService {
    store: Arc<Mutex<TicketStore>>,
    latency: Latency,
}

impl TicketService {
    pub fn new(store: TicketStore) -> Self {
        Self::with_latency(store, Latency::default())
    }

    /// Service with a custom latency profile. Tests use this to stretch or
    /// collapse individual delays.
    pub fn with_latency(store: TicketStore, latency: Latency) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            latency,
        }
    }
}

#[async_trait]
impl TicketApi for TicketService {
    async fn list_tickets(&self, request: ListRequest) -> Result<TicketPage> {
        let snapshot = self.store.lock().tickets();
        let page = TicketQueryBuilder::new()
            .with_criteria(&request.filters)
            .with_sort(request.sort)
            .with_page(request.page, request.page_size)
            .build()
            .apply(&snapshot);
        debug!(
            total = page.total,
            items = page.items.len(),
            page = request.page,
            "list tickets"
        );
        sleep(self.latency.list).await;
        Ok(page)
    }

    async fn get_ticket(&self, id: TicketId) -> Result<Ticket> {
        let found = self.store.lock().ticket(id);
        sleep(self.latency.get).await;
        match found {
            Some(ticket) => Ok(ticket),
            None => {
                warn!(id, "ticket lookup failed");
                Err(TaquillaError::TicketNotFound(id))
            }
        }
    }

    async fn create_ticket(&self, fields: NewTicket) -> Result<Ticket> {
        let ticket = self.store.lock().insert(fields);
        debug!(id = ticket.id, "ticket created");
        sleep(self.latency.create).await;
        Ok(ticket)
    }

    async fn update_ticket(&self, id: TicketId, patch: TicketPatch) -> Result<Ticket> {
        let updated = self.store.lock().update(id, patch);
        sleep(self.latency.update).await;
        match updated {
            Some(ticket) => {
                debug!(id, "ticket updated");
                Ok(ticket)
            }
            None => {
                warn!(id, "update failed, no such ticket");
                Err(TaquillaError::TicketNotFound(id))
            }
        }
    }

    async fn list_comments(&self, ticket_id: TicketId) -> Result<Vec<Comment>> {
        let comments = self.store.lock().comments_for(ticket_id);
        debug!(ticket_id, count = comments.len(), "list comments");
        sleep(self.latency.comments).await;
        Ok(comments)
    }

    async fn add_comment(&self, ticket_id: TicketId, message: &str) -> Result<Comment> {
        let added = self.store.lock().add_comment(ticket_id, message);
        sleep(self.latency.add_comment).await;
        match added {
            Some(comment) => {
                debug!(ticket_id, comment_id = comment.id, "comment added");
                Ok(comment)
            }
            None => {
                warn!(ticket_id, "comment rejected, no such ticket");
                Err(TaquillaError::TicketNotFound(ticket_id))
            }
        }
    }
}
