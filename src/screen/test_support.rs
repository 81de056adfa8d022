//! Controllable `TicketApi` double for exercising the screen controllers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::Mutex;
use tokio::time::sleep;

use crate::error::Result;
use crate::query::TicketPage;
use crate::service::{ListRequest, TicketApi};
use crate::types::{
    CURRENT_USER, Comment, NewTicket, Ticket, TicketCategory, TicketId, TicketPatch,
    TicketPriority, TicketStatus,
};

use super::Navigator;

/// A scripted outcome for one upcoming call: how long it takes and what it
/// returns. Calls with no script resolve immediately with canned data.
type Script<T> = (Duration, Result<T>);

/// `TicketApi` double with per-operation scripts, recorded requests and
/// call counters.
#[derive(Default)]
pub struct FakeApi {
    list_scripts: Mutex<VecDeque<Script<TicketPage>>>,
    get_scripts: Mutex<VecDeque<Script<Ticket>>>,
    create_scripts: Mutex<VecDeque<Script<Ticket>>>,
    update_scripts: Mutex<VecDeque<Script<Ticket>>>,
    comments_scripts: Mutex<VecDeque<Script<Vec<Comment>>>>,
    add_comment_scripts: Mutex<VecDeque<Script<Comment>>>,

    pub list_requests: Mutex<Vec<ListRequest>>,
    pub get_requests: Mutex<Vec<TicketId>>,
    pub create_requests: Mutex<Vec<NewTicket>>,
    pub update_requests: Mutex<Vec<(TicketId, TicketPatch)>>,
    pub comments_requests: Mutex<Vec<TicketId>>,
    pub add_comment_requests: Mutex<Vec<(TicketId, String)>>,

    pub list_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_list(&self, delay: Duration, result: Result<TicketPage>) {
        self.list_scripts.lock().push_back((delay, result));
    }

    pub fn script_get(&self, delay: Duration, result: Result<Ticket>) {
        self.get_scripts.lock().push_back((delay, result));
    }

    pub fn script_create(&self, delay: Duration, result: Result<Ticket>) {
        self.create_scripts.lock().push_back((delay, result));
    }

    pub fn script_update(&self, delay: Duration, result: Result<Ticket>) {
        self.update_scripts.lock().push_back((delay, result));
    }

    pub fn script_comments(&self, delay: Duration, result: Result<Vec<Comment>>) {
        self.comments_scripts.lock().push_back((delay, result));
    }

    pub fn script_add_comment(&self, delay: Duration, result: Result<Comment>) {
        self.add_comment_scripts.lock().push_back((delay, result));
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn last_list_request(&self) -> Option<ListRequest> {
        self.list_requests.lock().last().cloned()
    }
}

#[async_trait]
impl TicketApi for FakeApi {
    async fn list_tickets(&self, request: ListRequest) -> Result<TicketPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let requested_page = request.page;
        self.list_requests.lock().push(request);
        let script = self.list_scripts.lock().pop_front();
        match script {
            Some((delay, result)) => {
                sleep(delay).await;
                result
            }
            // canned page that encodes which request produced it
            None => Ok(TicketPage {
                items: Vec::new(),
                total: requested_page,
            }),
        }
    }

    async fn get_ticket(&self, id: TicketId) -> Result<Ticket> {
        self.get_requests.lock().push(id);
        let script = self.get_scripts.lock().pop_front();
        match script {
            Some((delay, result)) => {
                sleep(delay).await;
                result
            }
            None => Ok(sample_ticket(id)),
        }
    }

    async fn create_ticket(&self, ticket: NewTicket) -> Result<Ticket> {
        let created = ticket_from(&ticket, 51);
        self.create_requests.lock().push(ticket);
        let script = self.create_scripts.lock().pop_front();
        match script {
            Some((delay, result)) => {
                sleep(delay).await;
                result
            }
            None => Ok(created),
        }
    }

    async fn update_ticket(&self, id: TicketId, patch: TicketPatch) -> Result<Ticket> {
        let updated = patched_ticket(id, &patch);
        self.update_requests.lock().push((id, patch));
        let script = self.update_scripts.lock().pop_front();
        match script {
            Some((delay, result)) => {
                sleep(delay).await;
                result
            }
            None => Ok(updated),
        }
    }

    async fn list_comments(&self, ticket_id: TicketId) -> Result<Vec<Comment>> {
        self.comments_requests.lock().push(ticket_id);
        let script = self.comments_scripts.lock().pop_front();
        match script {
            Some((delay, result)) => {
                sleep(delay).await;
                result
            }
            None => Ok(vec![sample_comment(1, ticket_id)]),
        }
    }

    async fn add_comment(&self, ticket_id: TicketId, message: &str) -> Result<Comment> {
        self.add_comment_requests
            .lock()
            .push((ticket_id, message.to_string()));
        let script = self.add_comment_scripts.lock().pop_front();
        match script {
            Some((delay, result)) => {
                sleep(delay).await;
                result
            }
            None => Ok(Comment {
                id: 1,
                ticket_id,
                author: CURRENT_USER.into(),
                message: message.to_string(),
                created_at: Timestamp::UNIX_EPOCH,
            }),
        }
    }
}

pub fn sample_ticket(id: TicketId) -> Ticket {
    Ticket {
        id,
        title: "Pantalla en blanco al abrir facturas".into(),
        description: "Al entrar a la sección de facturas la pantalla queda en blanco.".into(),
        status: TicketStatus::Open,
        priority: TicketPriority::Medium,
        category: TicketCategory::Tech,
        assignee: "Carlos Ruiz".into(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn sample_comment(id: u32, ticket_id: TicketId) -> Comment {
    Comment {
        id,
        ticket_id,
        author: "Ana Torres".into(),
        message: "Estamos revisando el caso.".into(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

fn ticket_from(fields: &NewTicket, id: TicketId) -> Ticket {
    Ticket {
        id,
        title: fields.title.clone(),
        description: fields.description.clone(),
        status: fields.status,
        priority: fields.priority,
        category: fields.category,
        assignee: fields.assignee.clone(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn patched_ticket(id: TicketId, patch: &TicketPatch) -> Ticket {
    let mut ticket = sample_ticket(id);
    if let Some(title) = &patch.title {
        ticket.title = title.clone();
    }
    if let Some(description) = &patch.description {
        ticket.description = description.clone();
    }
    if let Some(status) = patch.status {
        ticket.status = status;
    }
    if let Some(priority) = patch.priority {
        ticket.priority = priority;
    }
    if let Some(category) = patch.category {
        ticket.category = category;
    }
    if let Some(assignee) = &patch.assignee {
        ticket.assignee = assignee.clone();
    }
    ticket
}

/// Records navigation intents so tests can assert on them.
#[derive(Default)]
pub struct RecordingNavigator {
    pub list_visits: AtomicUsize,
    pub detail_visits: Mutex<Vec<TicketId>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_visit_count(&self) -> usize {
        self.list_visits.load(Ordering::SeqCst)
    }

    pub fn detail_visit_ids(&self) -> Vec<TicketId> {
        self.detail_visits.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to_list(&self) {
        self.list_visits.fetch_add(1, Ordering::SeqCst);
    }

    fn go_to_detail(&self, id: TicketId) {
        self.detail_visits.lock().push(id);
    }
}
