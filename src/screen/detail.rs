//! Ticket detail screen: one ticket resource, one comment-thread resource,
//! inline status/priority mutations and a comment form.
//!
//! The two resources load and fail independently. Mutations never touch
//! the displayed ticket directly; a successful update re-fetches it so the
//! view always shows committed state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::warn;

use crate::service::TicketApi;
use crate::types::{Comment, Ticket, TicketId, TicketPatch, TicketPriority, TicketStatus};

use super::{COMMENT_MIN_LEN, FieldError, Resource, ViewState, validate_required_min};

/// Mutation progress the view renders alongside the two resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailFlags {
    /// A status or priority change is in flight.
    pub saving: bool,
    /// The last status or priority change failed.
    pub save_error: bool,
    /// A comment submission is in flight.
    pub submitting: bool,
    /// The last comment submission failed.
    pub submit_error: bool,
}

/// The comment input owned by the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    pub message: String,
    pub touched: bool,
}

impl CommentForm {
    pub fn error(&self) -> Option<FieldError> {
        validate_required_min(&self.message, COMMENT_MIN_LEN)
    }

    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }
}

pub struct DetailScreen {
    inner: Arc<DetailInner>,
}

struct DetailInner {
    api: Arc<dyn TicketApi>,
    ticket_id: TicketId,
    ticket: Resource<Ticket>,
    comments: Resource<Vec<Comment>>,
    flags: watch::Sender<DetailFlags>,
    form: watch::Sender<CommentForm>,
    closed: AtomicBool,
}

impl DetailScreen {
    /// Open the screen for `ticket_id` and start both fetches.
    pub fn open(api: Arc<dyn TicketApi>, ticket_id: TicketId) -> Self {
        let (flags, _) = watch::channel(DetailFlags::default());
        let (form, _) = watch::channel(CommentForm::default());
        let inner = Arc::new(DetailInner {
            api,
            ticket_id,
            ticket: Resource::new("ticket"),
            comments: Resource::new("comments"),
            flags,
            form,
            closed: AtomicBool::new(false),
        });
        DetailInner::reload_ticket(&inner);
        DetailInner::reload_comments(&inner);
        Self { inner }
    }

    pub fn ticket_id(&self) -> TicketId {
        self.inner.ticket_id
    }

    pub fn ticket_state(&self) -> watch::Receiver<ViewState<Ticket>> {
        self.inner.ticket.subscribe()
    }

    pub fn comments_state(&self) -> watch::Receiver<ViewState<Vec<Comment>>> {
        self.inner.comments.subscribe()
    }

    pub fn flags(&self) -> watch::Receiver<DetailFlags> {
        self.inner.flags.subscribe()
    }

    pub fn comment_form(&self) -> watch::Receiver<CommentForm> {
        self.inner.form.subscribe()
    }

    pub fn refresh_ticket(&self) {
        DetailInner::reload_ticket(&self.inner);
    }

    pub fn refresh_comments(&self) {
        DetailInner::reload_comments(&self.inner);
    }

    /// Move the ticket to a new status.
    pub fn change_status(&self, status: TicketStatus) {
        self.mutate(TicketPatch::status(status));
    }

    /// Reprioritize the ticket.
    pub fn change_priority(&self, priority: TicketPriority) {
        self.mutate(TicketPatch::priority(priority));
    }

    pub fn set_comment_message(&self, message: &str) {
        if self.inner.closed.load(Ordering::SeqCst) {
            return;
        }
        let message = message.to_string();
        self.inner.form.send_modify(|form| form.message = message);
    }

    /// Submit the comment form. An invalid message marks the field touched
    /// and sends nothing.
    pub fn submit_comment(&self) {
        let inner = Arc::clone(&self.inner);
        if inner.closed.load(Ordering::SeqCst) || inner.flags.borrow().submitting {
            return;
        }
        let form = inner.form.borrow().clone();
        if !form.is_valid() {
            inner.form.send_modify(|form| form.touched = true);
            return;
        }
        inner.flags.send_modify(|flags| {
            flags.submitting = true;
            flags.submit_error = false;
        });
        tokio::spawn(async move {
            let result = inner.api.add_comment(inner.ticket_id, &form.message).await;
            if inner.closed.load(Ordering::SeqCst) {
                return;
            }
            match result {
                Ok(_) => {
                    inner.form.send_replace(CommentForm::default());
                    DetailInner::reload_comments(&inner);
                }
                Err(error) => {
                    warn!(%error, "comment submission failed");
                    inner.flags.send_modify(|flags| flags.submit_error = true);
                }
            }
            inner.flags.send_modify(|flags| flags.submitting = false);
        });
    }

    /// Stop the screen: nothing publishes after this, and in-flight
    /// fetches are aborted.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.ticket.shutdown();
        self.inner.comments.shutdown();
    }

    fn mutate(&self, patch: TicketPatch) {
        let inner = Arc::clone(&self.inner);
        if inner.closed.load(Ordering::SeqCst) || inner.flags.borrow().saving {
            return;
        }
        inner.flags.send_modify(|flags| {
            flags.saving = true;
            flags.save_error = false;
        });
        tokio::spawn(async move {
            let result = inner.api.update_ticket(inner.ticket_id, patch).await;
            if inner.closed.load(Ordering::SeqCst) {
                return;
            }
            match result {
                // show committed state, not what we asked for
                Ok(_) => DetailInner::reload_ticket(&inner),
                Err(error) => {
                    warn!(%error, "ticket update failed");
                    inner.flags.send_modify(|flags| flags.save_error = true);
                }
            }
            inner.flags.send_modify(|flags| flags.saving = false);
        });
    }
}

impl DetailInner {
    fn reload_ticket(inner: &Arc<Self>) {
        if inner.closed.load(Ordering::SeqCst) {
            return;
        }
        let seq = inner.ticket.begin();
        let task = Arc::clone(inner);
        inner.ticket.track(tokio::spawn(async move {
            let result = task.api.get_ticket(task.ticket_id).await;
            task.ticket.finish(seq, &task.closed, result);
        }));
    }

    fn reload_comments(inner: &Arc<Self>) {
        if inner.closed.load(Ordering::SeqCst) {
            return;
        }
        let seq = inner.comments.begin();
        let task = Arc::clone(inner);
        inner.comments.track(tokio::spawn(async move {
            let result = task.api.list_comments(task.ticket_id).await;
            task.comments.finish(seq, &task.closed, result);
        }));
    }
}

impl Drop for DetailScreen {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;
    use crate::error::TaquillaError;
    use crate::screen::test_support::{FakeApi, sample_comment, sample_ticket};

    async fn next_ready<T: Clone>(state: &mut watch::Receiver<ViewState<T>>) -> T {
        loop {
            state.changed().await.unwrap();
            let snapshot = state.borrow().clone();
            match snapshot {
                ViewState::Ready(value) => return value,
                ViewState::Failed => panic!("fetch failed"),
                ViewState::Loading => continue,
            }
        }
    }

    async fn next_failed<T: Clone + std::fmt::Debug>(state: &mut watch::Receiver<ViewState<T>>) {
        loop {
            state.changed().await.unwrap();
            let snapshot = state.borrow().clone();
            match snapshot {
                ViewState::Failed => return,
                ViewState::Ready(value) => panic!("unexpectedly ready: {value:?}"),
                ViewState::Loading => continue,
            }
        }
    }

    fn open(api: &Arc<FakeApi>, id: TicketId) -> DetailScreen {
        DetailScreen::open(Arc::clone(api) as Arc<dyn TicketApi>, id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_loads_ticket_and_comments() {
        let api = Arc::new(FakeApi::new());
        let screen = open(&api, 7);
        let mut ticket = screen.ticket_state();
        let mut comments = screen.comments_state();

        let loaded = next_ready(&mut ticket).await;
        assert_eq!(loaded.id, 7);
        let thread = next_ready(&mut comments).await;
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].ticket_id, 7);

        assert_eq!(*api.get_requests.lock(), vec![7]);
        assert_eq!(*api.comments_requests.lock(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resources_fail_independently() {
        let api = Arc::new(FakeApi::new());
        api.script_get(
            Duration::from_millis(400),
            Err(TaquillaError::TicketNotFound(999)),
        );

        let screen = open(&api, 999);
        let mut ticket = screen.ticket_state();
        let mut comments = screen.comments_state();

        next_failed(&mut ticket).await;
        let thread = next_ready(&mut comments).await;
        assert_eq!(thread.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_ticket_refetches() {
        let api = Arc::new(FakeApi::new());
        let screen = open(&api, 3);
        let mut ticket = screen.ticket_state();
        next_ready(&mut ticket).await;

        screen.refresh_ticket();
        next_ready(&mut ticket).await;
        assert_eq!(*api.get_requests.lock(), vec![3, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_status_updates_then_refetches() {
        let api = Arc::new(FakeApi::new());
        api.script_update(Duration::from_millis(300), Ok(sample_ticket(5)));
        api.script_get(Duration::from_millis(0), Ok(sample_ticket(5)));
        let done = {
            let mut ticket = sample_ticket(5);
            ticket.status = TicketStatus::Done;
            ticket
        };
        api.script_get(Duration::from_millis(0), Ok(done));

        let screen = open(&api, 5);
        let mut ticket = screen.ticket_state();
        let flags = screen.flags();
        next_ready(&mut ticket).await;

        screen.change_status(TicketStatus::Done);
        assert!(flags.borrow().saving);

        sleep(Duration::from_millis(50)).await;
        assert!(flags.borrow().saving);

        let refetched = next_ready(&mut ticket).await;
        assert_eq!(refetched.status, TicketStatus::Done);
        assert!(!flags.borrow().saving);
        assert!(!flags.borrow().save_error);

        let updates = api.update_requests.lock();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, 5);
        assert_eq!(updates[0].1, TicketPatch::status(TicketStatus::Done));
        // the displayed value came from the re-fetch, not the mutation
        assert_eq!(api.get_requests.lock().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_priority_sends_priority_patch() {
        let api = Arc::new(FakeApi::new());
        let screen = open(&api, 9);
        let mut ticket = screen.ticket_state();
        next_ready(&mut ticket).await;

        screen.change_priority(TicketPriority::High);
        next_ready(&mut ticket).await;

        let updates = api.update_requests.lock();
        assert_eq!(updates[0].1, TicketPatch::priority(TicketPriority::High));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_mutation_sets_save_error_and_keeps_ticket() {
        let api = Arc::new(FakeApi::new());
        api.script_update(
            Duration::from_millis(200),
            Err(TaquillaError::TicketNotFound(5)),
        );

        let screen = open(&api, 5);
        let mut ticket = screen.ticket_state();
        let flags = screen.flags();
        let before = next_ready(&mut ticket).await;

        screen.change_status(TicketStatus::Done);
        sleep(Duration::from_millis(300)).await;

        assert!(!flags.borrow().saving);
        assert!(flags.borrow().save_error);
        // no re-fetch happened and the view still shows the old ticket
        assert_eq!(api.get_requests.lock().len(), 1);
        assert_eq!(ticket.borrow().ready(), Some(&before));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrying_mutation_clears_save_error() {
        let api = Arc::new(FakeApi::new());
        api.script_update(
            Duration::from_millis(100),
            Err(TaquillaError::TicketNotFound(5)),
        );

        let screen = open(&api, 5);
        let mut ticket = screen.ticket_state();
        let flags = screen.flags();
        next_ready(&mut ticket).await;

        screen.change_status(TicketStatus::Done);
        sleep(Duration::from_millis(200)).await;
        assert!(flags.borrow().save_error);

        screen.change_status(TicketStatus::Done);
        assert!(!flags.borrow().save_error);
        assert!(flags.borrow().saving);
        next_ready(&mut ticket).await;
        assert!(!flags.borrow().saving);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_comment_is_not_sent() {
        let api = Arc::new(FakeApi::new());
        let screen = open(&api, 2);
        let mut comments = screen.comments_state();
        next_ready(&mut comments).await;

        screen.set_comment_message("ok");
        screen.submit_comment();

        sleep(Duration::from_millis(100)).await;
        assert!(api.add_comment_requests.lock().is_empty());
        let form = screen.comment_form().borrow().clone();
        assert!(form.touched);
        assert_eq!(form.error(), Some(FieldError::TooShort { min: 5 }));
        assert_eq!(form.message, "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_comment_submission_resets_form_and_reloads_thread() {
        let api = Arc::new(FakeApi::new());
        api.script_comments(Duration::from_millis(0), Ok(Vec::new()));
        api.script_add_comment(
            Duration::from_millis(250),
            Ok(sample_comment(2, 2)),
        );
        api.script_comments(
            Duration::from_millis(0),
            Ok(vec![sample_comment(1, 2), sample_comment(2, 2)]),
        );

        let screen = open(&api, 2);
        let mut comments = screen.comments_state();
        let flags = screen.flags();
        assert!(next_ready(&mut comments).await.is_empty());

        screen.set_comment_message("Esto sigue fallando hoy");
        screen.submit_comment();
        assert!(flags.borrow().submitting);

        let thread = next_ready(&mut comments).await;
        assert_eq!(thread.len(), 2);
        assert!(!flags.borrow().submitting);
        assert!(!flags.borrow().submit_error);

        let sent = api.add_comment_requests.lock();
        assert_eq!(*sent, vec![(2, "Esto sigue fallando hoy".to_string())]);
        let form = screen.comment_form().borrow().clone();
        assert_eq!(form, CommentForm::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submission_keeps_draft_and_flags_error() {
        let api = Arc::new(FakeApi::new());
        api.script_add_comment(
            Duration::from_millis(200),
            Err(TaquillaError::TicketNotFound(2)),
        );

        let screen = open(&api, 2);
        let mut comments = screen.comments_state();
        let flags = screen.flags();
        next_ready(&mut comments).await;

        screen.set_comment_message("Esto sigue fallando hoy");
        screen.submit_comment();
        sleep(Duration::from_millis(300)).await;

        assert!(!flags.borrow().submitting);
        assert!(flags.borrow().submit_error);
        // draft survives so the user can retry
        let form = screen.comment_form().borrow().clone();
        assert_eq!(form.message, "Esto sigue fallando hoy");
        // the thread was not reloaded
        assert_eq!(api.comments_requests.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_suppresses_inflight_fetch() {
        let api = Arc::new(FakeApi::new());
        api.script_get(Duration::from_millis(400), Ok(sample_ticket(1)));

        let screen = open(&api, 1);
        let ticket = screen.ticket_state();
        sleep(Duration::from_millis(100)).await;
        screen.close();

        sleep(Duration::from_secs(1)).await;
        assert!(ticket.borrow().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutations_after_close_are_ignored() {
        let api = Arc::new(FakeApi::new());
        let screen = open(&api, 1);
        let mut ticket = screen.ticket_state();
        next_ready(&mut ticket).await;

        screen.close();
        screen.change_status(TicketStatus::Done);
        screen.set_comment_message("Mensaje tras cerrar");
        screen.submit_comment();

        sleep(Duration::from_secs(1)).await;
        assert!(api.update_requests.lock().is_empty());
        assert!(api.add_comment_requests.lock().is_empty());
        assert!(screen.comment_form().borrow().message.is_empty());
    }
}
