//! Screen controllers and the machinery they share.
//!
//! Each screen is an explicit state machine around the async data-access
//! layer. State is published through `tokio::sync::watch` channels that the
//! hosting shell subscribes to and renders from. Two disciplines hold
//! everywhere:
//!
//! - last-request-wins: every fetch claims a sequence number and publishes
//!   its outcome only while that number is still the latest issued, and a
//!   superseding fetch aborts the task it replaces;
//! - teardown: a closed screen publishes nothing, no matter what its
//!   remaining tasks were about to do.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{ASSIGNEES, TicketId};

pub mod detail;
pub mod form;
pub mod list;

#[cfg(test)]
pub mod test_support;

pub use detail::DetailScreen;
pub use form::{FormMode, FormPhase, FormScreen};
pub use list::{ListInputs, ListScreen};

/// What an async resource looks like to its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Failed,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Issues request sequence numbers and remembers the latest.
///
/// A fetch applies its result only while its number is still the latest
/// issued; anything older went stale while in flight and must be dropped.
pub struct RequestSeq {
    latest: AtomicU64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Claim the next number, superseding everything issued before.
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Supersede everything issued so far without claiming a number.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for RequestSeq {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds a screen's single in-flight task of one kind.
///
/// Installing a new handle aborts whatever was running before, so
/// superseded work stops instead of racing its replacement; the sequence
/// check stays as the backstop for a task already past its await.
#[derive(Default)]
pub struct TaskSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TaskSlot {
    pub fn install(&self, handle: JoinHandle<()>) {
        if let Some(old) = self.handle.lock().replace(handle) {
            old.abort();
        }
    }

    pub fn abort(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.abort();
        }
    }
}

/// One fetchable resource: its view-state channel, request sequence and
/// in-flight task slot.
pub(crate) struct Resource<T> {
    name: &'static str,
    state: watch::Sender<ViewState<T>>,
    seq: RequestSeq,
    inflight: TaskSlot,
}

impl<T> Resource<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            name,
            state,
            seq: RequestSeq::new(),
            inflight: TaskSlot::default(),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.subscribe()
    }

    /// Claim a sequence number for a new fetch and flip the view to
    /// Loading.
    pub(crate) fn begin(&self) -> u64 {
        let seq = self.seq.next();
        self.state.send_replace(ViewState::Loading);
        seq
    }

    /// Publish a fetch outcome unless it went stale while in flight.
    /// Returns whether the outcome was applied.
    pub(crate) fn finish(&self, seq: u64, closed: &AtomicBool, result: Result<T>) -> bool {
        if closed.load(Ordering::SeqCst) || !self.seq.is_current(seq) {
            debug!(resource = self.name, seq, "discarding stale result");
            return false;
        }
        let next = match result {
            Ok(value) => ViewState::Ready(value),
            Err(error) => {
                warn!(resource = self.name, %error, "fetch failed");
                ViewState::Failed
            }
        };
        self.state.send_replace(next);
        true
    }

    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        self.inflight.install(handle);
    }

    pub(crate) fn shutdown(&self) {
        self.seq.invalidate();
        self.inflight.abort();
    }
}

/// Routing collaborator. Screens emit navigation intents; the hosting
/// shell decides what they mean (the CLI prints follow-up commands, tests
/// record the calls).
pub trait Navigator: Send + Sync {
    /// Back to the ticket list, keeping whatever listing context the shell
    /// tracks (filters, page).
    fn go_to_list(&self);

    /// To one ticket's detail view.
    fn go_to_detail(&self, id: TicketId);
}

/// Screens that may hold unsaved work. The navigation guard asks before
/// letting the user leave.
pub trait PendingChanges {
    fn has_unsaved_changes(&self) -> bool;
}

/// Gate for leaving a screen: asks `confirm` only when something would
/// actually be lost.
pub fn confirm_leave(screen: &dyn PendingChanges, confirm: impl FnOnce() -> bool) -> bool {
    if screen.has_unsaved_changes() {
        confirm()
    } else {
        true
    }
}

pub const TITLE_MIN_LEN: usize = 5;
pub const DESCRIPTION_MIN_LEN: usize = 20;
pub const COMMENT_MIN_LEN: usize = 5;

/// Why a single form field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    UnknownAssignee,
}

/// Required plus a minimum length, counted in characters.
pub fn validate_required_min(value: &str, min: usize) -> Option<FieldError> {
    if value.is_empty() {
        Some(FieldError::Required)
    } else if value.chars().count() < min {
        Some(FieldError::TooShort { min })
    } else {
        None
    }
}

/// Required plus membership in the fixed assignee roster. The roster was a
/// dropdown in the original client; free-form input moves the rule into
/// validation.
pub fn validate_assignee(value: &str) -> Option<FieldError> {
    if value.is_empty() {
        Some(FieldError::Required)
    } else if !ASSIGNEES.contains(&value) {
        Some(FieldError::UnknownAssignee)
    } else {
        None
    }
}
