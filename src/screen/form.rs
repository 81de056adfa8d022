//! Ticket form screen, shared by create and edit.
//!
//! Create opens on an empty, pristine form. Edit first fetches the ticket
//! and populates the fields without dirtying them. Submission validates
//! everything up front, disables the form while saving and, once saved,
//! pauses briefly so the confirmation is visible before navigating back to
//! the list.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::warn;

use crate::service::TicketApi;
use crate::types::{
    NewTicket, Ticket, TicketCategory, TicketId, TicketPatch, TicketPriority, TicketStatus,
};

use super::{
    DESCRIPTION_MIN_LEN, FieldError, Navigator, PendingChanges, TITLE_MIN_LEN, TaskSlot,
    validate_assignee, validate_required_min,
};

/// How long the saved confirmation stays on screen before navigating back.
pub const SAVED_PAUSE: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TicketId),
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Fetching the ticket to edit.
    Loading,
    /// The ticket to edit could not be fetched.
    LoadFailed,
    /// Editable. Create mode starts here with an empty form.
    #[default]
    Ready,
    /// Submission in flight; the form is disabled.
    Saving,
    /// Saved; waiting out the confirmation pause.
    Saved,
}

/// The six form fields. Status stays `None` in create mode, where it is
/// fixed to OPEN at submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
    pub assignee: String,
    pub status: Option<TicketStatus>,
}

impl FormFields {
    fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            category: Some(ticket.category),
            priority: Some(ticket.priority),
            assignee: ticket.assignee.clone(),
            status: Some(ticket.status),
        }
    }

    pub fn validate(&self, mode: FormMode) -> FieldErrors {
        FieldErrors {
            title: validate_required_min(&self.title, TITLE_MIN_LEN),
            description: validate_required_min(&self.description, DESCRIPTION_MIN_LEN),
            category: self.category.is_none().then_some(FieldError::Required),
            priority: self.priority.is_none().then_some(FieldError::Required),
            assignee: validate_assignee(&self.assignee),
            // the status control only exists in edit mode
            status: match mode {
                FormMode::Create => None,
                FormMode::Edit(_) => self.status.is_none().then_some(FieldError::Required),
            },
        }
    }

    /// Create payload. `None` until both enum fields are chosen; create
    /// always submits OPEN no matter what the status field holds.
    fn to_new_ticket(&self) -> Option<NewTicket> {
        Some(NewTicket {
            title: self.title.clone(),
            description: self.description.clone(),
            status: TicketStatus::Open,
            priority: self.priority?,
            category: self.category?,
            assignee: self.assignee.clone(),
        })
    }

    /// Edit payload: the full form, every field included.
    fn to_patch(&self) -> TicketPatch {
        TicketPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            status: self.status,
            priority: self.priority,
            category: self.category,
            assignee: Some(self.assignee.clone()),
        }
    }
}

/// Which fields the user has interacted with; errors only show for these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub title: bool,
    pub description: bool,
    pub category: bool,
    pub priority: bool,
    pub assignee: bool,
    pub status: bool,
}

impl Touched {
    fn all() -> Self {
        Self {
            title: true,
            description: true,
            category: true,
            priority: true,
            assignee: true,
            status: true,
        }
    }
}

/// Per-field validation outcome, `None` where the field passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<FieldError>,
    pub description: Option<FieldError>,
    pub category: Option<FieldError>,
    pub priority: Option<FieldError>,
    pub assignee: Option<FieldError>,
    pub status: Option<FieldError>,
}

impl FieldErrors {
    pub fn is_clean(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.status.is_none()
    }
}

/// Everything the form view renders, published as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub phase: FormPhase,
    pub fields: FormFields,
    pub touched: Touched,
    pub dirty: bool,
    pub save_error: bool,
    /// The committed ticket from the last successful save.
    pub saved: Option<Ticket>,
}

pub struct FormScreen {
    inner: Arc<FormInner>,
}

struct FormInner {
    api: Arc<dyn TicketApi>,
    navigator: Arc<dyn Navigator>,
    mode: FormMode,
    state: watch::Sender<FormState>,
    load_task: TaskSlot,
    save_task: TaskSlot,
    closed: AtomicBool,
}

impl FormScreen {
    /// Open the form. Edit mode starts a fetch for the ticket's current
    /// fields; create mode is immediately editable.
    pub fn open(api: Arc<dyn TicketApi>, navigator: Arc<dyn Navigator>, mode: FormMode) -> Self {
        let initial = FormState {
            phase: match mode {
                FormMode::Create => FormPhase::Ready,
                FormMode::Edit(_) => FormPhase::Loading,
            },
            ..Default::default()
        };
        let (state, _) = watch::channel(initial);
        let inner = Arc::new(FormInner {
            api,
            navigator,
            mode,
            state,
            load_task: TaskSlot::default(),
            save_task: TaskSlot::default(),
            closed: AtomicBool::new(false),
        });
        if let FormMode::Edit(id) = mode {
            let task = Arc::clone(&inner);
            inner.load_task.install(tokio::spawn(async move {
                let result = task.api.get_ticket(id).await;
                if task.closed.load(Ordering::SeqCst) {
                    return;
                }
                match result {
                    Ok(ticket) => task.state.send_modify(|state| {
                        state.phase = FormPhase::Ready;
                        state.fields = FormFields::from_ticket(&ticket);
                    }),
                    Err(error) => {
                        warn!(%error, id, "could not load ticket into form");
                        task.state
                            .send_modify(|state| state.phase = FormPhase::LoadFailed);
                    }
                }
            }));
        }
        Self { inner }
    }

    pub fn mode(&self) -> FormMode {
        self.inner.mode
    }

    pub fn state(&self) -> watch::Receiver<FormState> {
        self.inner.state.subscribe()
    }

    /// Edit the fields in place. Any edit dirties the form.
    pub fn edit_fields(&self, apply: impl FnOnce(&mut FormFields)) {
        if self.inner.closed.load(Ordering::SeqCst) {
            return;
        }
        if !matches!(self.inner.state.borrow().phase, FormPhase::Ready) {
            return;
        }
        self.inner.state.send_modify(|state| {
            apply(&mut state.fields);
            state.dirty = true;
        });
    }

    /// Validate and submit. Invalid fields are all marked touched and
    /// nothing is sent; a valid form disables itself for the duration of
    /// the save.
    pub fn submit(&self) {
        let inner = Arc::clone(&self.inner);
        if inner.closed.load(Ordering::SeqCst) {
            return;
        }
        let snapshot = inner.state.borrow().clone();
        if !matches!(snapshot.phase, FormPhase::Ready) {
            return;
        }
        let errors = snapshot.fields.validate(inner.mode);
        if !errors.is_clean() {
            inner.state.send_modify(|state| state.touched = Touched::all());
            return;
        }
        inner.state.send_modify(|state| {
            state.phase = FormPhase::Saving;
            state.save_error = false;
        });
        let handle = tokio::spawn(async move {
            let result = match inner.mode {
                FormMode::Create => {
                    let Some(ticket) = snapshot.fields.to_new_ticket() else {
                        // unreachable past validation, but never panic here
                        return;
                    };
                    inner.api.create_ticket(ticket).await
                }
                FormMode::Edit(id) => inner.api.update_ticket(id, snapshot.fields.to_patch()).await,
            };
            if inner.closed.load(Ordering::SeqCst) {
                return;
            }
            match result {
                Ok(ticket) => {
                    inner.state.send_modify(|state| {
                        state.phase = FormPhase::Saved;
                        state.dirty = false;
                        state.saved = Some(ticket);
                    });
                    sleep(SAVED_PAUSE).await;
                    if inner.closed.load(Ordering::SeqCst) {
                        return;
                    }
                    inner.navigator.go_to_list();
                }
                Err(error) => {
                    warn!(%error, "ticket save failed");
                    inner.state.send_modify(|state| {
                        state.phase = FormPhase::Ready;
                        state.save_error = true;
                    });
                }
            }
        });
        self.inner.save_task.install(handle);
    }

    /// Stop the screen: pending load or save work is aborted and nothing
    /// publishes or navigates after this.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.load_task.abort();
        self.inner.save_task.abort();
    }
}

impl PendingChanges for FormScreen {
    fn has_unsaved_changes(&self) -> bool {
        let state = self.inner.state.borrow();
        state.dirty && !matches!(state.phase, FormPhase::Saved)
    }
}

impl Drop for FormScreen {
    fn drop(&mut self) {
        self.close();
    }
}
