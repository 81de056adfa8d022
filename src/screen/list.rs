//! Ticket list screen: a filter form, a page cursor and one listing
//! resource.
//!
//! Filter edits are debounced and reset the page to 1; page changes and
//! retries reload immediately. Whatever the trigger, only the latest
//! issued query may publish.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::debug;

use crate::query::{DEFAULT_PAGE_SIZE, SortField, TicketFilters, TicketPage};
use crate::service::{ListRequest, TicketApi};

use super::{Resource, TaskSlot, ViewState};

/// Quiet period after the last filter edit before the listing reloads.
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(400);

/// Input half of the screen: the filter form plus the page cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInputs {
    pub filters: TicketFilters,
    pub sort: SortField,
    pub page: usize,
}

impl Default for ListInputs {
    fn default() -> Self {
        Self {
            filters: TicketFilters::default(),
            sort: SortField::default(),
            page: 1,
        }
    }
}

pub struct ListScreen {
    inner: Arc<ListInner>,
}

struct ListInner {
    api: Arc<dyn TicketApi>,
    listing: Resource<TicketPage>,
    inputs: watch::Sender<ListInputs>,
    debounce: TaskSlot,
    closed: AtomicBool,
}

impl ListScreen {
    /// Open the screen and immediately load the listing for `initial`.
    pub fn open(api: Arc<dyn TicketApi>, initial: ListInputs) -> Self {
        let (inputs, _) = watch::channel(initial);
        let inner = Arc::new(ListInner {
            api,
            listing: Resource::new("listing"),
            inputs,
            debounce: TaskSlot::default(),
            closed: AtomicBool::new(false),
        });
        ListInner::reload(&inner);
        Self { inner }
    }

    pub fn state(&self) -> watch::Receiver<ViewState<TicketPage>> {
        self.inner.listing.subscribe()
    }

    pub fn inputs(&self) -> watch::Receiver<ListInputs> {
        self.inner.inputs.subscribe()
    }

    /// Replace the filter form. Identical values are ignored; a real change
    /// resets the page to 1 and schedules a debounced reload.
    pub fn set_filters(&self, filters: TicketFilters, sort: SortField) {
        if self.inner.closed.load(Ordering::SeqCst) {
            return;
        }
        let unchanged = {
            let current = self.inner.inputs.borrow();
            current.filters == filters && current.sort == sort
        };
        if unchanged {
            return;
        }
        self.inner.inputs.send_replace(ListInputs {
            filters,
            sort,
            page: 1,
        });
        self.schedule_debounced_reload();
    }

    /// Jump to another page of the current listing. Reloads immediately.
    pub fn set_page(&self, page: usize) {
        if self.inner.closed.load(Ordering::SeqCst) {
            return;
        }
        if self.inner.inputs.borrow().page == page {
            return;
        }
        self.inner.inputs.send_modify(|inputs| inputs.page = page);
        ListInner::reload(&self.inner);
    }

    /// Re-run the current query after a failure.
    pub fn retry(&self) {
        if self.inner.closed.load(Ordering::SeqCst) {
            return;
        }
        ListInner::reload(&self.inner);
    }

    /// Stop the screen: nothing publishes after this, and in-flight work is
    /// aborted.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.debounce.abort();
        self.inner.listing.shutdown();
    }

    fn schedule_debounced_reload(&self) {
        let inner = Arc::clone(&self.inner);
        // installing the sleeper aborts the previous one, restarting the
        // quiet period
        self.inner.debounce.install(tokio::spawn(async move {
            sleep(FILTER_DEBOUNCE).await;
            debug!("filter debounce elapsed");
            ListInner::reload(&inner);
        }));
    }
}

impl ListInner {
    fn reload(inner: &Arc<Self>) {
        if inner.closed.load(Ordering::SeqCst) {
            return;
        }
        let seq = inner.listing.begin();
        let request = {
            let inputs = inner.inputs.borrow();
            ListRequest {
                filters: inputs.filters.clone(),
                sort: inputs.sort,
                page: inputs.page,
                page_size: DEFAULT_PAGE_SIZE,
            }
        };
        let task = Arc::clone(inner);
        inner.listing.track(tokio::spawn(async move {
            let result = task.api.list_tickets(request).await;
            task.listing.finish(seq, &task.closed, result);
        }));
    }
}

impl Drop for ListScreen {
    fn drop(&mut self) {
        self.close();
    }
}
