//! Filter, sort and paginate pipeline for ticket listings.
//!
//! Filters compose through a small trait so the criteria a listing was
//! built from stay separate from how they are evaluated. All provided
//! criteria must match (AND composition); absent or empty criteria are
//! no-ops.

use crate::types::{Ticket, TicketCategory, TicketPriority, TicketStatus};

pub mod sort;

pub use sort::{SortField, VALID_SORT_FIELDS, sort_by_priority, sort_by_updated, sort_tickets_by};

/// Page size used by the list screen and the `ls` command.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Trait for ticket filters
pub trait TicketFilter: Send + Sync {
    fn matches(&self, ticket: &Ticket) -> bool;
}

/// Free-text filter: case-insensitive substring match on title OR
/// description.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase(),
        }
    }
}

impl TicketFilter for SearchFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.title.to_lowercase().contains(&self.query)
            || ticket.description.to_lowercase().contains(&self.query)
    }
}

/// Filter tickets by status
pub struct StatusFilter {
    target_status: TicketStatus,
}

impl StatusFilter {
    pub fn new(status: TicketStatus) -> Self {
        Self {
            target_status: status,
        }
    }
}

impl TicketFilter for StatusFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.status == self.target_status
    }
}

/// Filter tickets by priority
pub struct PriorityFilter {
    target_priority: TicketPriority,
}

impl PriorityFilter {
    pub fn new(priority: TicketPriority) -> Self {
        Self {
            target_priority: priority,
        }
    }
}

impl TicketFilter for PriorityFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.priority == self.target_priority
    }
}

/// Filter tickets by category
pub struct CategoryFilter {
    target_category: TicketCategory,
}

impl CategoryFilter {
    pub fn new(category: TicketCategory) -> Self {
        Self {
            target_category: category,
        }
    }
}

impl TicketFilter for CategoryFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.category == self.target_category
    }
}

/// Filter tickets by exact assignee name
pub struct AssigneeFilter {
    assignee: String,
}

impl AssigneeFilter {
    pub fn new(assignee: &str) -> Self {
        Self {
            assignee: assignee.to_string(),
        }
    }
}

impl TicketFilter for AssigneeFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.assignee == self.assignee
    }
}

/// The criteria a listing screen collects from its filter form.
///
/// This is the plain-data side of the pipeline: it travels through screens
/// and requests by value and only becomes trait-object filters at query
/// time. `None` and `""` both mean "don't filter on this dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilters {
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
    pub assignee: Option<String>,
}

impl TicketFilters {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(str::is_empty)
            && self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.assignee.as_deref().is_none_or(str::is_empty)
    }

    fn to_filters(&self) -> Vec<Box<dyn TicketFilter>> {
        let mut filters: Vec<Box<dyn TicketFilter>> = Vec::new();
        if let Some(search) = self.search.as_deref() {
            if !search.is_empty() {
                filters.push(Box::new(SearchFilter::new(search)));
            }
        }
        if let Some(status) = self.status {
            filters.push(Box::new(StatusFilter::new(status)));
        }
        if let Some(priority) = self.priority {
            filters.push(Box::new(PriorityFilter::new(priority)));
        }
        if let Some(category) = self.category {
            filters.push(Box::new(CategoryFilter::new(category)));
        }
        if let Some(assignee) = self.assignee.as_deref() {
            if !assignee.is_empty() {
                filters.push(Box::new(AssigneeFilter::new(assignee)));
            }
        }
        filters
    }
}

/// One page of a filtered listing. `total` counts the whole filtered set,
/// before pagination.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TicketPage {
    pub items: Vec<Ticket>,
    pub total: usize,
}

/// Number of pages a filtered set of `total` records spans.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// An executed query configuration that can be applied to ticket data.
/// Configuration is separate from execution so a screen can re-apply the
/// same query on retry.
pub struct TicketQuery {
    filters: Vec<Box<dyn TicketFilter>>,
    sort_by: SortField,
    page: usize,
    page_size: usize,
}

impl TicketQuery {
    /// Apply this query to a snapshot of the store: filter, then a stable
    /// sort, then a 1-based page window clipped to the filtered length.
    pub fn apply(&self, tickets: &[Ticket]) -> TicketPage {
        let mut filtered: Vec<Ticket> = tickets
            .iter()
            .filter(|t| self.filters.iter().all(|f| f.matches(t)))
            .cloned()
            .collect();

        sort::sort_tickets_by(&mut filtered, self.sort_by);

        let total = filtered.len();
        let page = self.page.max(1);
        let start = (page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        let items = filtered[start..end].to_vec();

        TicketPage { items, total }
    }
}

/// Query builder for filtering, sorting and paging tickets
pub struct TicketQueryBuilder {
    filters: Vec<Box<dyn TicketFilter>>,
    sort_by: SortField,
    page: usize,
    page_size: usize,
}

impl TicketQueryBuilder {
    /// Create a new query builder with default settings
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_by: SortField::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Add a filter to the query (AND composition)
    pub fn with_filter(mut self, filter: Box<dyn TicketFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add every filter a criteria struct carries
    pub fn with_criteria(mut self, criteria: &TicketFilters) -> Self {
        self.filters.extend(criteria.to_filters());
        self
    }

    /// Set the sort field
    pub fn with_sort(mut self, sort_by: SortField) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set the 1-based page window
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Build the query configuration from this builder.
    pub fn build(self) -> TicketQuery {
        TicketQuery {
            filters: self.filters,
            sort_by: self.sort_by,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

impl Default for TicketQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
