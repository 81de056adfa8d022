//! Sort functions for ticket listings.
//!
//! Both orderings are stable: tickets that compare equal keep the relative
//! order they had in the store, which is what the pagination tests pin.

use crate::types::Ticket;

/// Sort field for ticket listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    UpdatedAt,
    Priority,
}

enum_display_fromstr!(
    SortField,
    crate::error::TaquillaError::InvalidSortField,
    {
        UpdatedAt => "updated_at",
        Priority => "priority",
    }
);

pub const VALID_SORT_FIELDS: &[&str] = &["updated_at", "priority"];

/// Sort tickets by last update, most recent first
pub fn sort_by_updated(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Sort tickets by priority, HIGH before MEDIUM before LOW
pub fn sort_by_priority(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| b.priority.cmp(&a.priority));
}

/// Sort tickets by the specified field
pub fn sort_tickets_by(tickets: &mut [Ticket], sort_by: SortField) {
    match sort_by {
        SortField::UpdatedAt => sort_by_updated(tickets),
        SortField::Priority => sort_by_priority(tickets),
    }
}
