use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub type TicketId = u32;
pub type CommentId = u32;

/// Author recorded on comments submitted from this client.
pub const CURRENT_USER: &str = "Tú";

/// The fixed assignee roster. The form only accepts members of this list.
pub const ASSIGNEES: &[&str] = &[
    "María López",
    "Carlos Ruiz",
    "Ana Torres",
    "Diego Méndez",
    "Lucía Fernández",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

enum_display_fromstr!(
    TicketStatus,
    crate::error::TaquillaError::InvalidStatus,
    {
        Open => "open",
        InProgress => "in_progress",
        Done => "done",
    }
);

pub const VALID_STATUSES: &[&str] = &["open", "in_progress", "done"];

/// Ord follows urgency: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

enum_display_fromstr!(
    TicketPriority,
    crate::error::TaquillaError::InvalidPriority,
    {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    Billing,
    Tech,
    Other,
}

enum_display_fromstr!(
    TicketCategory,
    crate::error::TaquillaError::InvalidCategory,
    {
        Billing => "billing",
        Tech => "tech",
        Other => "other",
    }
);

pub const VALID_CATEGORIES: &[&str] = &["billing", "tech", "other"];

/// A support ticket as served by the data-access layer.
///
/// Field names serialize in the backend's camelCase wire shape, enum values
/// in its SCREAMING_SNAKE_CASE spellings (`IN_PROGRESS`, `BILLING`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub assignee: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment on a ticket's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// Payload for creating a ticket. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub assignee: String,
}

/// Partial update merged over an existing ticket. Absent fields keep their
/// current value; id and creation time are never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
    pub assignee: Option<String>,
}

impl TicketPatch {
    /// Patch that only moves the ticket to a new status.
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Patch that only changes the ticket's priority.
    pub fn priority(priority: TicketPriority) -> Self {
        Self {
            priority: Some(priority),
            ..Default::default()
        }
    }
}
