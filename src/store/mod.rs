//! In-memory ticket store.
//!
//! The store owns the ticket and comment collections and is the sole source
//! of truth for the process. Everything else works on clones handed out by
//! the accessors; nothing outside this module can reach into the stored
//! records. All access goes through the data-access service, which wraps one
//! instance per process behind a mutex.

pub mod seed;

use jiff::Timestamp;

use crate::types::{CURRENT_USER, Comment, CommentId, NewTicket, Ticket, TicketId, TicketPatch};

pub struct TicketStore {
    tickets: Vec<Ticket>,
    comments: Vec<Comment>,
    next_comment_id: CommentId,
}

impl TicketStore {
    /// Empty store. Mostly useful in tests; production code starts from
    /// [`seed::seeded_store`].
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    /// Store pre-populated with existing records. The comment id counter
    /// picks up after the seeded comments, matching the numbering the
    /// backend this mock stands in for would produce.
    pub fn with_data(tickets: Vec<Ticket>, comments: Vec<Comment>) -> Self {
        let next_comment_id = comments.len() as CommentId + 1;
        Self {
            tickets,
            comments,
            next_comment_id,
        }
    }

    /// Snapshot of every ticket, in insertion order.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets.clone()
    }

    /// Copy of the ticket with the given id, if present.
    pub fn ticket(&self, id: TicketId) -> Option<Ticket> {
        self.tickets.iter().find(|t| t.id == id).cloned()
    }

    pub fn contains(&self, id: TicketId) -> bool {
        self.tickets.iter().any(|t| t.id == id)
    }

    /// Insert a new ticket and return a copy of the stored record.
    ///
    /// The assigned id is one past the highest id in the store, or 1 for an
    /// empty store. Creation and update time are set together, so a fresh
    /// ticket always has `created_at == updated_at`.
    pub fn insert(&mut self, fields: NewTicket) -> Ticket {
        let id = self.tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let now = Timestamp::now();
        let ticket = Ticket {
            id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            category: fields.category,
            assignee: fields.assignee,
            created_at: now,
            updated_at: now,
        };
        self.tickets.push(ticket.clone());
        ticket
    }

    /// Merge a patch over the ticket with the given id and return a copy of
    /// the result, or `None` when the id is absent.
    ///
    /// The id, creation time and position in the collection never change;
    /// `updated_at` always advances, even for a patch with no fields set.
    pub fn update(&mut self, id: TicketId, patch: TicketPatch) -> Option<Ticket> {
        let ticket = self.tickets.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = patch.title {
            ticket.title = title;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
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
        if let Some(assignee) = patch.assignee {
            ticket.assignee = assignee;
        }
        ticket.updated_at = Timestamp::now();
        Some(ticket.clone())
    }

    /// Copies of one ticket's comments, oldest first. Equal timestamps keep
    /// insertion order.
    pub fn comments_for(&self, ticket_id: TicketId) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.ticket_id == ticket_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments
    }

    /// Append a comment to an existing ticket's thread and return a copy,
    /// or `None` when the ticket is absent. Comment ids are sequential
    /// across the whole store and never reused; the author is always the
    /// current-user sentinel.
    pub fn add_comment(&mut self, ticket_id: TicketId, message: &str) -> Option<Comment> {
        if !self.contains(ticket_id) {
            return None;
        }
        let comment = Comment {
            id: self.next_comment_id,
            ticket_id,
            author: CURRENT_USER.to_string(),
            message: message.to_string(),
            created_at: Timestamp::now(),
        };
        self.next_comment_id += 1;
        self.comments.push(comment.clone());
        Some(comment)
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TicketCategory, TicketPriority, TicketStatus};

    fn sample_fields(title: &str) -> NewTicket {
        NewTicket {
            title: title.to_string(),
            description: "A description long enough to pass form validation.".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            category: TicketCategory::Tech,
            assignee: "Ana Torres".to_string(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = TicketStore::new();
        let first = store.insert(sample_fields("First ticket"));
        let second = store.insert(sample_fields("Second ticket"));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_insert_continues_after_highest_id() {
        let mut store = seed::seeded_store();
        let created = store.insert(sample_fields("Fresh ticket"));
        assert_eq!(created.id, 51);
        assert!(store.tickets().iter().filter(|t| t.id == 51).count() == 1);
    }

    #[test]
    fn test_insert_sets_created_equal_to_updated() {
        let mut store = TicketStore::new();
        let ticket = store.insert(sample_fields("Fresh ticket"));
        assert_eq!(ticket.created_at, ticket.updated_at);
    }

    #[test]
    fn test_update_merges_and_advances_updated_at() {
        let mut store = seed::seeded_store();
        let before = store.ticket(3).unwrap();

        let updated = store
            .update(3, TicketPatch::status(TicketStatus::Done))
            .unwrap();

        assert_eq!(updated.id, 3);
        assert_eq!(updated.status, TicketStatus::Done);
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at > before.updated_at);
    }

    #[test]
    fn test_update_preserves_position() {
        let mut store = seed::seeded_store();
        let index_before = store.tickets().iter().position(|t| t.id == 3).unwrap();
        store.update(3, TicketPatch::priority(TicketPriority::Low));
        let index_after = store.tickets().iter().position(|t| t.id == 3).unwrap();
        assert_eq!(index_before, index_after);
    }

    #[test]
    fn test_update_missing_id_returns_none() {
        let mut store = TicketStore::new();
        assert!(store.update(99, TicketPatch::default()).is_none());
    }

    #[test]
    fn test_returned_copies_do_not_alias_the_store() {
        let mut store = seed::seeded_store();
        let mut copy = store.ticket(1).unwrap();
        copy.title = "Mutated copy".to_string();
        assert_ne!(store.ticket(1).unwrap().title, "Mutated copy");
    }

    #[test]
    fn test_comment_ids_strictly_increase() {
        let mut store = seed::seeded_store();
        let a = store.add_comment(1, "First note on the thread").unwrap();
        let b = store.add_comment(2, "Second note, other ticket").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_comment_counter_seeded_from_initial_data() {
        let mut store = seed::seeded_store();
        let seeded = seed::seed_comments().len() as u32;
        let comment = store.add_comment(1, "Fresh comment").unwrap();
        assert_eq!(comment.id, seeded + 1);
    }

    #[test]
    fn test_add_comment_fixes_author_sentinel() {
        let mut store = seed::seeded_store();
        let comment = store.add_comment(5, "Looks resolved now").unwrap();
        assert_eq!(comment.author, CURRENT_USER);
        assert_eq!(comment.ticket_id, 5);
    }

    #[test]
    fn test_add_comment_rejects_missing_ticket() {
        let mut store = seed::seeded_store();
        assert!(store.add_comment(999, "Orphan comment").is_none());
    }

    #[test]
    fn test_comments_for_filters_and_sorts_ascending() {
        let mut store = seed::seeded_store();
        store.add_comment(1, "Newest comment").unwrap();

        let comments = store.comments_for(1);
        assert!(!comments.is_empty());
        assert!(comments.iter().all(|c| c.ticket_id == 1));
        assert!(
            comments
                .windows(2)
                .all(|pair| pair[0].created_at <= pair[1].created_at)
        );
        assert_eq!(comments.last().unwrap().message, "Newest comment");
    }
}
