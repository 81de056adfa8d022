//! Deterministic seed data for the simulated backend.
//!
//! Fifty tickets generated by cycling fixed title/description/status/
//! priority/category/assignee tables, plus a handful of comments on the
//! early tickets. All timestamps hang off a fixed anchor instead of the
//! wall clock, so the dataset (and everything sorted or paged over it) is
//! identical on every run.

use jiff::{SignedDuration, Timestamp};

use crate::store::TicketStore;
use crate::types::{ASSIGNEES, Comment, Ticket, TicketCategory, TicketPriority, TicketStatus};

pub const SEED_TICKET_COUNT: usize = 50;

const STATUS_CYCLE: &[TicketStatus] = &[
    TicketStatus::Open,
    TicketStatus::InProgress,
    TicketStatus::Done,
];

const PRIORITY_CYCLE: &[TicketPriority] = &[
    TicketPriority::High,
    TicketPriority::Medium,
    TicketPriority::Low,
    TicketPriority::High,
    TicketPriority::Medium,
];

const CATEGORY_CYCLE: &[TicketCategory] = &[
    TicketCategory::Tech,
    TicketCategory::Billing,
    TicketCategory::Other,
    TicketCategory::Tech,
    TicketCategory::Billing,
];

const TITLES: &[&str] = &[
    "Login failure on mobile devices",
    "Invoice total does not match order summary",
    "Password reset email not received",
    "App crashes when uploading attachments",
    "Payment declined despite valid card",
    "Unable to export reports to PDF",
    "Dashboard widgets not loading data",
    "Two-factor authentication code not working",
    "Subscription plan not updated after payment",
    "Search results returning incorrect tickets",
    "Notifications not delivered via email",
    "Profile picture upload failing silently",
    "Account locked after single failed attempt",
    "Billing address cannot be updated",
    "API rate limiting causing client timeouts",
    "Webhook events not firing on ticket update",
    "CSV import rejecting valid file format",
    "Tag filter not persisting between sessions",
    "Role permissions not applied after reassignment",
    "Ticket priority dropdown missing HIGH option",
];

const DESCRIPTIONS: &[&str] = &[
    "The user attempts to sign in from iOS 17 or Android 14 and receives a generic error message with no further details.",
    "The invoice PDF shows a subtotal that does not reflect the applied discount code, causing confusion for the accounting team.",
    "After requesting a password reset, the email is never delivered. Spam folder confirmed empty. Issue reproduced across multiple accounts.",
    "When a file larger than 5 MB is selected, the application freezes and must be force-closed. No error toast is shown.",
    "The charge is attempted and immediately declined by the gateway, yet the card is valid and has sufficient funds.",
    "Clicking the Export button triggers a spinner that never resolves. The issue is consistent across Chrome and Firefox.",
    "The dashboard loads but widgets remain empty. The network tab shows 200 responses with valid JSON payloads.",
    "The six-digit TOTP code is rejected on the second step of login. The device clock is synchronized correctly.",
    "After upgrading to the Pro plan, the feature set remains identical to the Free tier. Cache cleared, issue persists.",
    "Submitting a keyword that matches known tickets returns zero results. Full-text search appears to be broken.",
    "Email notifications for new ticket assignments are not received by any team member regardless of notification settings.",
    "The profile picture uploader accepts the file and shows a progress bar to 100%, but the avatar does not change.",
    "After one wrong password the account is immediately locked, forcing an admin unlock on every mistype.",
    "Attempting to update the billing address in account settings produces a 422 validation error for all inputs.",
    "Customers report HTTP 429 responses during normal usage patterns well below documented limits.",
    "Webhook configured for ticket.updated events never delivers a payload to the registered endpoint.",
    "The CSV import wizard shows \"Invalid format\" for a file that matches the documented schema exactly.",
    "Tag filters selected in the sidebar are reset to default every time the browser tab is refreshed.",
    "Changing a user's role from Viewer to Editor does not grant edit permissions until the user logs out and back in.",
    "The priority selector in the ticket creation form shows only LOW and MEDIUM, the HIGH option is missing from the list.",
];

// 2025-09-01T00:00:00Z
const SEED_EPOCH_SECOND: i64 = 1_756_684_800;

/// Fixed anchor all seed timestamps are computed from.
pub fn seed_epoch() -> Timestamp {
    Timestamp::UNIX_EPOCH + SignedDuration::from_secs(SEED_EPOCH_SECOND)
}

fn days_before(days: i64) -> Timestamp {
    seed_epoch() - SignedDuration::from_secs(days * 86_400)
}

fn hours_before(hours: i64) -> Timestamp {
    seed_epoch() - SignedDuration::from_secs(hours * 3_600)
}

/// The fifty seed tickets, ids 1 through 50.
///
/// Ticket `i` (0-based) was created `50 - i` days before the anchor and
/// last updated `max(0, 25 - i/2)` days before it, so later ids are both
/// newer and more recently touched.
pub fn seed_tickets() -> Vec<Ticket> {
    (0..SEED_TICKET_COUNT)
        .map(|i| Ticket {
            id: i as u32 + 1,
            title: TITLES[i % TITLES.len()].to_string(),
            description: DESCRIPTIONS[i % DESCRIPTIONS.len()].to_string(),
            status: STATUS_CYCLE[i % STATUS_CYCLE.len()],
            priority: PRIORITY_CYCLE[i % PRIORITY_CYCLE.len()],
            category: CATEGORY_CYCLE[i % CATEGORY_CYCLE.len()],
            assignee: ASSIGNEES[i % ASSIGNEES.len()].to_string(),
            created_at: days_before(50 - i as i64),
            updated_at: days_before((25 - i as i64 / 2).max(0)),
        })
        .collect()
}

/// Seed comments on the early tickets. Agents on the roster, not the
/// current user, so the comment id counter starts above 1.
pub fn seed_comments() -> Vec<Comment> {
    let entries: &[(u32, &str, &str, i64)] = &[
        (
            1,
            "María López",
            "Reproducido en Android 14. Revisando los registros del gateway de autenticación.",
            96,
        ),
        (
            1,
            "Carlos Ruiz",
            "El fallo coincide con el despliegue del viernes. Preparando rollback en staging.",
            72,
        ),
        (
            2,
            "Ana Torres",
            "El descuento se aplica después de generar el PDF. Corrección estimada para el próximo ciclo.",
            60,
        ),
        (
            3,
            "Diego Méndez",
            "Los correos quedan retenidos por el proveedor SMTP. Abierto ticket con soporte externo.",
            48,
        ),
        (
            3,
            "Lucía Fernández",
            "Confirmado: la plantilla de correo apunta a un dominio deshabilitado.",
            30,
        ),
        (
            3,
            "María López",
            "Dominio actualizado, pendiente de verificación en producción.",
            12,
        ),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(i, (ticket_id, author, message, hours_ago))| Comment {
            id: i as u32 + 1,
            ticket_id: *ticket_id,
            author: author.to_string(),
            message: message.to_string(),
            created_at: hours_before(*hours_ago),
        })
        .collect()
}

/// The store every command starts from.
pub fn seeded_store() -> TicketStore {
    TicketStore::with_data(seed_tickets(), seed_comments())
}
