use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::str::FromStr;

use crate::config::{Theme, VALID_THEMES};
use crate::query::{SortField, TicketFilters, VALID_SORT_FIELDS};
use crate::screen::{COMMENT_MIN_LEN, DESCRIPTION_MIN_LEN, ListInputs, TITLE_MIN_LEN};
use crate::types::{
    ASSIGNEES, TicketCategory, TicketPatch, TicketPriority, TicketStatus, VALID_CATEGORIES,
    VALID_PRIORITIES, VALID_STATUSES,
};

#[derive(Parser)]
#[command(name = "taquilla")]
#[command(about = "Support ticket tracking")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Ticket title (at least 5 characters)
        #[arg(value_parser = parse_title)]
        title: String,

        /// Description text (at least 20 characters)
        #[arg(short, long, value_parser = parse_description)]
        description: String,

        /// Priority: low, medium, high (case-insensitive, default: medium)
        #[arg(short, long, default_value = "medium", value_parser = parse_priority)]
        priority: TicketPriority,

        /// Category: billing, tech, other (case-insensitive, default: other)
        #[arg(short, long, default_value = "other", value_parser = parse_category)]
        category: TicketCategory,

        /// Assignee (must be on the board roster)
        #[arg(short, long, value_parser = parse_assignee)]
        assignee: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a ticket with its comment thread
    #[command(visible_alias = "s")]
    Show {
        /// Ticket ID (12 or #12)
        #[arg(value_parser = parse_id)]
        id: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit ticket fields
    #[command(visible_alias = "e")]
    #[command(group = ArgGroup::new("changes").required(true).multiple(true))]
    Edit {
        /// Ticket ID (12 or #12)
        #[arg(value_parser = parse_id)]
        id: u32,

        /// New title (at least 5 characters)
        #[arg(long, group = "changes", value_parser = parse_title)]
        title: Option<String>,

        /// New description (at least 20 characters)
        #[arg(long, group = "changes", value_parser = parse_description)]
        description: Option<String>,

        /// New status: open, in_progress, done (case-insensitive)
        #[arg(long, group = "changes", value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// New priority: low, medium, high (case-insensitive)
        #[arg(long, group = "changes", value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// New category: billing, tech, other (case-insensitive)
        #[arg(long, group = "changes", value_parser = parse_category)]
        category: Option<TicketCategory>,

        /// New assignee (must be on the board roster)
        #[arg(long, group = "changes", value_parser = parse_assignee)]
        assignee: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a comment to a ticket
    Comment {
        /// Ticket ID (12 or #12)
        #[arg(value_parser = parse_id)]
        id: u32,

        /// Comment text (at least 5 characters)
        #[arg(value_parser = parse_comment_message)]
        message: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set ticket status
    Status {
        /// Ticket ID (12 or #12)
        #[arg(value_parser = parse_id)]
        id: u32,

        /// New status: open, in_progress, done (case-insensitive)
        #[arg(value_parser = parse_status)]
        status: TicketStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set ticket priority
    Priority {
        /// Ticket ID (12 or #12)
        #[arg(value_parser = parse_id)]
        id: u32,

        /// New priority: low, medium, high (case-insensitive)
        #[arg(value_parser = parse_priority)]
        priority: TicketPriority,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tickets with optional filters
    #[command(visible_alias = "l")]
    Ls {
        /// Filter by text in title or description
        #[arg(long)]
        search: Option<String>,

        /// Filter by status: open, in_progress, done (case-insensitive)
        #[arg(long, value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// Filter by priority: low, medium, high (case-insensitive)
        #[arg(long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// Filter by category: billing, tech, other (case-insensitive)
        #[arg(long, value_parser = parse_category)]
        category: Option<TicketCategory>,

        /// Filter by assignee (must be on the board roster)
        #[arg(long, value_parser = parse_assignee)]
        assignee: Option<String>,

        /// Sort tickets by field (updated_at, priority; default: updated_at)
        #[arg(long, default_value = "updated_at", value_parser = parse_sort)]
        sort: SortField,

        /// Page to show (default: 1)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the board theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the current theme
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the theme
    Set {
        /// Theme: light, dark (case-insensitive)
        #[arg(value_parser = parse_theme)]
        theme: Theme,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch to the other theme
    Toggle {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            cmd_comment, cmd_create, cmd_edit, cmd_ls, cmd_priority, cmd_show, cmd_status,
            cmd_theme_set, cmd_theme_show, cmd_theme_toggle,
        };

        match self {
            Commands::Create {
                title,
                description,
                priority,
                category,
                assignee,
                json,
            } => cmd_create(title, description, priority, category, assignee, json).await,

            Commands::Show { id, json } => cmd_show(id, json).await,

            Commands::Edit {
                id,
                title,
                description,
                status,
                priority,
                category,
                assignee,
                json,
            } => {
                let changes = TicketPatch {
                    title,
                    description,
                    status,
                    priority,
                    category,
                    assignee,
                };
                cmd_edit(id, changes, json).await
            }

            Commands::Comment { id, message, json } => cmd_comment(id, &message, json).await,

            Commands::Status { id, status, json } => cmd_status(id, status, json).await,

            Commands::Priority { id, priority, json } => cmd_priority(id, priority, json).await,

            Commands::Ls {
                search,
                status,
                priority,
                category,
                assignee,
                sort,
                page,
                json,
            } => {
                let inputs = ListInputs {
                    filters: TicketFilters {
                        search,
                        status,
                        priority,
                        category,
                        assignee,
                    },
                    sort,
                    page,
                };
                cmd_ls(inputs, json).await
            }

            Commands::Theme { action } => match action {
                ThemeAction::Show { json } => cmd_theme_show(json).await,
                ThemeAction::Set { theme, json } => cmd_theme_set(theme, json).await,
                ThemeAction::Toggle { json } => cmd_theme_toggle(json).await,
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_priority(s: &str) -> Result<TicketPriority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        VALID_PRIORITIES,
    )
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    parse_with_validation(
        s,
        |v| TicketStatus::from_str(v).map_err(|_| String::new()),
        "status",
        VALID_STATUSES,
    )
}

fn parse_category(s: &str) -> Result<TicketCategory, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "category",
        VALID_CATEGORIES,
    )
}

fn parse_sort(s: &str) -> Result<SortField, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "sort",
        VALID_SORT_FIELDS,
    )
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "theme",
        VALID_THEMES,
    )
}

fn parse_id(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    digits
        .parse()
        .map_err(|_| format!("Invalid ticket ID '{s}'. Must be a number like 12 or #12"))
}

fn parse_title(s: &str) -> Result<String, String> {
    let title = s.trim();
    if title.is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() < TITLE_MIN_LEN {
        return Err(format!(
            "Title must be at least {TITLE_MIN_LEN} characters"
        ));
    }
    Ok(title.to_string())
}

fn parse_description(s: &str) -> Result<String, String> {
    let description = s.trim();
    if description.is_empty() {
        return Err("Description cannot be empty".to_string());
    }
    if description.chars().count() < DESCRIPTION_MIN_LEN {
        return Err(format!(
            "Description must be at least {DESCRIPTION_MIN_LEN} characters"
        ));
    }
    Ok(description.to_string())
}

fn parse_comment_message(s: &str) -> Result<String, String> {
    let message = s.trim();
    if message.is_empty() {
        return Err("Comment cannot be empty".to_string());
    }
    if message.chars().count() < COMMENT_MIN_LEN {
        return Err(format!(
            "Comment must be at least {COMMENT_MIN_LEN} characters"
        ));
    }
    Ok(message.to_string())
}

fn parse_assignee(s: &str) -> Result<String, String> {
    ASSIGNEES
        .iter()
        .find(|a| a.eq_ignore_ascii_case(s.trim()))
        .map(|a| a.to_string())
        .ok_or_else(|| {
            format!(
                "Unknown assignee '{}'. Must be one of: {}",
                s,
                ASSIGNEES.join(", ")
            )
        })
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "taquilla", &mut io::stdout());
}
