use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaquillaError {
    #[error("ticket #{0} not found")]
    TicketNotFound(u32),

    #[error("could not load {0}")]
    LoadFailed(&'static str),

    #[error("could not save {0}")]
    SaveFailed(&'static str),

    #[error("invalid ticket id '{0}'")]
    InvalidTicketId(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    #[error("invalid sort field '{0}'")]
    InvalidSortField(String),

    #[error("invalid theme '{0}'")]
    InvalidTheme(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaquillaError>;
