//! Error types for xpost

use thiserror::Error;

pub type Result<T> = std::result::Result<T, XpostError>;

#[derive(Error, Debug)]
pub enum XpostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl XpostError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            XpostError::Platform(PlatformError::Authentication(_)) => 2,
            XpostError::Content(ContentError::UnknownCategory(_))
            | XpostError::Content(ContentError::EmptyCategory(_))
            | XpostError::Content(ContentError::IndexOutOfRange { .. }) => 3,
            XpostError::Schedule(_) => 3,
            XpostError::Config(_) => 1,
            XpostError::Content(_) => 1,
            XpostError::Platform(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API credential: {0}")]
    MissingCredential(String),

    #[error("Must specify either --category or --run-schedule")]
    MissingMode,
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    NotFound(String),

    #[error("Failed to read content file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Content file is malformed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Category '{0}' not found in database")]
    UnknownCategory(String),

    #[error("No posts available for category '{0}'")]
    EmptyCategory(String),

    #[error("Index {index} is out of range (0 to {max})")]
    IndexOutOfRange { index: usize, max: usize },
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid time format '{0}'. Use HH:MM (e.g., 09:00)")]
    InvalidTimeFormat(String),
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Content validation failed: {0}")]
    Validation(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
}
