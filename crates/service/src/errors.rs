use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("user already voted")]
    AlreadyVoted,
    #[error("invalid option")]
    InvalidOption,
    #[error("poll has ended")]
    PollClosed,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("malformed data store: {0}")]
    MalformedStore(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}
