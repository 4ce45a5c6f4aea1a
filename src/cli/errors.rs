use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid book id: {id}. Book ids start at 1")]
    InvalidBookId { id: u64 },

    #[error("Target must be greater than 0, got: {target}")]
    ZeroTarget { target: usize },

    #[error(transparent)]
    Tracker(#[from] booktrack::Error),
}
