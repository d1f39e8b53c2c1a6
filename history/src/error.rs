//! Errors shared by the TUI and headless command handling.

use history_core::{PersistError, RankingError, ServiceError};
use thiserror::Error;

/// Reasons a command could not be carried out.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No console selected")]
    NoConsoleSelected,

    #[error("No quiz in progress")]
    NoQuiz,

    #[error("The catalog has no games with descriptions")]
    EmptyQuiz,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
