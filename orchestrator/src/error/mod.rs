use thiserror::Error;

use crate::core::client::database::DatabaseError;

/// Result type for orchestrator startup and lifecycle operations.
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Run command error: {0}")]
    RunCommand(String),

    #[error("Server error: {0}")]
    Server(String),
}
