//! Error types for the client and seller directories.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required field was blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
