use thiserror::Error;

/// Failures that stop the workflow because a collaborator could not be asked.
///
/// Answers such as "the user canceled" or "the server rejected the link" are
/// not errors; they come back as values.
#[derive(Debug, Error)]
pub enum WorkItemBranchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not resolve server context: {0}")]
    ServerContext(String),
}

impl WorkItemBranchError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn server_context(msg: impl Into<String>) -> Self {
        Self::ServerContext(msg.into())
    }
}

/// A row index outside `[0, len)`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("row {index} out of range (row count {len})")]
pub struct OutOfRangeError {
    pub index: usize,
    pub len: usize,
}
