use thiserror::Error;

use super::task::TaskId;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("invalid task status: {0:?}")]
    InvalidStatus(String),
    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),
}
