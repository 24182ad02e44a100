use async_trait::async_trait;

use super::error::RepositoryError;
use super::task::{Task, TaskDraft, TaskId};

pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Stores a new task under a freshly generated id. An absent or empty status becomes `Todo`.
    async fn create(&self, draft: TaskDraft) -> RepoResult<Task>;
    async fn list(&self) -> RepoResult<Vec<Task>>;
    async fn get(&self, id: &TaskId) -> RepoResult<Task>;
    /// Replaces title, description and status. `id` and `created_at` are kept.
    async fn update(&self, id: &TaskId, draft: TaskDraft) -> RepoResult<Task>;
    async fn delete(&self, id: &TaskId) -> RepoResult<()>;
}
