use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{
    error::RepositoryError,
    repository::{RepoResult, TaskRepository},
    task::{Task, TaskDraft, TaskId, TaskStatus},
};

use super::json_snapshot::JsonSnapshot;

#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    pub(crate) tasks: Arc<RwLock<HashMap<String, Task>>>,
    snapshot: Option<Arc<Snapshotter>>,
}

/// Serializes snapshot writes so an older map can never land after a newer one.
struct Snapshotter {
    file: JsonSnapshot,
    writer: Mutex<()>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self { Self::default() }

    /// Loads `file` (if it exists) and writes the whole map back to it after every mutation.
    pub async fn with_snapshot(file: JsonSnapshot) -> anyhow::Result<Self> {
        let tasks = file.load().await?;
        tracing::info!(path = %file.path().display(), count = tasks.len(), "loaded task snapshot");
        Ok(Self {
            tasks: Arc::new(RwLock::new(tasks)),
            snapshot: Some(Arc::new(Snapshotter { file, writer: Mutex::new(()) })),
        })
    }

    pub fn is_persistent(&self) -> bool { self.snapshot.is_some() }

    /// Runs `mutate` under the write lock, then persists a copy of the map with the lock released.
    async fn mutate<T: Send>(
        &self,
        mutate: impl FnOnce(&mut HashMap<String, Task>) -> RepoResult<T> + Send,
    ) -> RepoResult<T> {
        let Some(snapshot) = &self.snapshot else {
            let mut map = self.tasks.write().await;
            return mutate(&mut map);
        };

        let _writer = snapshot.writer.lock().await;
        let (out, copy) = {
            let mut map = self.tasks.write().await;
            let out = mutate(&mut map)?;
            (out, map.clone())
        };
        if let Err(e) = snapshot.file.save(&copy).await {
            tracing::error!(error = ?e, path = %snapshot.file.path().display(), "failed to save task snapshot");
        }
        Ok(out)
    }
}

fn parse_status(raw: Option<&str>) -> RepoResult<Option<TaskStatus>> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, draft: TaskDraft) -> RepoResult<Task> {
        let status = parse_status(draft.status.as_deref())?.unwrap_or_default();
        let task = Task {
            id: TaskId::generate(),
            title: draft.title,
            description: draft.description.unwrap_or_default(),
            status,
            created_at: Utc::now(),
        };
        self.mutate(|map| {
            map.insert(task.id.0.clone(), task.clone());
            Ok(())
        })
        .await?;
        tracing::debug!(id = %task.id, "task created");
        Ok(task)
    }

    async fn list(&self) -> RepoResult<Vec<Task>> {
        let map = self.tasks.read().await;
        let mut all: Vec<Task> = map.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.0.cmp(&b.id.0)));
        Ok(all)
    }

    async fn get(&self, id: &TaskId) -> RepoResult<Task> {
        let map = self.tasks.read().await;
        map.get(id.as_str()).cloned().ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn update(&self, id: &TaskId, draft: TaskDraft) -> RepoResult<Task> {
        let updated = self
            .mutate(|map| {
                let Some(existing) = map.get(id.as_str()) else {
                    return Err(RepositoryError::NotFound(id.clone()));
                };
                let status = match draft.status.as_deref() {
                    Some(raw) => raw.parse::<TaskStatus>()?,
                    None => return Err(RepositoryError::InvalidStatus(String::new())),
                };
                let task = Task {
                    id: existing.id.clone(),
                    title: draft.title,
                    description: draft.description.unwrap_or_default(),
                    status,
                    created_at: existing.created_at,
                };
                map.insert(id.0.clone(), task.clone());
                Ok(task)
            })
            .await?;
        tracing::debug!(id = %updated.id, status = %updated.status, "task updated");
        Ok(updated)
    }

    async fn delete(&self, id: &TaskId) -> RepoResult<()> {
        self.mutate(|map| match map.remove(id.as_str()) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id.clone())),
        })
        .await?;
        tracing::debug!(%id, "task deleted");
        Ok(())
    }
}
