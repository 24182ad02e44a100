use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::domain::task::Task;

/// A flat JSON file holding every task keyed by id. Rewritten in full on each save.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    pub fn path(&self) -> &Path { &self.path }

    /// Reads the file back. A missing file is an empty store; anything unreadable is an error.
    pub async fn load(&self) -> Result<HashMap<String, Task>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e).with_context(|| format!("reading {}", self.path.display())),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }
        let stored: HashMap<String, Task> = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", self.path.display()))?;

        let mut tasks = HashMap::with_capacity(stored.len());
        for task in stored.into_values() {
            if task.id.as_str().is_empty() {
                bail!("{} contains a task without an id", self.path.display());
            }
            tasks.insert(task.id.0.clone(), task);
        }
        Ok(tasks)
    }

    pub async fn save(&self, tasks: &HashMap<String, Task>) -> Result<()> {
        let mut body = serde_json::to_vec_pretty(tasks)?;
        body.push(b'\n');
        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("writing {}", self.path.display()))
    }
}
