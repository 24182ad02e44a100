use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TASKS_FILE: &str = "task.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` keeps everything in memory.
    pub tasks_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .with_context(|| format!("BIND_ADDR={raw_addr:?} is not a socket address"))?;

        let in_memory = lookup("TASKS_STORE").is_some_and(|v| v.eq_ignore_ascii_case("memory"));
        let tasks_file = match lookup("TASKS_FILE") {
            _ if in_memory => None,
            Some(path) if path.is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_TASKS_FILE)),
        };

        Ok(Self { bind_addr, tasks_file })
    }
}
