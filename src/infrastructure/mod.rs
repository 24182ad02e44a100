pub mod in_memory_repo;
pub mod json_snapshot;
