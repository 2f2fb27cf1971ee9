//! Core domain logic for the task list.
//! This crate is the single source of truth for task invariants and storage.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::task::{Task, TaskId, TaskValidationError, MIN_TITLE_CHARS};
pub use service::task_service::{
    MessageLevel, StatusMessage, TaskCounts, TaskListing, TaskOutcome, TaskService, TaskView,
};
pub use store::{
    find_task, JsonFileTaskStore, MemoryTaskStore, StoreError, StoreResult, TaskStore,
};

/// Minimal health-check API used by the `/health` endpoint.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
