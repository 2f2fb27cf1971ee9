//! Shared application state.
//!
//! # Invariants
//! - Every load-modify-save sequence runs under the single service lock, so
//!   concurrent requests in one process cannot lose each other's updates.
//! - Store I/O runs on the blocking pool, never on async worker threads.

use crate::error::{WebError, WebResult};
use std::sync::{Arc, Mutex};
use tasklist_core::{StoreResult, TaskService, TaskStore};

pub type DynTaskStore = Box<dyn TaskStore + Send>;

#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<TaskService<DynTaskStore>>>,
}

impl AppState {
    pub fn new(store: impl TaskStore + Send + 'static) -> Self {
        let store: DynTaskStore = Box::new(store);
        Self {
            service: Arc::new(Mutex::new(TaskService::new(store))),
        }
    }

    /// Runs `op` against the service while holding the writer lock.
    pub async fn run<T, F>(&self, op: F) -> WebResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&TaskService<DynTaskStore>) -> StoreResult<T> + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || {
            let guard = service.lock().map_err(|_| WebError::LockPoisoned)?;
            op(&guard).map_err(WebError::from)
        })
        .await?
    }
}
