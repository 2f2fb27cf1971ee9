//! In-process task store for tests and ephemeral runs.

use super::{StoreResult, TaskStore};
use crate::model::task::Task;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keeps the collection in memory; every save replaces it wholesale.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    // A panicking writer either replaced the whole vector or left it alone,
    // so the collection behind a poisoned lock is still consistent.
    fn guard(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskStore for MemoryTaskStore {
    fn ensure_storage(&self) -> StoreResult<()> {
        Ok(())
    }

    fn load_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.guard().clone())
    }

    fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        *self.guard() = tasks.to_vec();
        Ok(())
    }
}
