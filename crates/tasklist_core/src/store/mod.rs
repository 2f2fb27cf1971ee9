//! Task storage contracts and implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the service.
//! - Keep file layout and JSON details inside the persistence boundary.
//!
//! # Invariants
//! - Loads always return the full collection in storage (insertion) order.
//! - Saves always replace the full collection; there are no partial writes.
//! - Sparse or wrong-typed records are coerced, never rejected.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;
pub mod record;

pub use json_file::JsonFileTaskStore;
pub use memory::MemoryTaskStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure. Always fatal for the current request.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "invalid task file `{}`: {source}", path.display())
            }
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

/// Whole-collection persistence interface for tasks.
pub trait TaskStore {
    /// Makes sure the backing storage exists, creating an empty collection
    /// when it does not. Existing storage is left untouched.
    fn ensure_storage(&self) -> StoreResult<()>;
    fn load_tasks(&self) -> StoreResult<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()>;
}

impl<S: TaskStore + ?Sized> TaskStore for Box<S> {
    fn ensure_storage(&self) -> StoreResult<()> {
        (**self).ensure_storage()
    }

    fn load_tasks(&self) -> StoreResult<Vec<Task>> {
        (**self).load_tasks()
    }

    fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        (**self).save_tasks(tasks)
    }
}

/// Returns the first task with `id`, if any.
pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|task| task.id == id)
}

/// Mutable variant of [`find_task`].
pub fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|task| task.id == id)
}

#[cfg(test)]
mod tests {
    use super::{find_task, find_task_mut};
    use crate::model::task::Task;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            done: false,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn find_task_returns_first_match() {
        let mut duplicate = task("a");
        duplicate.title = "second".to_string();
        let tasks = vec![task("a"), duplicate, task("b")];

        assert_eq!(find_task(&tasks, "a").unwrap().title, "task a");
        assert!(find_task(&tasks, "missing").is_none());
        assert!(find_task(&[], "a").is_none());
    }

    #[test]
    fn find_task_mut_allows_in_place_update() {
        let mut tasks = vec![task("a"), task("b")];
        find_task_mut(&mut tasks, "b").unwrap().done = true;
        assert!(tasks[1].done);
        assert!(!tasks[0].done);
    }
}
