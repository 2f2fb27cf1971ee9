//! Task list use-case service.
//!
//! # Responsibility
//! - Implement list/add/toggle/delete/clear-done over a [`TaskStore`].
//! - Translate domain outcomes into user-facing status messages.
//!
//! # Invariants
//! - Every operation loads the full collection, mutates it in memory and
//!   saves it back whole. Nothing is cached between calls.
//! - Domain failures (short title, unknown id) are outcomes, not errors, and
//!   never write to storage.
//! - Only storage failures surface as `Err`.

use crate::model::task::{Task, TaskId};
use crate::store::{find_task_mut, StoreResult, TaskStore};
use log::info;
use std::fmt::{Display, Formatter};

/// Named filter over the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskView {
    #[default]
    All,
    Active,
    Done,
}

impl TaskView {
    /// Parses a `view` query value. Unknown or empty values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "done" => Self::Done,
            _ => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Done => "done",
        }
    }

    pub fn includes(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.done,
            Self::Done => task.done,
        }
    }
}

impl Display for TaskView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection sizes shown next to each view tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub done: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let done = tasks.iter().filter(|task| task.done).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - done,
            done,
        }
    }

    pub fn for_view(&self, view: TaskView) -> usize {
        match view {
            TaskView::All => self.all,
            TaskView::Active => self.active,
            TaskView::Done => self.done,
        }
    }
}

/// Result of the list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    pub view: TaskView,
    /// Filtered tasks, newest `created_at` first.
    pub tasks: Vec<Task>,
    /// Counts over the whole collection, independent of `view`.
    pub counts: TaskCounts,
}

/// Severity attached to a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl MessageLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "danger" => Some(Self::Danger),
            _ => None,
        }
    }
}

/// One-shot, human-readable feedback for the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// What a mutating operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Added { id: TaskId },
    TitleTooShort,
    Toggled { id: TaskId, done: bool },
    ToggleNotFound,
    Deleted { id: TaskId },
    DeleteNotFound,
    ClearedDone { removed: usize },
}

impl TaskOutcome {
    /// Returns whether the operation changed the stored collection.
    pub fn is_mutation(&self) -> bool {
        match self {
            Self::Added { .. } | Self::Toggled { .. } | Self::Deleted { .. } => true,
            Self::ClearedDone { removed } => *removed > 0,
            Self::TitleTooShort | Self::ToggleNotFound | Self::DeleteNotFound => false,
        }
    }

    pub fn message(&self) -> StatusMessage {
        match self {
            Self::Added { .. } => StatusMessage::new(MessageLevel::Success, "Task added."),
            Self::TitleTooShort => StatusMessage::new(
                MessageLevel::Danger,
                "Title is too short (min. 2 characters).",
            ),
            Self::Toggled { .. } => StatusMessage::new(MessageLevel::Info, "Task status changed."),
            Self::ToggleNotFound => StatusMessage::new(MessageLevel::Warning, "Task not found."),
            Self::Deleted { .. } => StatusMessage::new(MessageLevel::Success, "Task deleted."),
            Self::DeleteNotFound => {
                StatusMessage::new(MessageLevel::Warning, "Task to delete not found.")
            }
            Self::ClearedDone { .. } => {
                StatusMessage::new(MessageLevel::Success, "Removed all completed tasks.")
            }
        }
    }
}

/// Use-case service wrapper over a task store.
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filters by `view` and sorts newest first.
    ///
    /// Ordering compares `created_at` strings lexically, which matches
    /// chronological order for the fixed-width UTC format. Ties keep storage
    /// order.
    pub fn list(&self, view: TaskView) -> StoreResult<TaskListing> {
        let tasks = self.store.load_tasks()?;
        let counts = TaskCounts::of(&tasks);

        let mut visible: Vec<Task> = tasks.into_iter().filter(|t| view.includes(t)).collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(TaskListing {
            view,
            tasks: visible,
            counts,
        })
    }

    /// Appends a new open task when the trimmed title is long enough.
    pub fn add(&self, raw_title: &str) -> StoreResult<TaskOutcome> {
        let task = match Task::new(raw_title) {
            Ok(task) => task,
            Err(err) => {
                info!("event=task_add module=service status=rejected reason=\"{err}\"");
                return Ok(TaskOutcome::TitleTooShort);
            }
        };

        let mut tasks = self.store.load_tasks()?;
        let id = task.id.clone();
        tasks.push(task);
        self.store.save_tasks(&tasks)?;

        info!(
            "event=task_add module=service status=ok id={} total={}",
            id,
            tasks.len()
        );
        Ok(TaskOutcome::Added { id })
    }

    /// Flips `done` on the first task with `id`.
    pub fn toggle(&self, id: &str) -> StoreResult<TaskOutcome> {
        let mut tasks = self.store.load_tasks()?;
        let Some(task) = find_task_mut(&mut tasks, id) else {
            info!("event=task_toggle module=service status=not_found id={id}");
            return Ok(TaskOutcome::ToggleNotFound);
        };

        let done = task.toggle();
        self.store.save_tasks(&tasks)?;

        info!("event=task_toggle module=service status=ok id={id} done={done}");
        Ok(TaskOutcome::Toggled {
            id: id.to_string(),
            done,
        })
    }

    /// Removes every task with `id`. Saves only when something was removed.
    pub fn delete(&self, id: &str) -> StoreResult<TaskOutcome> {
        let mut tasks = self.store.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);

        if tasks.len() == before {
            info!("event=task_delete module=service status=not_found id={id}");
            return Ok(TaskOutcome::DeleteNotFound);
        }

        self.store.save_tasks(&tasks)?;
        info!(
            "event=task_delete module=service status=ok id={id} removed={}",
            before - tasks.len()
        );
        Ok(TaskOutcome::Deleted { id: id.to_string() })
    }

    /// Removes all completed tasks. Always saves, even when none were done.
    pub fn clear_done(&self) -> StoreResult<TaskOutcome> {
        let mut tasks = self.store.load_tasks()?;
        let before = tasks.len();
        tasks.retain(Task::is_active);
        self.store.save_tasks(&tasks)?;

        let removed = before - tasks.len();
        info!("event=task_clear_done module=service status=ok removed={removed}");
        Ok(TaskOutcome::ClearedDone { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageLevel, TaskCounts, TaskView};
    use crate::model::task::Task;

    #[test]
    fn view_parse_falls_back_to_all() {
        assert_eq!(TaskView::parse("active"), TaskView::Active);
        assert_eq!(TaskView::parse("done"), TaskView::Done);
        assert_eq!(TaskView::parse("all"), TaskView::All);
        assert_eq!(TaskView::parse(""), TaskView::All);
        assert_eq!(TaskView::parse("DONE"), TaskView::All);
    }

    #[test]
    fn counts_partition_the_collection() {
        let mut a = Task::new("first").unwrap();
        let b = Task::new("second").unwrap();
        a.done = true;
        let counts = TaskCounts::of(&[a, b]);
        assert_eq!(counts.all, 2);
        assert_eq!(counts.active, 1);
        assert_eq!(counts.done, 1);
        assert_eq!(counts.for_view(TaskView::Done), 1);
    }

    #[test]
    fn message_level_names_roundtrip() {
        for level in [
            MessageLevel::Success,
            MessageLevel::Info,
            MessageLevel::Warning,
            MessageLevel::Danger,
        ] {
            assert_eq!(MessageLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(MessageLevel::parse("error"), None);
    }
}
