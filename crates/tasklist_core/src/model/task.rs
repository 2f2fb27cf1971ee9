//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Own title normalization and creation-time defaults.
//!
//! # Invariants
//! - `id` is opaque and never reused for another task.
//! - `title` and `created_at` never change after creation.
//! - `created_at` uses `YYYY-MM-DDTHH:MM:SSZ` (UTC, second precision).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Stored as a plain string: ids read back from disk or from request paths are
/// never required to be well-formed UUIDs.
pub type TaskId = String;

/// Minimum title length, in characters, after trimming.
pub const MIN_TITLE_CHARS: usize = 2;

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Validation failures for user-supplied task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    TitleTooShort { chars: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooShort { chars } => write!(
                f,
                "title has {chars} characters after trimming; at least {MIN_TITLE_CHARS} required"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical persisted task record.
///
/// Serialize-only: reads go through `store::record`, which coerces sparse
/// records instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub created_at: String,
}

impl Task {
    /// Creates a new open task with a fresh v4 id and the current UTC time.
    ///
    /// # Errors
    /// - Returns `TitleTooShort` when the trimmed title has fewer than
    ///   [`MIN_TITLE_CHARS`] characters.
    pub fn new(title: &str) -> Result<Self, TaskValidationError> {
        Self::new_at(title, Utc::now())
    }

    /// Same as [`Task::new`] with a caller-provided creation instant.
    pub fn new_at(title: &str, now: DateTime<Utc>) -> Result<Self, TaskValidationError> {
        let title = normalize_title(title)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            done: false,
            created_at: format_timestamp(now),
        })
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    /// Returns whether this task is still open.
    pub fn is_active(&self) -> bool {
        !self.done
    }
}

/// Trims `raw` and checks the minimum length.
pub fn normalize_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_TITLE_CHARS {
        return Err(TaskValidationError::TitleTooShort { chars });
    }
    Ok(trimmed.to_string())
}

/// Formats an instant the way `created_at` is persisted.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(CREATED_AT_FORMAT).to_string()
}
