//! JSON file task store.
//!
//! # Responsibility
//! - Persist the task collection as one pretty-printed JSON array.
//! - Create the data directory and an empty collection on first use.
//!
//! # Invariants
//! - Saves go through a sibling temp file and a rename, so readers see either
//!   the previous or the new collection, never a truncated one.
//! - No cross-process locking; callers serialize writers themselves.

use super::record::tasks_from_document;
use super::{StoreError, StoreResult, TaskStore};
use crate::model::task::Task;
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File-backed store rooted at a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileTaskStore {
    path: PathBuf,
}

impl JsonFileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "tasks.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_document(&self, tasks: &[Task]) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(tasks).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let temp_path = self.temp_path();
        let mut file = File::create(&temp_path).map_err(|err| self.io_error(&temp_path, err))?;
        file.write_all(body.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|err| self.io_error(&temp_path, err))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|err| self.io_error(&self.path, err))
    }
}

impl TaskStore for JsonFileTaskStore {
    fn ensure_storage(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(parent, err))?;
        }

        if self.path.exists() {
            return Ok(());
        }

        self.write_document(&[])?;
        info!(
            "event=store_ensure module=store status=created path={}",
            self.path.display()
        );
        Ok(())
    }

    fn load_tasks(&self) -> StoreResult<Vec<Task>> {
        let started_at = Instant::now();
        self.ensure_storage()?;

        let result = fs::read_to_string(&self.path)
            .map_err(|err| self.io_error(&self.path, err))
            .and_then(|text| {
                serde_json::from_str::<serde_json::Value>(&text).map_err(|source| StoreError::Json {
                    path: self.path.clone(),
                    source,
                })
            })
            .and_then(tasks_from_document);

        match result {
            Ok(tasks) => {
                debug!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(tasks)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        let started_at = Instant::now();
        self.ensure_storage()?;

        match self.write_document(tasks) {
            Ok(()) => {
                debug!(
                    "event=store_save module=store status=ok count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
