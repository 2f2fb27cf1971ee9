//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record shared by store, service and web layers.
//!
//! # Invariants
//! - Every task is identified by an opaque, unique `TaskId`.
//! - Removal is a hard delete; there are no tombstones.

pub mod task;
