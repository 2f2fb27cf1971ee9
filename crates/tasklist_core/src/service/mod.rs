//! Use-case services exposed to the web layer.
//!
//! # Responsibility
//! - Orchestrate load/mutate/save sequences over the task store.
//! - Keep handlers free of persistence and validation details.

pub mod task_service;
