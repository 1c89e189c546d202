//! Background work spawned from request handlers.
//!
//! Each submodule provides a task intended to be spawned via
//! `tokio::spawn` plus whatever shared state the task reports into.

pub mod import_runs;
pub mod run_retention;
