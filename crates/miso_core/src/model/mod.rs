//! Domain model for the task list, notes board and board history.
//!
//! # Responsibility
//! - Define canonical records shared by repositories and services.
//! - Keep validation close to the data it protects.
//!
//! # Invariants
//! - Every task, box and snapshot is identified by a stable UUID.
//! - Records are validated before persistence and after read-back.

pub mod board;
pub mod preferences;
pub mod snapshot;
pub mod task;
