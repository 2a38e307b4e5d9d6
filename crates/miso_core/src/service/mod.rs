//! Core use-case services.
//!
//! # Responsibility
//! - Turn UI events into state updates over repository contracts.
//! - Keep UI layers decoupled from storage details.

pub mod board_service;
pub mod history_service;
pub mod landing;
pub mod motivation;
pub mod preference_service;
pub mod task_service;
