//! Core domain logic for the Miso task list and notes board.
//!
//! The placement engine, stores and use-case services live here; UI shells
//! only translate events and render state.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod placement;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{BoardBox, BoxId, BoxKind, BoxValidationError};
pub use model::preferences::Theme;
pub use model::snapshot::{Snapshot, SnapshotId};
pub use model::task::{Task, TaskCategory, TaskId, TaskPriority, TaskValidationError};
pub use placement::{
    find_available_position, Anchor, Footprint, Placement, PlacementOutcome, PlacementRequest,
    Rect, Viewport,
};
pub use repo::board_repo::{BoardRepository, SqliteBoardRepository};
pub use repo::preference_repo::{PreferenceRepository, SqlitePreferenceRepository};
pub use repo::snapshot_repo::{SnapshotRepository, SqliteSnapshotRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::board_service::{BoardService, BoardServiceError};
pub use service::history_service::{HistoryService, HistoryServiceError};
pub use service::landing::{landing_stats, LandingStats};
pub use service::motivation::MotivationRotator;
pub use service::preference_service::PreferenceService;
pub use service::task_service::{
    NewTask, TaskEdit, TaskFilter, TaskService, TaskServiceError, TaskStats,
};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
