//! Landing page counters.

use crate::repo::board_repo::BoardRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;

/// Totals shown on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LandingStats {
    /// All tasks, completed or not.
    pub tasks: u64,
    /// All boxes on the live board.
    pub notes: u64,
}

/// Reads landing counters from the task and board stores.
pub fn landing_stats(
    tasks: &impl TaskRepository,
    board: &impl BoardRepository,
) -> RepoResult<LandingStats> {
    Ok(LandingStats {
        tasks: tasks.count_tasks()?,
        notes: board.count_boxes()?,
    })
}
