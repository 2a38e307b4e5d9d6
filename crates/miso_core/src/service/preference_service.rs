//! Preference use-case service.
//!
//! # Responsibility
//! - Decode and encode typed preferences (theme, page layout, history
//!   pointer, task bookkeeping) on top of the key/value repository.
//!
//! # Invariants
//! - Missing keys decode to defaults; malformed stored values are reported
//!   as `RepoError::InvalidData`.

use crate::model::preferences::{board_min_height, parse_page_number, Theme};
use crate::model::snapshot::SnapshotId;
use crate::repo::preference_repo::{PreferenceRepository, CURRENT_SNAPSHOT_KEY};
use crate::repo::{RepoError, RepoResult};
use log::info;
use uuid::Uuid;

const THEME_KEY: &str = "theme";
const PAGE_EXPANDED_KEY: &str = "board.page_expanded";
const CURRENT_PAGE_KEY: &str = "board.current_page";
const TASKS_TOUCHED_KEY: &str = "task_meta.last_touched";

/// Typed facade over stored preferences.
pub struct PreferenceService<R: PreferenceRepository> {
    repo: R,
}

impl<R: PreferenceRepository> PreferenceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn theme(&self) -> RepoResult<Theme> {
        match self.repo.get_preference(THEME_KEY)? {
            Some(value) => Theme::parse(&value).ok_or_else(|| invalid(THEME_KEY, &value)),
            None => Ok(Theme::default()),
        }
    }

    /// Flips between light and dark and persists the result.
    pub fn toggle_theme(&self) -> RepoResult<Theme> {
        let next = self.theme()?.toggled();
        self.repo.set_preference(THEME_KEY, next.as_str())?;
        info!(
            "event=theme_toggle module=preferences status=ok theme={}",
            next.as_str()
        );
        Ok(next)
    }

    pub fn page_expanded(&self) -> RepoResult<bool> {
        match self.repo.get_preference(PAGE_EXPANDED_KEY)? {
            Some(value) => match value.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(invalid(PAGE_EXPANDED_KEY, &value)),
            },
            None => Ok(false),
        }
    }

    /// Flips page expansion and returns the new state.
    pub fn toggle_page_expanded(&self) -> RepoResult<bool> {
        let next = !self.page_expanded()?;
        self.repo
            .set_preference(PAGE_EXPANDED_KEY, if next { "true" } else { "false" })?;
        Ok(next)
    }

    /// Minimum board height for the stored page expansion state.
    pub fn board_min_height(&self) -> RepoResult<f64> {
        Ok(board_min_height(self.page_expanded()?))
    }

    pub fn current_page(&self) -> RepoResult<u32> {
        match self.repo.get_preference(CURRENT_PAGE_KEY)? {
            Some(value) => value
                .parse::<u32>()
                .map_err(|_| invalid(CURRENT_PAGE_KEY, &value)),
            None => Ok(1),
        }
    }

    /// Stores a user-typed page number; unparsable input becomes page 1.
    pub fn set_current_page(&self, raw: &str) -> RepoResult<u32> {
        let page = parse_page_number(raw);
        self.repo
            .set_preference(CURRENT_PAGE_KEY, page.to_string().as_str())?;
        Ok(page)
    }

    /// Snapshot the live board was last loaded from, if any.
    pub fn current_snapshot(&self) -> RepoResult<Option<SnapshotId>> {
        match self.repo.get_preference(CURRENT_SNAPSHOT_KEY)? {
            Some(value) => Uuid::parse_str(&value)
                .map(Some)
                .map_err(|_| invalid(CURRENT_SNAPSHOT_KEY, &value)),
            None => Ok(None),
        }
    }

    pub fn set_current_snapshot(&self, id: Option<SnapshotId>) -> RepoResult<()> {
        match id {
            Some(id) => self
                .repo
                .set_preference(CURRENT_SNAPSHOT_KEY, id.to_string().as_str()),
            None => self.repo.remove_preference(CURRENT_SNAPSHOT_KEY),
        }
    }

    /// Epoch milliseconds of the last task list write.
    pub fn tasks_last_touched(&self) -> RepoResult<Option<i64>> {
        match self.repo.get_preference(TASKS_TOUCHED_KEY)? {
            Some(value) => value
                .parse::<i64>()
                .map(Some)
                .map_err(|_| invalid(TASKS_TOUCHED_KEY, &value)),
            None => Ok(None),
        }
    }

    pub fn touch_tasks(&self, now_ms: i64) -> RepoResult<()> {
        self.repo
            .set_preference(TASKS_TOUCHED_KEY, now_ms.to_string().as_str())
    }
}

fn invalid(key: &str, value: &str) -> RepoError {
    RepoError::InvalidData(format!("invalid preference value `{value}` for `{key}`"))
}
