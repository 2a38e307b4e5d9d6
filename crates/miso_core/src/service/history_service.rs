//! Board history use-case service.
//!
//! # Responsibility
//! - Archive the live board into named snapshots and restore them.
//! - Keep the board title (first rectangle topic) and snapshot name in sync.
//!
//! # Invariants
//! - Saving an empty board is refused and leaves history untouched.
//! - Saving a board loaded from an existing snapshot overwrites that snapshot
//!   in place; otherwise a new snapshot is appended.
//! - A successful save clears the live board and the current-snapshot pointer;
//!   a failed save changes nothing.

use crate::clock::{date_from_epoch_ms, Clock};
use crate::model::snapshot::{board_title, default_snapshot_name, Snapshot, SnapshotId};
use crate::repo::board_repo::BoardRepository;
use crate::repo::preference_repo::PreferenceRepository;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::preference_service::PreferenceService;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for history use-cases.
#[derive(Debug)]
pub enum HistoryServiceError {
    /// The live board has no boxes to save.
    EmptyBoard,
    SnapshotNotFound(SnapshotId),
    Repo(RepoError),
}

impl Display for HistoryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBoard => write!(f, "nothing to save: the board is empty"),
            Self::SnapshotNotFound(id) => write!(f, "snapshot not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HistoryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for HistoryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::SnapshotNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// History service over board, snapshot and preference repositories.
pub struct HistoryService<B, S, P, C>
where
    B: BoardRepository,
    S: SnapshotRepository,
    P: PreferenceRepository,
    C: Clock,
{
    board: B,
    snapshots: S,
    prefs: PreferenceService<P>,
    clock: C,
}

impl<B, S, P, C> HistoryService<B, S, P, C>
where
    B: BoardRepository,
    S: SnapshotRepository,
    P: PreferenceRepository,
    C: Clock,
{
    pub fn new(board: B, snapshots: S, prefs: P, clock: C) -> Self {
        Self {
            board,
            snapshots,
            prefs: PreferenceService::new(prefs),
            clock,
        }
    }

    /// Archives the live board and clears it.
    ///
    /// The snapshot is named after the first rectangle's topic, or
    /// `Saved Board <date>` when there is none.
    pub fn save_board(&self) -> Result<Snapshot, HistoryServiceError> {
        let boxes = self.board.list_boxes()?;
        if boxes.is_empty() {
            return Err(HistoryServiceError::EmptyBoard);
        }

        let now = self.clock.now_ms();
        let name = board_title(&boxes)
            .map(str::to_string)
            .unwrap_or_else(|| default_snapshot_name(date_from_epoch_ms(now)));

        let existing = match self.prefs.current_snapshot()? {
            Some(id) => self.snapshots.get_snapshot(id)?,
            None => None,
        };

        let snapshot = Snapshot {
            id: existing
                .as_ref()
                .map_or_else(Uuid::new_v4, |snapshot| snapshot.id),
            name,
            saved_at: now,
            boxes,
        };
        let overwrite = existing.is_some();
        let cleared = self.snapshots.archive_board(&snapshot, overwrite)?;
        info!("event=board_save module=history status=ok overwrite={overwrite} boxes={cleared}");
        Ok(snapshot)
    }

    /// Snapshots, most recently created first.
    pub fn list_snapshots(&self) -> RepoResult<Vec<Snapshot>> {
        self.snapshots.list_snapshots()
    }

    /// Replaces the live board with a copy of the snapshot.
    pub fn load_snapshot(&self, id: SnapshotId) -> Result<Snapshot, HistoryServiceError> {
        let mut snapshot = self.require(id)?;
        if !snapshot.name.is_empty() {
            let name = snapshot.name.clone();
            if let Some(title) = snapshot.title_box_mut() {
                title.topic_name = name;
            }
        }

        self.board.replace_boxes(&snapshot.boxes)?;
        self.prefs.set_current_snapshot(Some(snapshot.id))?;
        info!(
            "event=snapshot_load module=history status=ok boxes={}",
            snapshot.boxes.len()
        );
        Ok(snapshot)
    }

    /// Renames a snapshot; blank names fall back to the default name of the
    /// snapshot's save date.
    pub fn rename_snapshot(
        &self,
        id: SnapshotId,
        name: &str,
    ) -> Result<Snapshot, HistoryServiceError> {
        let mut snapshot = self.require(id)?;
        let trimmed = name.trim();
        snapshot.name = if trimmed.is_empty() {
            default_snapshot_name(date_from_epoch_ms(snapshot.saved_at))
        } else {
            trimmed.to_string()
        };

        let renamed = snapshot.name.clone();
        if let Some(title) = snapshot.title_box_mut() {
            title.topic_name = renamed;
        }

        self.snapshots.update_snapshot(&snapshot)?;
        Ok(snapshot)
    }

    pub fn delete_snapshot(&self, id: SnapshotId) -> Result<(), HistoryServiceError> {
        self.snapshots.delete_snapshot(id)?;
        if self.prefs.current_snapshot()? == Some(id) {
            self.prefs.set_current_snapshot(None)?;
        }
        info!("event=snapshot_delete module=history status=ok");
        Ok(())
    }

    /// Snapshot the live board was loaded from, if any.
    pub fn current_snapshot(&self) -> RepoResult<Option<SnapshotId>> {
        self.prefs.current_snapshot()
    }

    fn require(&self, id: SnapshotId) -> Result<Snapshot, HistoryServiceError> {
        self.snapshots
            .get_snapshot(id)?
            .ok_or(HistoryServiceError::SnapshotNotFound(id))
    }
}
