//! Notes board use-case service.
//!
//! # Responsibility
//! - Create notes and rectangles at positions chosen by the placement engine.
//! - Apply drag, resize, expand, edit and delete actions coming from the UI.
//! - Export the live board as a JSON backup.
//!
//! # Invariants
//! - A new box's top is clamped into `[padding, scroll_height - h - padding]`
//!   after placement, with the lower bound winning on small boards.
//! - Moves are rejected while the layout is locked.
//! - Clearing the board forgets which snapshot it was loaded from.

use crate::clock::Clock;
use crate::model::board::{
    validate_size, BoardBox, BoxId, BoxValidationError, NOTE_HEIGHT, NOTE_WIDTH, RECTANGLE_HEIGHT,
};
use crate::placement::{
    clamp_low_wins, find_available_position, snap_to_grid, Anchor, Placement, PlacementRequest,
    Rect, Viewport, EDGE_PADDING,
};
use crate::repo::board_repo::BoardRepository;
use crate::repo::preference_repo::PreferenceRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::preference_service::PreferenceService;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for board use-cases.
#[derive(Debug)]
pub enum BoardServiceError {
    BoxNotFound(BoxId),
    /// Dragging is disabled until the layout is unlocked.
    LayoutLocked,
    InvalidBox(BoxValidationError),
    Export(serde_json::Error),
    Repo(RepoError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoxNotFound(id) => write!(f, "board box not found: {id}"),
            Self::LayoutLocked => write!(f, "board layout is locked"),
            Self::InvalidBox(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "board export failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidBox(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::BoxNotFound(_) | Self::LayoutLocked => None,
        }
    }
}

impl From<RepoError> for BoardServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::BoxNotFound(id),
            RepoError::BoxValidation(err) => Self::InvalidBox(err),
            other => Self::Repo(other),
        }
    }
}

impl From<BoxValidationError> for BoardServiceError {
    fn from(value: BoxValidationError) -> Self {
        Self::InvalidBox(value)
    }
}

/// Board service facade over repository implementations.
///
/// Layout lock and grid snapping are session toggles and are not persisted.
pub struct BoardService<B: BoardRepository, P: PreferenceRepository, C: Clock> {
    repo: B,
    prefs: PreferenceService<P>,
    clock: C,
    layout_locked: bool,
    snap_enabled: bool,
}

impl<B: BoardRepository, P: PreferenceRepository, C: Clock> BoardService<B, P, C> {
    pub fn new(repo: B, prefs: P, clock: C) -> Self {
        Self {
            repo,
            prefs: PreferenceService::new(prefs),
            clock,
            layout_locked: false,
            snap_enabled: false,
        }
    }

    pub fn set_layout_locked(&mut self, locked: bool) {
        self.layout_locked = locked;
    }

    pub fn layout_locked(&self) -> bool {
        self.layout_locked
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    /// Creates a sticky note centered in the visible part of the board, on
    /// the first free row at or below the top of the view.
    pub fn create_note(
        &self,
        viewport: &Viewport,
        color: &str,
    ) -> Result<BoardBox, BoardServiceError> {
        let request = PlacementRequest {
            start_y: viewport.scroll_top + EDGE_PADDING,
            width: NOTE_WIDTH,
            height: NOTE_HEIGHT,
            anchor: Anchor::Centered,
        };
        let bounds = self.place(&request, viewport)?;
        let note = BoardBox::note(bounds.x, bounds.y, color, self.clock.now_ms());
        self.repo.insert_box(&note)?;
        Ok(note)
    }

    /// Creates a full-width twenty-line rectangle on the first free row at or
    /// below the top of the view.
    pub fn create_rectangle(
        &self,
        viewport: &Viewport,
        color: &str,
    ) -> Result<BoardBox, BoardServiceError> {
        let width = viewport.client_width - EDGE_PADDING * 2.0;
        validate_size(width, RECTANGLE_HEIGHT)?;

        let request = PlacementRequest {
            start_y: viewport.scroll_top + EDGE_PADDING,
            width,
            height: RECTANGLE_HEIGHT,
            anchor: Anchor::FullWidthLeft,
        };
        let bounds = self.place(&request, viewport)?;
        let rectangle = BoardBox::rectangle(bounds, color, self.clock.now_ms());
        self.repo.insert_box(&rectangle)?;
        Ok(rectangle)
    }

    /// Finishes a drag at `(x, y)`, snapping to the grid when enabled.
    pub fn move_box(&self, id: BoxId, x: f64, y: f64) -> Result<BoardBox, BoardServiceError> {
        if self.layout_locked {
            return Err(BoardServiceError::LayoutLocked);
        }

        let mut item = self.require(id)?;
        if self.snap_enabled {
            item.x = snap_to_grid(x);
            item.y = snap_to_grid(y);
        } else {
            item.x = x;
            item.y = y;
        }
        item.updated_at = self.clock.now_ms();
        self.repo.update_box(&item)?;
        Ok(item)
    }

    /// Records a resize of the currently displayed size.
    pub fn resize_box(
        &self,
        id: BoxId,
        width: f64,
        height: f64,
    ) -> Result<BoardBox, BoardServiceError> {
        validate_size(width, height)?;
        let mut item = self.require(id)?;
        item.apply_resize(width, height);
        self.repo.update_box(&item)?;
        Ok(item)
    }

    pub fn toggle_expanded(&self, id: BoxId) -> Result<BoardBox, BoardServiceError> {
        let mut item = self.require(id)?;
        item.toggle_expanded();
        self.repo.update_box(&item)?;
        Ok(item)
    }

    pub fn edit_content(
        &self,
        id: BoxId,
        content: impl Into<String>,
    ) -> Result<BoardBox, BoardServiceError> {
        let mut item = self.require(id)?;
        item.content = content.into();
        item.updated_at = self.clock.now_ms();
        self.repo.update_box(&item)?;
        Ok(item)
    }

    pub fn set_topic_name(
        &self,
        id: BoxId,
        topic: impl Into<String>,
    ) -> Result<BoardBox, BoardServiceError> {
        let mut item = self.require(id)?;
        item.topic_name = topic.into();
        self.repo.update_box(&item)?;
        Ok(item)
    }

    pub fn delete_box(&self, id: BoxId) -> Result<(), BoardServiceError> {
        self.repo.delete_box(id)?;
        info!("event=box_delete module=board status=ok");
        Ok(())
    }

    /// Deletes every box and forgets the loaded snapshot.
    pub fn clear_board(&self) -> Result<usize, BoardServiceError> {
        let removed = self.repo.clear_boxes()?;
        self.prefs.set_current_snapshot(None)?;
        info!("event=board_clear module=board status=ok removed={removed}");
        Ok(removed)
    }

    /// Boxes in z-order, bottom first.
    pub fn list_boxes(&self) -> RepoResult<Vec<BoardBox>> {
        self.repo.list_boxes()
    }

    pub fn box_count(&self) -> RepoResult<u64> {
        self.repo.count_boxes()
    }

    /// Serializes the live board as a JSON array for backups.
    pub fn export_json(&self) -> Result<String, BoardServiceError> {
        let boxes = self.repo.list_boxes()?;
        serde_json::to_string(&boxes).map_err(BoardServiceError::Export)
    }

    fn require(&self, id: BoxId) -> Result<BoardBox, BoardServiceError> {
        self.repo
            .get_box(id)?
            .ok_or(BoardServiceError::BoxNotFound(id))
    }

    fn place(&self, request: &PlacementRequest, viewport: &Viewport) -> RepoResult<Rect> {
        let existing = self.repo.list_boxes()?;
        let placement = find_available_position(request, viewport, &existing);
        log_placement(request, &placement, existing.len());
        Ok(clamp_into_board(&placement, request, viewport))
    }
}

/// Keeps a placed box inside the board padding.
pub fn clamp_into_board(
    placement: &Placement,
    request: &PlacementRequest,
    viewport: &Viewport,
) -> Rect {
    Rect::new(
        clamp_low_wins(placement.x, EDGE_PADDING, viewport.max_left(request.width)),
        clamp_low_wins(placement.y, EDGE_PADDING, viewport.max_top(request.height)),
        request.width,
        request.height,
    )
}

fn log_placement(request: &PlacementRequest, placement: &Placement, existing: usize) {
    let anchor = match request.anchor {
        Anchor::Centered => "centered",
        Anchor::FullWidthLeft => "full_width",
    };
    if placement.is_fallback() {
        warn!(
            "event=box_place module=board status=fallback anchor={anchor} rows_scanned={} existing={existing}",
            placement.rows_scanned()
        );
    } else {
        info!(
            "event=box_place module=board status=ok anchor={anchor} rows_scanned={} existing={existing}",
            placement.rows_scanned()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::clamp_into_board;
    use crate::placement::{Anchor, Placement, PlacementOutcome, PlacementRequest, Viewport};

    #[test]
    fn fallback_below_board_bottom_is_pulled_back_inside() {
        let viewport = Viewport::unscrolled(1000.0, 600.0);
        let request = PlacementRequest {
            start_y: 900.0,
            width: 220.0,
            height: 140.0,
            anchor: Anchor::Centered,
        };
        let placement = Placement {
            x: 390.0,
            y: 900.0,
            outcome: PlacementOutcome::Fallback { rows_scanned: 0 },
        };

        let bounds = clamp_into_board(&placement, &request, &viewport);
        assert_eq!(bounds.y, 600.0 - 140.0 - 16.0);
        assert_eq!(bounds.x, 390.0);
    }

    #[test]
    fn tiny_board_keeps_top_left_padding() {
        let viewport = Viewport::unscrolled(100.0, 100.0);
        let request = PlacementRequest {
            start_y: 16.0,
            width: 220.0,
            height: 140.0,
            anchor: Anchor::Centered,
        };
        let placement = Placement {
            x: 16.0,
            y: 30.0,
            outcome: PlacementOutcome::Fallback { rows_scanned: 0 },
        };

        let bounds = clamp_into_board(&placement, &request, &viewport);
        assert_eq!((bounds.x, bounds.y), (16.0, 16.0));
    }
}
