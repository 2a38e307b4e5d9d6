//! Placement engine for new board boxes.
//!
//! # Responsibility
//! - Pick a grid-aligned position for a new box that avoids existing boxes.
//! - Stay a pure query over (request, viewport, boxes) so UI layers and tests
//!   can call it without storage.
//!
//! # Invariants
//! - `x` is computed once per call; only `y` varies while scanning.
//! - The scan visits at most [`MAX_PLACEMENT_ROWS`] grid rows.
//! - When no free row is found, the snapped start row is returned even if it
//!   overlaps (best-effort fallback, never an error).

pub mod geometry;

pub use geometry::{
    clamp_low_wins, is_position_occupied, snap_to_grid, Footprint, Rect, Viewport, EDGE_PADDING,
    GRID_STEP,
};

/// Upper bound of grid rows tried per placement call.
pub const MAX_PLACEMENT_ROWS: usize = 100;

/// Horizontal anchoring strategy for a new box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Centered in the visible part of the board (small notes).
    Centered,
    /// Pinned to the left padding (full-width rectangles).
    FullWidthLeft,
}

/// Input of one placement query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    /// Desired top offset before grid snapping.
    pub start_y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor: Anchor,
}

/// How a placement result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A row without overlap was found.
    Free { rows_scanned: usize },
    /// No free row within bounds; the snapped start row was returned.
    Fallback { rows_scanned: usize },
}

/// Result of one placement query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub outcome: PlacementOutcome,
}

impl Placement {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, PlacementOutcome::Fallback { .. })
    }

    pub fn rows_scanned(&self) -> usize {
        match self.outcome {
            PlacementOutcome::Free { rows_scanned } | PlacementOutcome::Fallback { rows_scanned } => {
                rows_scanned
            }
        }
    }
}

/// Finds the first free grid row for a new box, scanning downward.
///
/// Rules:
/// - start row: `snap_to_grid(start_y)`, raised to at least [`EDGE_PADDING`].
/// - `x`: centered in the viewport and clamped to the board, or the left
///   padding for [`Anchor::FullWidthLeft`].
/// - rows advance by [`GRID_STEP`] until one is free, the row passes
///   `scroll_height - height - padding`, or [`MAX_PLACEMENT_ROWS`] rows were
///   tried.
pub fn find_available_position<B: Footprint>(
    request: &PlacementRequest,
    viewport: &Viewport,
    boxes: &[B],
) -> Placement {
    let start_y = snap_to_grid(request.start_y).max(EDGE_PADDING);
    let x = anchor_x(request, viewport);
    let max_y = viewport.max_top(request.height);

    let mut y = start_y;
    let mut rows_scanned = 0;
    for _ in 0..MAX_PLACEMENT_ROWS {
        if y > max_y {
            break;
        }
        rows_scanned += 1;

        let candidate = Rect::new(x, y, request.width, request.height);
        if !is_position_occupied(&candidate, boxes) {
            return Placement {
                x,
                y,
                outcome: PlacementOutcome::Free { rows_scanned },
            };
        }
        y += GRID_STEP;
    }

    Placement {
        x,
        y: start_y,
        outcome: PlacementOutcome::Fallback { rows_scanned },
    }
}

fn anchor_x(request: &PlacementRequest, viewport: &Viewport) -> f64 {
    match request.anchor {
        Anchor::Centered => {
            let centered = snap_to_grid(
                viewport.scroll_left + viewport.client_width / 2.0 - request.width / 2.0,
            );
            clamp_low_wins(centered, EDGE_PADDING, viewport.max_left(request.width))
        }
        Anchor::FullWidthLeft => EDGE_PADDING,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        find_available_position, Anchor, PlacementOutcome, PlacementRequest, Rect, Viewport,
        EDGE_PADDING, GRID_STEP, MAX_PLACEMENT_ROWS,
    };

    fn board() -> Viewport {
        Viewport {
            client_width: 1200.0,
            client_height: 800.0,
            scroll_left: 0.0,
            scroll_top: 0.0,
            scroll_width: 1200.0,
            scroll_height: 4000.0,
        }
    }

    fn note_request(start_y: f64) -> PlacementRequest {
        PlacementRequest {
            start_y,
            width: 220.0,
            height: 140.0,
            anchor: Anchor::Centered,
        }
    }

    #[test]
    fn empty_board_places_at_padding_row() {
        let placement = find_available_position::<Rect>(&note_request(0.0), &board(), &[]);
        assert_eq!(placement.y, EDGE_PADDING);
        // 600 - 110 = 490 snaps to 480.
        assert_eq!(placement.x, 480.0);
        assert_eq!(placement.outcome, PlacementOutcome::Free { rows_scanned: 1 });
    }

    #[test]
    fn start_row_is_snapped_before_scanning() {
        let placement = find_available_position::<Rect>(&note_request(50.0), &board(), &[]);
        assert_eq!(placement.y, 60.0);
    }

    #[test]
    fn skips_rows_covered_by_existing_box() {
        let request = PlacementRequest {
            start_y: 16.0,
            width: 220.0,
            height: 140.0,
            anchor: Anchor::FullWidthLeft,
        };
        let existing = vec![Rect::new(16.0, 16.0, 220.0, 140.0)];

        let placement = find_available_position(&request, &board(), &existing);
        assert_eq!(placement.x, 16.0);
        assert_eq!(placement.y, 180.0);
        assert!(!placement.is_fallback());
        // rows 30, 60, 90, 120, 150 overlap; 180 is free.
        assert_eq!(placement.rows_scanned(), 6);
    }

    #[test]
    fn centered_x_is_clamped_into_board() {
        let narrow = Viewport {
            client_width: 200.0,
            scroll_width: 200.0,
            ..board()
        };
        let placement = find_available_position::<Rect>(&note_request(0.0), &narrow, &[]);
        assert_eq!(placement.x, EDGE_PADDING);

        let scrolled = Viewport {
            scroll_left: 5000.0,
            ..board()
        };
        let placement = find_available_position::<Rect>(&note_request(0.0), &scrolled, &[]);
        assert_eq!(placement.x, 1200.0 - 220.0 - EDGE_PADDING);
    }

    #[test]
    fn fallback_when_every_row_is_taken() {
        let tall = Viewport {
            scroll_height: 100_000.0,
            ..board()
        };
        let wall = vec![Rect::new(0.0, 0.0, 1200.0, 100_000.0)];

        let placement = find_available_position(&note_request(300.0), &tall, &wall);
        assert!(placement.is_fallback());
        assert_eq!(placement.y, 300.0);
        assert_eq!(placement.rows_scanned(), MAX_PLACEMENT_ROWS);
    }

    #[test]
    fn fallback_when_rows_run_past_board_bottom() {
        let short = Viewport {
            scroll_height: 400.0,
            ..board()
        };
        let blocker = vec![Rect::new(0.0, 0.0, 1200.0, 300.0)];

        let placement = find_available_position(&note_request(0.0), &short, &blocker);
        assert_eq!(
            placement.outcome,
            PlacementOutcome::Fallback { rows_scanned: 8 }
        );
        assert_eq!(placement.y, EDGE_PADDING);
    }

    #[test]
    fn start_below_board_bottom_falls_back_without_scanning() {
        let placement = find_available_position::<Rect>(&note_request(9000.0), &board(), &[]);
        assert_eq!(
            placement.outcome,
            PlacementOutcome::Fallback { rows_scanned: 0 }
        );
        assert_eq!(placement.y, 9000.0);
    }

    #[test]
    fn scan_advances_one_grid_step_per_row() {
        let existing = vec![Rect::new(0.0, 0.0, 1200.0, 100.0)];
        let placement = find_available_position(&note_request(0.0), &board(), &existing);
        assert_eq!(placement.y, 16.0 + 3.0 * GRID_STEP);
    }
}
