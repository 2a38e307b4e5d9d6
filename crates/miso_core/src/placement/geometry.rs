//! Board geometry primitives.
//!
//! # Responsibility
//! - Describe box footprints and viewport extents in board pixel space.
//! - Own the overlap predicate and grid snapping shared by placement and drag.
//!
//! # Invariants
//! - Rectangles reported as disjoint never share positive area.
//! - Grid snapping rounds halves up, matching the board's visual grid.

/// Grid step used for snapping and for the vertical placement scan.
pub const GRID_STEP: f64 = 30.0;

/// Padding kept between boxes and the board edges.
pub const EDGE_PADDING: f64 = 16.0;

/// Axis-aligned rectangle in board pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns whether two rectangles overlap.
    ///
    /// Overlap holds unless one rectangle lies strictly left of, right of,
    /// above or below the other. The separation tests are strict, so exact
    /// edge contact (`a.right() == b.x`) is reported as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }

    /// Width times height of the shared region, zero when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let width = self.right().min(other.right()) - self.x.max(other.x);
        let height = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if width <= 0.0 || height <= 0.0 {
            0.0
        } else {
            width * height
        }
    }
}

/// Anything occupying space on the board.
pub trait Footprint {
    fn footprint(&self) -> Rect;
}

impl Footprint for Rect {
    fn footprint(&self) -> Rect {
        *self
    }
}

/// Visible and scrollable extents of the board element, supplied by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Visible width of the board.
    pub client_width: f64,
    /// Visible height of the board.
    pub client_height: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
    /// Full scrollable width of the board content.
    pub scroll_width: f64,
    /// Full scrollable height of the board content.
    pub scroll_height: f64,
}

impl Viewport {
    /// Viewport scrolled to the origin, with content no larger than the view.
    pub fn unscrolled(width: f64, height: f64) -> Self {
        Self {
            client_width: width,
            client_height: height,
            scroll_left: 0.0,
            scroll_top: 0.0,
            scroll_width: width,
            scroll_height: height,
        }
    }

    /// Largest left offset that keeps a box of `width` inside the padding.
    pub fn max_left(&self, width: f64) -> f64 {
        self.scroll_width - width - EDGE_PADDING
    }

    /// Largest top offset that keeps a box of `height` inside the padding.
    pub fn max_top(&self, height: f64) -> f64 {
        self.scroll_height - height - EDGE_PADDING
    }
}

/// Rounds `value` to the nearest multiple of [`GRID_STEP`].
pub fn snap_to_grid(value: f64) -> f64 {
    (value / GRID_STEP + 0.5).floor() * GRID_STEP
}

/// Clamps `value` into `[min, max]`, letting `min` win when the range is empty.
pub fn clamp_low_wins(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Returns whether `candidate` overlaps any box in `boxes`.
pub fn is_position_occupied<B: Footprint>(candidate: &Rect, boxes: &[B]) -> bool {
    boxes
        .iter()
        .any(|existing| candidate.overlaps(&existing.footprint()))
}

#[cfg(test)]
mod tests {
    use super::{clamp_low_wins, is_position_occupied, snap_to_grid, Rect};

    #[test]
    fn snap_rounds_to_nearest_step() {
        assert_eq!(snap_to_grid(0.0), 0.0);
        assert_eq!(snap_to_grid(14.0), 0.0);
        assert_eq!(snap_to_grid(16.0), 30.0);
        assert_eq!(snap_to_grid(44.9), 30.0);
        assert_eq!(snap_to_grid(45.0), 60.0);
    }

    #[test]
    fn snap_rounds_negative_halves_up() {
        assert_eq!(snap_to_grid(-15.0), 0.0);
        assert_eq!(snap_to_grid(-16.0), -30.0);
    }

    #[test]
    fn overlap_is_symmetric_and_detects_disjoint_boxes() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let c = Rect::new(300.0, 300.0, 10.0, 10.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn strictly_separated_boxes_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let right = Rect::new(100.5, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 100.5, 10.0, 10.0);

        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert_eq!(a.intersection_area(&right), 0.0);
    }

    #[test]
    fn exact_edge_contact_counts_as_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let flush = Rect::new(100.0, 0.0, 10.0, 10.0);

        assert!(a.overlaps(&flush));
        assert_eq!(a.intersection_area(&flush), 0.0);
    }

    #[test]
    fn clamp_prefers_lower_bound_on_empty_range() {
        assert_eq!(clamp_low_wins(50.0, 16.0, 10.0), 16.0);
        assert_eq!(clamp_low_wins(5.0, 16.0, 100.0), 16.0);
        assert_eq!(clamp_low_wins(500.0, 16.0, 100.0), 100.0);
        assert_eq!(clamp_low_wins(42.0, 16.0, 100.0), 42.0);
    }

    #[test]
    fn occupied_scan_checks_every_box() {
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(200.0, 200.0, 10.0, 10.0),
        ];
        assert!(is_position_occupied(
            &Rect::new(195.0, 195.0, 10.0, 10.0),
            &boxes
        ));
        assert!(!is_position_occupied(
            &Rect::new(50.0, 50.0, 10.0, 10.0),
            &boxes
        ));
        assert!(!is_position_occupied::<Rect>(
            &Rect::new(0.0, 0.0, 10.0, 10.0),
            &[]
        ));
    }
}
