//! Notes board domain model.
//!
//! # Responsibility
//! - Define positioned boxes (sticky notes and full-width rectangles).
//! - Provide size/expansion helpers used by drag, resize and expand actions.
//!
//! # Invariants
//! - Position and size values are finite; sizes are strictly positive.
//! - `footprint()` uses the stored `width`/`height` even while a box is
//!   expanded; expansion never changes where new boxes are placed.

use crate::placement::{Footprint, Rect};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a board box.
pub type BoxId = Uuid;

pub const NOTE_WIDTH: f64 = 220.0;
pub const NOTE_HEIGHT: f64 = 140.0;
/// Twenty text lines at roughly 24px each.
pub const RECTANGLE_HEIGHT: f64 = 480.0;
pub const RECTANGLE_LINES: usize = 20;
pub const EXPANDED_WIDTH: f64 = 600.0;
pub const EXPANDED_HEIGHT: f64 = 400.0;
pub const DEFAULT_NOTE_CONTENT: &str = "Type your note...";
pub const DEFAULT_BOX_COLOR: &str = "#fffbe6";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    /// Small sticky note, centered on creation.
    #[default]
    Note,
    /// Full-width topic container, left-aligned on creation.
    Rectangle,
}

impl BoxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Rectangle => "rectangle",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "note" => Some(Self::Note),
            "rectangle" => Some(Self::Rectangle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoxValidationError {
    NonFinitePosition { x: f64, y: f64 },
    InvalidSize { width: f64, height: f64 },
    EmptyColor,
}

impl Display for BoxValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinitePosition { x, y } => {
                write!(f, "box position must be finite, got ({x}, {y})")
            }
            Self::InvalidSize { width, height } => {
                write!(f, "box size must be finite and positive, got {width}x{height}")
            }
            Self::EmptyColor => write!(f, "box color must not be blank"),
        }
    }
}

impl Error for BoxValidationError {}

/// One positioned box on the notes board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardBox {
    pub id: BoxId,
    #[serde(rename = "type", default)]
    pub kind: BoxKind,
    pub content: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub expanded_width: Option<f64>,
    #[serde(default)]
    pub expanded_height: Option<f64>,
    #[serde(default)]
    pub topic_name: String,
    /// Unix epoch milliseconds of the last content or position change.
    pub updated_at: i64,
}

impl BoardBox {
    /// Creates a default sticky note at the given position.
    pub fn note(x: f64, y: f64, color: impl Into<String>, updated_at: i64) -> Self {
        Self::with_kind(
            BoxKind::Note,
            Rect::new(x, y, NOTE_WIDTH, NOTE_HEIGHT),
            DEFAULT_NOTE_CONTENT.to_string(),
            color.into(),
            updated_at,
        )
    }

    /// Creates an empty twenty-line rectangle container.
    pub fn rectangle(bounds: Rect, color: impl Into<String>, updated_at: i64) -> Self {
        Self::with_kind(
            BoxKind::Rectangle,
            bounds,
            "\n".repeat(RECTANGLE_LINES - 1),
            color.into(),
            updated_at,
        )
    }

    fn with_kind(
        kind: BoxKind,
        bounds: Rect,
        content: String,
        color: String,
        updated_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content,
            color,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            expanded: false,
            expanded_width: None,
            expanded_height: None,
            topic_name: String::new(),
            updated_at,
        }
    }

    /// Size currently shown on the board.
    pub fn displayed_size(&self) -> (f64, f64) {
        if self.expanded {
            (
                self.expanded_width.unwrap_or(EXPANDED_WIDTH),
                self.expanded_height.unwrap_or(EXPANDED_HEIGHT),
            )
        } else {
            (self.width, self.height)
        }
    }

    /// Records a resize against the dimensions that are currently shown.
    pub fn apply_resize(&mut self, width: f64, height: f64) {
        if self.expanded {
            self.expanded_width = Some(width);
            self.expanded_height = Some(height);
        } else {
            self.width = width;
            self.height = height;
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn validate(&self) -> Result<(), BoxValidationError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(BoxValidationError::NonFinitePosition {
                x: self.x,
                y: self.y,
            });
        }
        validate_size(self.width, self.height)?;
        if let (Some(width), Some(height)) = (self.expanded_width, self.expanded_height) {
            validate_size(width, height)?;
        }
        if self.color.trim().is_empty() {
            return Err(BoxValidationError::EmptyColor);
        }
        Ok(())
    }
}

impl Footprint for BoardBox {
    fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Checks a width/height pair for resize and creation paths.
pub fn validate_size(width: f64, height: f64) -> Result<(), BoxValidationError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(BoxValidationError::InvalidSize { width, height })
    }
}
