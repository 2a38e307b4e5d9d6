//! Board history snapshot model.
//!
//! # Invariants
//! - `boxes` is a deep copy; editing the live board never mutates a snapshot.
//! - `name` is never blank once persisted.

use crate::model::board::{BoardBox, BoxKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a history snapshot.
pub type SnapshotId = Uuid;

/// Named copy of the whole board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: SnapshotId,
    pub name: String,
    /// Unix epoch milliseconds of the last save.
    pub saved_at: i64,
    pub boxes: Vec<BoardBox>,
}

impl Snapshot {
    /// First rectangle container, whose topic doubles as the board title.
    pub fn title_box_mut(&mut self) -> Option<&mut BoardBox> {
        self.boxes
            .iter_mut()
            .find(|item| item.kind == BoxKind::Rectangle)
    }
}

/// Name given to a saved board without a titled rectangle.
pub fn default_snapshot_name(date: NaiveDate) -> String {
    format!("Saved Board {}", date.format("%-m/%-d/%Y"))
}

/// Board title derived from the first rectangle's topic, if any.
pub fn board_title(boxes: &[BoardBox]) -> Option<&str> {
    boxes
        .iter()
        .find(|item| item.kind == BoxKind::Rectangle)
        .map(|item| item.topic_name.as_str())
        .filter(|topic| !topic.is_empty())
}
