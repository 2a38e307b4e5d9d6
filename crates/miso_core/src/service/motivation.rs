//! Rotating motivational line shown above the task list.

use std::time::Duration;

/// How often the UI advances to the next line.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(8);

pub const MOTIVATION_LINES: [&str; 4] = [
    "\u{2728} Small steps spark big wins.",
    "\u{1F680} Done is better than perfect.",
    "\u{1F3AF} Focus on the next meaningful action.",
    "\u{1F4CB} Deep work loves a tidy list.",
];

/// Cycles through [`MOTIVATION_LINES`] in order, wrapping around.
#[derive(Debug, Clone, Default)]
pub struct MotivationRotator {
    next_index: usize,
}

impl MotivationRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line to display now and advances the cursor.
    pub fn next_line(&mut self) -> &'static str {
        let line = MOTIVATION_LINES[self.next_index];
        self.next_index = (self.next_index + 1) % MOTIVATION_LINES.len();
        line
    }
}
