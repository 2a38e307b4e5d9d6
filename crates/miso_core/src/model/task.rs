//! Task domain model.
//!
//! # Responsibility
//! - Define the to-do record and its category/priority vocabularies.
//! - Validate task state before persistence and after read-back.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and non-empty.
//! - `created_at` is epoch milliseconds and drives streak calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Day label assigned when none is provided.
pub const DEFAULT_DAY_LABEL: &str = "today";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Focus,
    Work,
    Life,
    Ideas,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [Self::Focus, Self::Work, Self::Life, Self::Ideas];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Work => "work",
            Self::Life => "life",
            Self::Ideas => "ideas",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "focus" => Some(Self::Focus),
            "work" => Some(Self::Work),
            "life" => Some(Self::Life),
            "ideas" => Some(Self::Ideas),
            _ => None,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Focus => "\u{1F3AF}",
            Self::Work => "\u{1F4BC}",
            Self::Life => "\u{1F3E0}",
            Self::Ideas => "\u{1F4A1}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
    EmptyDayLabel,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be blank"),
            Self::EmptyDayLabel => write!(f, "task day label must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// To-do list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    /// Planning bucket such as `today` or a weekday name.
    pub day: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an incomplete task with a generated ID.
    pub fn new(
        text: impl Into<String>,
        category: TaskCategory,
        priority: TaskPriority,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            category,
            priority,
            due_date: None,
            day: DEFAULT_DAY_LABEL.to_string(),
            completed: false,
            created_at,
        }
    }

    pub fn emoji(&self) -> &'static str {
        self.category.emoji()
    }

    /// Label shown next to the title, `None` for the default bucket.
    pub fn day_badge(&self) -> Option<String> {
        if self.day == DEFAULT_DAY_LABEL {
            return None;
        }
        let mut chars = self.day.chars();
        chars
            .next()
            .map(|first| first.to_uppercase().chain(chars).collect())
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        if self.day.trim().is_empty() {
            return Err(TaskValidationError::EmptyDayLabel);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskCategory, TaskPriority, TaskValidationError};

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(TaskCategory::parse(" Work "), Some(TaskCategory::Work));
        assert_eq!(TaskCategory::parse("chores"), None);
        for category in TaskCategory::ALL {
            assert_eq!(TaskCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn day_badge_hidden_for_today_and_capitalized_otherwise() {
        let mut task = Task::new("read", TaskCategory::Life, TaskPriority::Low, 0);
        assert_eq!(task.day_badge(), None);

        task.day = "tomorrow".to_string();
        assert_eq!(task.day_badge().as_deref(), Some("Tomorrow"));
    }

    #[test]
    fn validate_rejects_blank_text() {
        let task = Task::new("   ", TaskCategory::Focus, TaskPriority::High, 0);
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyText));
    }
}
