//! Task list use-case service.
//!
//! # Responsibility
//! - Provide add/complete/edit/delete/clear APIs for the to-do list.
//! - Filter and search the list, and derive completion statistics.
//!
//! # Invariants
//! - New tasks are prepended (the list is newest-first).
//! - The `All` filter hides completed tasks, like `Active`.
//! - Every mutation records a task bookkeeping timestamp.

use crate::clock::{date_from_epoch_ms, Clock};
use crate::model::task::{Task, TaskCategory, TaskId, TaskPriority, DEFAULT_DAY_LABEL};
use crate::repo::preference_repo::PreferenceRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::preference_service::PreferenceService;
use chrono::{Days, NaiveDate};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid due date regex"));

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Task text is blank after trimming.
    EmptyText,
    /// Due date input is not a `YYYY-MM-DD` calendar date.
    InvalidDueDate(String),
    TaskNotFound(TaskId),
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be blank"),
            Self::InvalidDueDate(value) => write!(f, "invalid due date: `{value}`"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Input of the add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    /// Planning bucket; `None` means `today`.
    pub day: Option<String>,
}

impl NewTask {
    pub fn new(text: impl Into<String>, category: TaskCategory, priority: TaskPriority) -> Self {
        Self {
            text: text.into(),
            category,
            priority,
            due_date: None,
            day: None,
        }
    }
}

/// Inline edit of an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Blank text keeps the previous text.
    pub text: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

/// List filter buttons of the task page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Incomplete tasks of every category.
    #[default]
    All,
    Active,
    Completed,
    /// Incomplete tasks of one category.
    Category(TaskCategory),
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All | Self::Active => !task.completed,
            Self::Completed => task.completed,
            Self::Category(category) => task.category == category && !task.completed,
        }
    }
}

/// Header statistics of the task page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub active: usize,
    pub completed: usize,
    /// Rounded completion percentage, 0 for an empty list.
    pub completion_percent: u32,
    /// Consecutive days, ending today, with a completed task.
    pub streak_days: u32,
}

impl TaskStats {
    /// Human label such as `1 day` or `3 days`.
    pub fn streak_label(&self) -> String {
        let suffix = if self.streak_days == 1 { "" } else { "s" };
        format!("{} day{suffix}", self.streak_days)
    }
}

/// Task list service over repository implementations.
pub struct TaskService<R: TaskRepository, P: PreferenceRepository, C: Clock> {
    repo: R,
    prefs: PreferenceService<P>,
    clock: C,
}

impl<R: TaskRepository, P: PreferenceRepository, C: Clock> TaskService<R, P, C> {
    pub fn new(repo: R, prefs: P, clock: C) -> Self {
        Self {
            repo,
            prefs: PreferenceService::new(prefs),
            clock,
        }
    }

    /// Adds a task at the top of the list.
    pub fn add_task(&self, input: NewTask) -> Result<Task, TaskServiceError> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(TaskServiceError::EmptyText);
        }

        let mut task = Task::new(text, input.category, input.priority, self.clock.now_ms());
        task.due_date = input.due_date;
        task.day = input
            .day
            .map(|day| day.trim().to_string())
            .filter(|day| !day.is_empty())
            .unwrap_or_else(|| DEFAULT_DAY_LABEL.to_string());

        self.repo.create_task(&task)?;
        self.touch()?;
        info!(
            "event=task_add module=task status=ok category={} priority={}",
            task.category.as_str(),
            task.priority.as_str()
        );
        Ok(task)
    }

    pub fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, TaskServiceError> {
        let mut task = self.require(id)?;
        task.completed = completed;
        self.repo.update_task(&task)?;
        self.touch()?;
        debug!("event=task_complete module=task status=ok completed={completed}");
        Ok(task)
    }

    /// Applies an inline edit; blank text keeps the previous text.
    pub fn update_task(&self, id: TaskId, edit: TaskEdit) -> Result<Task, TaskServiceError> {
        let mut task = self.require(id)?;
        let text = edit.text.trim();
        if !text.is_empty() {
            task.text = text.to_string();
        }
        task.category = edit.category;
        task.priority = edit.priority;
        task.due_date = edit.due_date;

        self.repo.update_task(&task)?;
        self.touch()?;
        Ok(task)
    }

    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        self.repo.delete_task(id)?;
        self.touch()?;
        info!("event=task_delete module=task status=ok");
        Ok(())
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clear_completed(&self) -> Result<usize, TaskServiceError> {
        let removed = self.repo.delete_completed()?;
        self.touch()?;
        info!("event=task_clear_completed module=task status=ok removed={removed}");
        Ok(removed)
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Lists tasks matching `filter` whose text contains `search`
    /// (case-insensitive).
    pub fn list_tasks(&self, filter: TaskFilter, search: &str) -> RepoResult<Vec<Task>> {
        let needle = search.to_lowercase();
        Ok(self
            .repo
            .list_tasks()?
            .into_iter()
            .filter(|task| filter.matches(task) && task.text.to_lowercase().contains(&needle))
            .collect())
    }

    /// Computes header statistics using the service clock for "today".
    pub fn stats(&self) -> RepoResult<TaskStats> {
        let tasks = self.repo.list_tasks()?;
        Ok(compute_stats(&tasks, self.clock.today()))
    }

    pub fn last_touched(&self) -> RepoResult<Option<i64>> {
        self.prefs.tasks_last_touched()
    }

    fn require(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn touch(&self) -> RepoResult<()> {
        self.prefs.touch_tasks(self.clock.now_ms())
    }
}

/// Derives active/completed counts, completion rate and streak.
pub fn compute_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let completion_percent = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };

    TaskStats {
        active: total - completed,
        completed,
        completion_percent,
        streak_days: calculate_streak(tasks, today),
    }
}

/// Counts consecutive days ending at `today` on which a completed task was
/// created (UTC calendar days).
pub fn calculate_streak(tasks: &[Task], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = tasks
        .iter()
        .filter(|task| task.completed)
        .map(|task| date_from_epoch_ms(task.created_at))
        .collect();

    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        if !days.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.checked_sub_days(Days::new(1));
    }
    streak
}

/// Parses a date-input value (`YYYY-MM-DD`); blank input means no due date.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, TaskServiceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !DUE_DATE_RE.is_match(trimmed) {
        return Err(TaskServiceError::InvalidDueDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| TaskServiceError::InvalidDueDate(trimmed.to_string()))
}

/// Short due-date label such as `Oct 17`.
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{calculate_streak, compute_stats, format_due_date, parse_due_date, TaskFilter};
    use crate::model::task::{Task, TaskCategory, TaskPriority};
    use chrono::NaiveDate;

    const DAY_MS: i64 = 86_400_000;
    // 2024-03-02T00:00:00Z
    const MARCH_2: i64 = 1_709_337_600_000;

    fn task(created_at: i64, completed: bool) -> Task {
        let mut task = Task::new("t", TaskCategory::Work, TaskPriority::Medium, created_at);
        task.completed = completed;
        task
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).expect("day should exist in March")
    }

    #[test]
    fn streak_counts_consecutive_days_back_from_today() {
        let tasks = vec![
            task(MARCH_2 + 5_000, true),
            task(MARCH_2 - DAY_MS + 10, true),
            task(MARCH_2 - DAY_MS + 20, true),
            task(MARCH_2 - 3 * DAY_MS, true),
        ];
        assert_eq!(calculate_streak(&tasks, march(2)), 2);
    }

    #[test]
    fn streak_is_zero_without_completion_today() {
        let tasks = vec![task(MARCH_2 - DAY_MS, true), task(MARCH_2, false)];
        assert_eq!(calculate_streak(&tasks, march(2)), 0);
        assert_eq!(calculate_streak(&[], march(2)), 0);
    }

    #[test]
    fn stats_round_completion_percentage() {
        let tasks = vec![
            task(MARCH_2, true),
            task(MARCH_2, false),
            task(MARCH_2, false),
        ];
        let stats = compute_stats(&tasks, march(2));
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completion_percent, 33);
        assert_eq!(stats.streak_label(), "1 day");

        let empty = compute_stats(&[], march(2));
        assert_eq!(empty.completion_percent, 0);
        assert_eq!(empty.streak_label(), "0 days");
    }

    #[test]
    fn all_filter_hides_completed_tasks() {
        let done = task(0, true);
        let open = task(0, false);
        assert!(!TaskFilter::All.matches(&done));
        assert!(TaskFilter::All.matches(&open));
        assert!(TaskFilter::Completed.matches(&done));
        assert!(TaskFilter::Category(TaskCategory::Work).matches(&open));
        assert!(!TaskFilter::Category(TaskCategory::Life).matches(&open));
        assert!(!TaskFilter::Category(TaskCategory::Work).matches(&done));
    }

    #[test]
    fn due_date_parsing_and_formatting() {
        assert_eq!(
            parse_due_date("").expect("blank input should parse"),
            None
        );
        let october_7 = NaiveDate::from_ymd_opt(2024, 10, 7).expect("October 7 should be valid");
        assert_eq!(
            parse_due_date("2024-10-07").expect("ISO date should parse"),
            Some(october_7)
        );
        assert!(parse_due_date("10/07/2024").is_err());
        assert!(parse_due_date("2024-02-30").is_err());
        assert_eq!(format_due_date(october_7), "Oct 7");
    }
}
