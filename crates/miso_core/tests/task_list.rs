use chrono::NaiveDate;
use miso_core::db::open_db_in_memory;
use miso_core::{
    landing_stats, FixedClock, NewTask, SqliteBoardRepository, SqlitePreferenceRepository,
    SqliteTaskRepository, TaskCategory, TaskEdit, TaskFilter, TaskPriority, TaskRepository,
    TaskService, TaskServiceError,
};
use rusqlite::Connection;
use uuid::Uuid;

// 2024-03-02T12:00:00Z
const NOW: i64 = 1_709_380_800_000;

type Service<'conn> =
    TaskService<SqliteTaskRepository<'conn>, SqlitePreferenceRepository<'conn>, FixedClock>;

fn service(conn: &Connection) -> Service<'_> {
    TaskService::new(
        SqliteTaskRepository::new(conn),
        SqlitePreferenceRepository::new(conn),
        FixedClock(NOW),
    )
}

#[test]
fn added_tasks_are_listed_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service
        .add_task(NewTask::new("write report", TaskCategory::Work, TaskPriority::High))
        .unwrap();
    service
        .add_task(NewTask::new("  water plants ", TaskCategory::Life, TaskPriority::Low))
        .unwrap();

    let texts: Vec<String> = service
        .list_tasks(TaskFilter::All, "")
        .unwrap()
        .into_iter()
        .map(|task| task.text)
        .collect();
    assert_eq!(texts, vec!["water plants", "write report"]);
}

#[test]
fn add_task_rejects_blank_text_and_keeps_day_and_due_date() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .add_task(NewTask::new("   ", TaskCategory::Focus, TaskPriority::Medium))
        .unwrap_err();
    assert!(matches!(err, TaskServiceError::EmptyText));

    let mut input = NewTask::new("plan sprint", TaskCategory::Ideas, TaskPriority::Medium);
    input.due_date = NaiveDate::from_ymd_opt(2024, 3, 9);
    input.day = Some("tomorrow".to_string());
    let task = service.add_task(input).unwrap();

    let loaded = service.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded.day, "tomorrow");
    assert_eq!(loaded.due_date, NaiveDate::from_ymd_opt(2024, 3, 9));
    assert_eq!(loaded.created_at, NOW);
    assert_eq!(service.last_touched().unwrap(), Some(NOW));
}

#[test]
fn filters_and_search_narrow_the_list() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let report = service
        .add_task(NewTask::new("Write Report", TaskCategory::Work, TaskPriority::High))
        .unwrap();
    service
        .add_task(NewTask::new("read a book", TaskCategory::Life, TaskPriority::Low))
        .unwrap();
    service
        .add_task(NewTask::new("report bug", TaskCategory::Work, TaskPriority::Medium))
        .unwrap();
    service.set_completed(report.id, true).unwrap();

    assert_eq!(service.list_tasks(TaskFilter::All, "").unwrap().len(), 2);
    assert_eq!(service.list_tasks(TaskFilter::Active, "").unwrap().len(), 2);

    let completed = service.list_tasks(TaskFilter::Completed, "").unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, report.id);

    let work = service
        .list_tasks(TaskFilter::Category(TaskCategory::Work), "")
        .unwrap();
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].text, "report bug");

    let searched = service.list_tasks(TaskFilter::Completed, "REPORT").unwrap();
    assert_eq!(searched.len(), 1);
    assert!(service
        .list_tasks(TaskFilter::All, "nothing matches")
        .unwrap()
        .is_empty());
}

#[test]
fn inline_edit_keeps_text_when_blank() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let task = service
        .add_task(NewTask::new("draft", TaskCategory::Focus, TaskPriority::Low))
        .unwrap();

    let edited = service
        .update_task(
            task.id,
            TaskEdit {
                text: "  ".to_string(),
                category: TaskCategory::Ideas,
                priority: TaskPriority::High,
                due_date: None,
            },
        )
        .unwrap();
    assert_eq!(edited.text, "draft");
    assert_eq!(edited.category, TaskCategory::Ideas);
    assert_eq!(edited.priority, TaskPriority::High);
}

#[test]
fn clear_completed_and_stats() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let first = service
        .add_task(NewTask::new("one", TaskCategory::Work, TaskPriority::Low))
        .unwrap();
    let second = service
        .add_task(NewTask::new("two", TaskCategory::Work, TaskPriority::Low))
        .unwrap();
    service
        .add_task(NewTask::new("three", TaskCategory::Work, TaskPriority::Low))
        .unwrap();
    service.set_completed(first.id, true).unwrap();
    service.set_completed(second.id, true).unwrap();

    let stats = service.stats().unwrap();
    assert_eq!(stats.active, 1);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.completion_percent, 67);
    assert_eq!(stats.streak_days, 1);

    assert_eq!(service.clear_completed().unwrap(), 2);
    let stats = service.stats().unwrap();
    assert_eq!(stats.completed, 0);
    assert_eq!(stats.streak_days, 0);
}

#[test]
fn missing_task_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let missing = Uuid::new_v4();

    assert!(matches!(
        service.set_completed(missing, true),
        Err(TaskServiceError::TaskNotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.delete_task(missing),
        Err(TaskServiceError::TaskNotFound(_))
    ));
}

#[test]
fn landing_stats_count_tasks_and_notes() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .add_task(NewTask::new("one", TaskCategory::Work, TaskPriority::Low))
        .unwrap();

    let tasks = SqliteTaskRepository::new(&conn);
    let board = SqliteBoardRepository::new(&conn);
    let stats = landing_stats(&tasks, &board).unwrap();
    assert_eq!(stats.tasks, 1);
    assert_eq!(stats.notes, 0);
    assert_eq!(tasks.count_tasks().unwrap(), 1);
}

#[test]
fn invalid_persisted_category_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO tasks (uuid, text, category, priority, day, completed, created_at)
         VALUES (?1, 'legacy', 'chores', 'low', 'today', 0, 0);",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    assert!(repo.list_tasks().is_err());
}
