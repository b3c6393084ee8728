use rusqlite::Connection;
use tripmate_core::db::open_db_in_memory;
use tripmate_core::{
    Event, EventRepository, Participant, RepoError, SqliteEventRepository, SqliteTaskRepository,
    Task, TaskListQuery, TaskRepository, TaskStatus, TaskValidationError,
};
use uuid::Uuid;

fn seed_event(conn: &Connection) -> Event {
    let events = SqliteEventRepository::new(conn);
    let event = Event::new("Planning", 1_760_000_000_000);
    events.create_event(&event).unwrap();
    event
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = Task::new(event.id, "Buy tickets");
    task.due_epoch_ms = Some(1_760_000_100_000);
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task);
    assert_eq!(loaded.status, TaskStatus::Todo);
}

#[test]
fn create_rejects_empty_title() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.create_task(&Task::new(event.id, "  ")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Task(TaskValidationError::EmptyTitle)
    ));
}

#[test]
fn update_task_replaces_fields() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn);
    let events = SqliteEventRepository::new(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    let alex = Participant::new("Alex");
    events.add_participant(event.id, &alex).unwrap();

    let mut task = Task::new(event.id, "Book a table");
    repo.create_task(&task).unwrap();

    task.assignee = Some(alex.id);
    task.status = TaskStatus::InProgress;
    repo.update_task(&task).unwrap();

    let loaded = repo.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded.assignee, Some(alex.id));
    assert_eq!(loaded.status, TaskStatus::InProgress);
}

#[test]
fn set_status_on_missing_task_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed_event(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.set_status(Uuid::new_v4(), TaskStatus::Done).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn list_tasks_filters_by_status() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    for (title, status) in [
        ("Buy tickets", TaskStatus::Todo),
        ("Book a table", TaskStatus::InProgress),
        ("Write the list", TaskStatus::Done),
    ] {
        let mut task = Task::new(event.id, title);
        task.status = status;
        repo.create_task(&task).unwrap();
    }

    let all = repo.list_tasks(event.id, &TaskListQuery::default()).unwrap();
    assert_eq!(all.len(), 3);

    let done = repo
        .list_tasks(
            event.id,
            &TaskListQuery {
                status: Some(TaskStatus::Done),
            },
        )
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "Write the list");
}

#[test]
fn list_tasks_orders_dated_tasks_before_undated() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    let undated = Task::new(event.id, "Someday");
    repo.create_task(&undated).unwrap();

    let mut later = Task::new(event.id, "Later");
    later.due_epoch_ms = Some(1_760_000_200_000);
    repo.create_task(&later).unwrap();

    let mut soon = Task::new(event.id, "Soon");
    soon.due_epoch_ms = Some(1_760_000_100_000);
    repo.create_task(&soon).unwrap();

    let titles: Vec<String> = repo
        .list_tasks(event.id, &TaskListQuery::default())
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["Soon", "Later", "Someday"]);
}

#[test]
fn delete_task_removes_it() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn);
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new(event.id, "Temporary");
    repo.create_task(&task).unwrap();
    repo.delete_task(task.id).unwrap();

    assert_eq!(repo.get_task(task.id).unwrap(), None);
}
