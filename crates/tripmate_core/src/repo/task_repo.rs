//! Task repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Listing order: due date ascending with undated tasks last, then newest
//!   created, then id.

use crate::model::event::EventId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    event_id,
    title,
    assignee,
    due_epoch_ms,
    status
FROM tasks";

/// Query options for listing tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskListQuery {
    /// Optional status filter; `None` lists every task.
    pub status: Option<TaskStatus>,
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, event_id: EventId, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn set_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                event_id,
                title,
                assignee,
                due_epoch_ms,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.event_id.to_string(),
                task.title.as_str(),
                task.assignee.map(|id| id.to_string()),
                task.due_epoch_ms,
                task_status_to_db(task.status),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                assignee = ?2,
                due_epoch_ms = ?3,
                status = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                task.title.as_str(),
                task.assignee.map(|id| id.to_string()),
                task.due_epoch_ms,
                task_status_to_db(task.status),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, event_id: EventId, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE event_id = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(event_id.to_string())];

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(task_status_to_db(status).to_string()));
        }

        sql.push_str(
            " ORDER BY due_epoch_ms IS NULL ASC, due_epoch_ms ASC, created_at DESC, id ASC",
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn set_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![task_status_to_db(status), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let event_text: String = row.get("event_id")?;

    let assignee = match row.get::<_, Option<String>>("assignee")? {
        Some(value) => Some(parse_uuid(&value, "tasks.assignee")?),
        None => None,
    };

    let status_text: String = row.get("status")?;
    let status = parse_task_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let task = Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        event_id: parse_uuid(&event_text, "tasks.event_id")?,
        title: row.get("title")?,
        assignee,
        due_epoch_ms: row.get("due_epoch_ms")?,
        status,
    };
    task.validate()?;
    Ok(task)
}

fn task_status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "todo",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

fn parse_task_status(value: &str) -> Option<TaskStatus> {
    match value {
        "todo" => Some(TaskStatus::Todo),
        "in_progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}
