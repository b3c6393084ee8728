//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes validate models before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::event::EventValidationError;
use crate::model::expense::ExpenseValidationError;
use crate::model::notification::NotificationValidationError;
use crate::model::participant::ParticipantValidationError;
use crate::model::task::TaskValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod event_repo;
pub mod expense_repo;
pub mod notification_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by all persistence modules.
#[derive(Debug)]
pub enum RepoError {
    Event(EventValidationError),
    Participant(ParticipantValidationError),
    Expense(ExpenseValidationError),
    Task(TaskValidationError),
    Notification(NotificationValidationError),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event(err) => write!(f, "{err}"),
            Self::Participant(err) => write!(f, "{err}"),
            Self::Expense(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
            Self::Notification(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Event(err) => Some(err),
            Self::Participant(err) => Some(err),
            Self::Expense(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Notification(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Event(value)
    }
}

impl From<ParticipantValidationError> for RepoError {
    fn from(value: ParticipantValidationError) -> Self {
        Self::Participant(value)
    }
}

impl From<ExpenseValidationError> for RepoError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Expense(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Task(value)
    }
}

impl From<NotificationValidationError> for RepoError {
    fn from(value: NotificationValidationError) -> Self {
        Self::Notification(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

fn parse_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
