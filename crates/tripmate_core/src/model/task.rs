//! Task record and lifecycle states.
//!
//! # Invariants
//! - A task is always in exactly one of `todo`, `in_progress`, `done`.
//! - New tasks start in `todo` unless an explicit initial status is given.

use crate::model::event::EventId;
use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not started.
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed successfully.
    Done,
}

/// Validation failures for [`Task`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    NilUuid,
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "task id must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical record for one task inside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub event_id: EventId,
    pub title: String,
    /// Participant the task is assigned to, if anyone.
    pub assignee: Option<ParticipantId>,
    /// Optional due date in unix epoch milliseconds.
    pub due_epoch_ms: Option<i64>,
    pub status: TaskStatus,
}

impl Task {
    /// Creates a new unassigned task in `todo`.
    pub fn new(event_id: EventId, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            title: title.into(),
            assignee: None,
            due_epoch_ms: None,
            status: TaskStatus::Todo,
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() || self.event_id.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}
