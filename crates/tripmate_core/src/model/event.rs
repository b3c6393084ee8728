//! Event aggregate root.
//!
//! # Responsibility
//! - Define the `Event` record that owns participants, expenses and tasks.
//! - Carry the explicit call context (`EventContext`) used by service APIs.
//!
//! # Invariants
//! - `end_epoch_ms` must not be earlier than `start_epoch_ms` when both set.
//! - `budget_minor`, when present, is strictly positive.

use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an event aggregate.
pub type EventId = Uuid;

/// Validation failures for [`Event`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventValidationError {
    NilUuid,
    EmptyTitle,
    /// `end_epoch_ms` is earlier than `start_epoch_ms`.
    ReversedWindow,
    /// Budget must be a positive amount of minor currency units.
    NonPositiveBudget(i64),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "event id must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::ReversedWindow => write!(f, "event end must not be earlier than event start"),
            Self::NonPositiveBudget(amount) => {
                write!(f, "event budget must be positive, got {amount}")
            }
        }
    }
}

impl Error for EventValidationError {}

/// Canonical record for one planned event.
///
/// The budget is a display-level number: it is independently settable and
/// not structurally linked to the expense total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Free-form description, empty when not provided.
    pub description: String,
    /// Event start in unix epoch milliseconds.
    pub start_epoch_ms: i64,
    /// Optional event end in unix epoch milliseconds.
    pub end_epoch_ms: Option<i64>,
    /// Optional planning budget in minor currency units.
    pub budget_minor: Option<i64>,
}

impl Event {
    /// Creates a new event with a generated stable ID and no budget.
    pub fn new(title: impl Into<String>, start_epoch_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            start_epoch_ms,
            end_epoch_ms: None,
            budget_minor: None,
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.is_nil() {
            return Err(EventValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if let Some(end) = self.end_epoch_ms {
            if end < self.start_epoch_ms {
                return Err(EventValidationError::ReversedWindow);
            }
        }
        if let Some(budget) = self.budget_minor {
            if budget <= 0 {
                return Err(EventValidationError::NonPositiveBudget(budget));
            }
        }
        Ok(())
    }
}

/// Explicit call context for service operations.
///
/// Replaces ambient page-level identity: every use-case call names the event
/// it operates on and the participant acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    pub event_id: EventId,
    pub actor: ParticipantId,
}

impl EventContext {
    pub fn new(event_id: EventId, actor: ParticipantId) -> Self {
        Self { event_id, actor }
    }
}
