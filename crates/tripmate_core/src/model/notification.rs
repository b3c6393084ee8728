//! In-app notification record.
//!
//! Notifications are emitted by services when something happens that other
//! participants should see (a new expense, a task landing on their plate).
//! Delivery/push is a consumer concern; core only records them.

use crate::model::event::EventId;
use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a notification.
pub type NotificationId = Uuid;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ExpenseAdded,
    TaskAssigned,
    EventUpdate,
}

/// Validation failures for [`Notification`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationValidationError {
    NilUuid,
    EmptyTitle,
}

impl Display for NotificationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "notification id must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "notification title must not be empty"),
        }
    }
}

impl Error for NotificationValidationError {}

/// One notification addressed to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: ParticipantId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Event the notification relates to.
    pub event_id: EventId,
    pub is_read: bool,
}

impl Notification {
    /// Creates an unread notification with a generated stable ID.
    pub fn new(
        recipient: ParticipantId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        event_id: EventId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            event_id,
            is_read: false,
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), NotificationValidationError> {
        if self.id.is_nil() || self.recipient.is_nil() || self.event_id.is_nil() {
            return Err(NotificationValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(NotificationValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Marks this notification as read.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}
