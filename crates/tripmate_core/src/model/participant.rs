//! Participant record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a participant.
pub type ParticipantId = Uuid;

/// Validation failures for [`Participant`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantValidationError {
    NilUuid,
    EmptyDisplayName,
}

impl Display for ParticipantValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "participant id must not be the nil uuid"),
            Self::EmptyDisplayName => write!(f, "participant display name must not be empty"),
        }
    }
}

impl Error for ParticipantValidationError {}

/// One person on an event's roster.
///
/// Immutable once loaded for a given event; identity never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
}

impl Participant {
    /// Creates a participant with a generated stable ID.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
        }
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ParticipantValidationError> {
        if self.id.is_nil() {
            return Err(ParticipantValidationError::NilUuid);
        }
        if self.display_name.trim().is_empty() {
            return Err(ParticipantValidationError::EmptyDisplayName);
        }
        Ok(())
    }
}
