//! Expense record and split-share invariants.
//!
//! # Responsibility
//! - Define the `Expense` record and its per-participant share breakdown.
//! - Enforce the core money invariant: shares sum exactly to the amount.
//!
//! # Invariants
//! - `amount_minor` is strictly positive.
//! - Every share is non-negative and each participant appears at most once.
//! - `sum(shares) == amount_minor` exactly; amounts are integer minor units.

use crate::model::event::EventId;
use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an expense.
pub type ExpenseId = Uuid;

/// How an expense amount is divided across participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Divided evenly across the roster, remainder to the first entries.
    Equal,
    /// Per-participant shares entered by hand.
    Custom,
}

/// One participant's slice of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub participant_id: ParticipantId,
    /// Owed amount in minor currency units.
    pub amount_minor: i64,
    /// Whether this participant has paid their share back.
    pub is_paid: bool,
}

impl ExpenseShare {
    pub fn new(participant_id: ParticipantId, amount_minor: i64) -> Self {
        Self {
            participant_id,
            amount_minor,
            is_paid: false,
        }
    }
}

/// Validation failures for [`Expense`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NilUuid,
    EmptyTitle,
    NonPositiveAmount(i64),
    /// An expense must be owed by at least one participant.
    NoShares,
    NegativeShare {
        participant_id: ParticipantId,
        amount_minor: i64,
    },
    DuplicateShareParticipant(ParticipantId),
    /// Shares do not add up to the expense amount.
    ShareSumMismatch {
        expected_minor: i64,
        actual_minor: i64,
    },
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "expense id must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "expense title must not be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "expense amount must be positive, got {amount}")
            }
            Self::NoShares => write!(f, "expense must have at least one share"),
            Self::NegativeShare {
                participant_id,
                amount_minor,
            } => write!(
                f,
                "share for participant {participant_id} must not be negative, got {amount_minor}"
            ),
            Self::DuplicateShareParticipant(id) => {
                write!(f, "participant {id} appears more than once in shares")
            }
            Self::ShareSumMismatch {
                expected_minor,
                actual_minor,
            } => write!(
                f,
                "shares sum to {actual_minor} but expense amount is {expected_minor}"
            ),
        }
    }
}

impl Error for ExpenseValidationError {}

/// Canonical record for one expense inside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub event_id: EventId,
    pub title: String,
    /// Total amount in minor currency units.
    pub amount_minor: i64,
    /// Participant who fronted the money.
    pub paid_by: ParticipantId,
    pub split_mode: SplitMode,
    /// Share breakdown, in the order shares were allocated.
    pub shares: Vec<ExpenseShare>,
    /// Whether the whole expense has been settled up.
    pub is_settled: bool,
}

impl Expense {
    /// Creates a new expense with a generated stable ID.
    ///
    /// The record is not validated here; call [`Expense::validate`] (repos
    /// do this on every write path).
    pub fn new(
        event_id: EventId,
        title: impl Into<String>,
        amount_minor: i64,
        paid_by: ParticipantId,
        split_mode: SplitMode,
        shares: Vec<ExpenseShare>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            title: title.into(),
            amount_minor,
            paid_by,
            split_mode,
            shares,
            is_settled: false,
        }
    }

    /// Checks record-level invariants, including the exact share-sum rule.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.is_nil() || self.event_id.is_nil() || self.paid_by.is_nil() {
            return Err(ExpenseValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        if self.amount_minor <= 0 {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount_minor));
        }
        if self.shares.is_empty() {
            return Err(ExpenseValidationError::NoShares);
        }

        let mut seen = HashSet::with_capacity(self.shares.len());
        let mut sum: i64 = 0;
        for share in &self.shares {
            if share.amount_minor < 0 {
                return Err(ExpenseValidationError::NegativeShare {
                    participant_id: share.participant_id,
                    amount_minor: share.amount_minor,
                });
            }
            if !seen.insert(share.participant_id) {
                return Err(ExpenseValidationError::DuplicateShareParticipant(
                    share.participant_id,
                ));
            }
            sum += share.amount_minor;
        }

        if sum != self.amount_minor {
            return Err(ExpenseValidationError::ShareSumMismatch {
                expected_minor: self.amount_minor,
                actual_minor: sum,
            });
        }

        Ok(())
    }

    /// Marks the expense as settled up.
    pub fn settle(&mut self) {
        self.is_settled = true;
    }
}
