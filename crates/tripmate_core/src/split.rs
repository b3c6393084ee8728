//! Pure expense-splitting calculator.
//!
//! # Responsibility
//! - Compute per-participant owed amounts for equal and custom splits.
//! - Validate inputs defensively; never panic, never touch storage.
//!
//! # Invariants
//! - All amounts are integer minor currency units.
//! - On success, allocations sum exactly to the requested amount.
//! - Allocation order follows the caller-supplied participant order.

use crate::model::expense::ExpenseShare;
use crate::model::participant::ParticipantId;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for split calculations.
pub type SplitResult<T> = Result<T, SplitValidationError>;

/// Validation failures for split calculations.
///
/// The mismatch case carries both totals so callers can show the user what
/// was expected against what their shares add up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitValidationError {
    NonPositiveAmount(i64),
    NoParticipants,
    DuplicateParticipant(ParticipantId),
    NegativeShare {
        participant_id: ParticipantId,
        amount_minor: i64,
    },
    /// Share sum differs from the amount by more than the tolerance.
    SumMismatch {
        expected_minor: i64,
        actual_minor: i64,
    },
}

impl Display for SplitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "split amount must be positive, got {amount}")
            }
            Self::NoParticipants => write!(f, "split requires at least one participant"),
            Self::DuplicateParticipant(id) => {
                write!(f, "participant {id} appears more than once")
            }
            Self::NegativeShare {
                participant_id,
                amount_minor,
            } => write!(
                f,
                "share for participant {participant_id} must not be negative, got {amount_minor}"
            ),
            Self::SumMismatch {
                expected_minor,
                actual_minor,
            } => write!(
                f,
                "shares sum to {actual_minor} but expected {expected_minor}"
            ),
        }
    }
}

impl Error for SplitValidationError {}

/// Custom splits may drift from the amount by at most one minor unit.
///
/// One minor unit is the 0.01 entry granularity of share forms; anything
/// larger is a user error, not rounding.
pub const CUSTOM_SPLIT_TOLERANCE_MINOR: i64 = 1;

/// Divides `amount_minor` evenly across `participant_ids`.
///
/// # Contract
/// - `amount_minor` must be positive; ids must be non-empty and unique.
/// - Base share is `amount / n` rounded down; the first `amount % n`
///   participants in input order receive one extra minor unit, so the
///   allocations always sum exactly to `amount_minor`.
/// - Deterministic: identical inputs yield identical allocations.
pub fn compute_equal_split(
    amount_minor: i64,
    participant_ids: &[ParticipantId],
) -> SplitResult<Vec<ExpenseShare>> {
    if amount_minor <= 0 {
        return Err(SplitValidationError::NonPositiveAmount(amount_minor));
    }
    if participant_ids.is_empty() {
        return Err(SplitValidationError::NoParticipants);
    }
    reject_duplicates(participant_ids)?;

    let count = participant_ids.len() as i64;
    let base = amount_minor / count;
    let remainder = amount_minor % count;

    let shares = participant_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let extra = if (index as i64) < remainder { 1 } else { 0 };
            ExpenseShare::new(id, base + extra)
        })
        .collect();

    Ok(shares)
}

/// Validates hand-entered shares against `amount_minor`.
///
/// # Contract
/// - Rejects negative shares, duplicate participants, and sums that differ
///   from the amount by more than [`CUSTOM_SPLIT_TOLERANCE_MINOR`].
/// - A one-minor-unit drift is absorbed by the last share so the returned
///   allocations sum exactly to `amount_minor`.
pub fn compute_custom_split(
    amount_minor: i64,
    shares: &[(ParticipantId, i64)],
) -> SplitResult<Vec<ExpenseShare>> {
    if amount_minor <= 0 {
        return Err(SplitValidationError::NonPositiveAmount(amount_minor));
    }
    if shares.is_empty() {
        return Err(SplitValidationError::NoParticipants);
    }

    let ids: Vec<ParticipantId> = shares.iter().map(|(id, _)| *id).collect();
    reject_duplicates(&ids)?;

    let mut sum: i64 = 0;
    for &(participant_id, share_minor) in shares {
        if share_minor < 0 {
            return Err(SplitValidationError::NegativeShare {
                participant_id,
                amount_minor: share_minor,
            });
        }
        sum += share_minor;
    }

    let drift = amount_minor - sum;
    if drift.abs() > CUSTOM_SPLIT_TOLERANCE_MINOR {
        return Err(SplitValidationError::SumMismatch {
            expected_minor: amount_minor,
            actual_minor: sum,
        });
    }

    let mut allocations: Vec<ExpenseShare> = shares
        .iter()
        .map(|&(id, share_minor)| ExpenseShare::new(id, share_minor))
        .collect();

    if drift != 0 {
        // Absorbing the drift here keeps the persisted invariant exact. The
        // last share cannot go negative: drift is at most one minor unit and
        // only negative when the sum already exceeds the amount by one.
        let last = allocations
            .last_mut()
            .ok_or(SplitValidationError::NoParticipants)?;
        last.amount_minor += drift;
        if last.amount_minor < 0 {
            return Err(SplitValidationError::SumMismatch {
                expected_minor: amount_minor,
                actual_minor: sum,
            });
        }
    }

    Ok(allocations)
}

fn reject_duplicates(ids: &[ParticipantId]) -> SplitResult<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for &id in ids {
        if !seen.insert(id) {
            return Err(SplitValidationError::DuplicateParticipant(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{compute_custom_split, compute_equal_split, SplitValidationError};
    use uuid::Uuid;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn equal_split_divides_evenly() {
        let participants = ids(3);
        let shares = compute_equal_split(1500, &participants).unwrap();

        assert_eq!(shares.len(), 3);
        assert!(shares.iter().all(|share| share.amount_minor == 500));
    }

    #[test]
    fn equal_split_assigns_remainder_to_first_participants() {
        let participants = ids(3);
        let shares = compute_equal_split(1000, &participants).unwrap();

        let amounts: Vec<i64> = shares.iter().map(|share| share.amount_minor).collect();
        assert_eq!(amounts, vec![334, 333, 333]);
        assert_eq!(amounts.iter().sum::<i64>(), 1000);
    }

    #[test]
    fn equal_split_preserves_participant_order() {
        let participants = ids(4);
        let shares = compute_equal_split(777, &participants).unwrap();

        let returned: Vec<Uuid> = shares.iter().map(|share| share.participant_id).collect();
        assert_eq!(returned, participants);
    }

    #[test]
    fn equal_split_is_deterministic() {
        let participants = ids(5);
        let first = compute_equal_split(9999, &participants).unwrap();
        let second = compute_equal_split(9999, &participants).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_split_rejects_bad_inputs() {
        let participants = ids(2);
        assert_eq!(
            compute_equal_split(0, &participants).unwrap_err(),
            SplitValidationError::NonPositiveAmount(0)
        );
        assert_eq!(
            compute_equal_split(100, &[]).unwrap_err(),
            SplitValidationError::NoParticipants
        );

        let dup = vec![participants[0], participants[0]];
        assert_eq!(
            compute_equal_split(100, &dup).unwrap_err(),
            SplitValidationError::DuplicateParticipant(participants[0])
        );
    }

    #[test]
    fn custom_split_accepts_exact_sum() {
        let participants = ids(2);
        let shares = compute_custom_split(
            3200,
            &[(participants[0], 1600), (participants[1], 1600)],
        )
        .unwrap();

        assert_eq!(shares.iter().map(|s| s.amount_minor).sum::<i64>(), 3200);
    }

    #[test]
    fn custom_split_absorbs_one_unit_drift_into_last_share() {
        let participants = ids(3);
        let shares = compute_custom_split(
            1000,
            &[
                (participants[0], 333),
                (participants[1], 333),
                (participants[2], 333),
            ],
        )
        .unwrap();

        assert_eq!(shares[2].amount_minor, 334);
        assert_eq!(shares.iter().map(|s| s.amount_minor).sum::<i64>(), 1000);
    }

    #[test]
    fn custom_split_rejects_large_mismatch() {
        let participants = ids(2);
        let err = compute_custom_split(1000, &[(participants[0], 400), (participants[1], 400)])
            .unwrap_err();

        assert_eq!(
            err,
            SplitValidationError::SumMismatch {
                expected_minor: 1000,
                actual_minor: 800,
            }
        );
    }

    #[test]
    fn custom_split_rejects_negative_share() {
        let participants = ids(2);
        let err = compute_custom_split(100, &[(participants[0], 150), (participants[1], -50)])
            .unwrap_err();

        assert_eq!(
            err,
            SplitValidationError::NegativeShare {
                participant_id: participants[1],
                amount_minor: -50,
            }
        );
    }
}
