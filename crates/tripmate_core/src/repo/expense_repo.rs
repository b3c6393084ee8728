//! Expense repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist expenses together with their per-participant share breakdown.
//! - Keep expense + shares writes atomic.
//!
//! # Invariants
//! - Write paths call `Expense::validate()` before SQL mutations, so stored
//!   shares always sum exactly to the expense amount.
//! - Share order is preserved via an explicit position column.
//! - Expense listings are newest-first with a stable id tiebreak.

use crate::model::event::EventId;
use crate::model::expense::{Expense, ExpenseId, ExpenseShare, SplitMode};
use crate::model::participant::ParticipantId;
use crate::repo::{bool_to_int, parse_bool, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const EXPENSE_SELECT_SQL: &str = "SELECT
    id,
    event_id,
    title,
    amount_minor,
    paid_by,
    split_mode,
    is_settled
FROM expenses";

/// Repository interface for expense persistence.
pub trait ExpenseRepository {
    fn create_expense(&self, expense: &Expense) -> RepoResult<ExpenseId>;
    fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>>;
    /// Lists an event's expenses, newest first.
    fn list_expenses(&self, event_id: EventId) -> RepoResult<Vec<Expense>>;
    /// Marks the whole expense as settled up.
    fn settle_expense(&self, id: ExpenseId) -> RepoResult<()>;
    /// Marks one participant's share as paid back.
    fn mark_share_paid(&self, id: ExpenseId, participant_id: ParticipantId) -> RepoResult<()>;
    fn delete_expense(&self, id: ExpenseId) -> RepoResult<()>;
    /// Sums all expense amounts for an event, in minor units.
    fn total_spent(&self, event_id: EventId) -> RepoResult<i64>;
}

/// SQLite-backed expense repository.
pub struct SqliteExpenseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExpenseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_shares(&self, id: ExpenseId) -> RepoResult<Vec<ExpenseShare>> {
        let mut stmt = self.conn.prepare(
            "SELECT participant_id, amount_minor, is_paid
             FROM expense_shares
             WHERE expense_id = ?1
             ORDER BY position ASC;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        let mut shares = Vec::new();

        while let Some(row) = rows.next()? {
            let participant_text: String = row.get("participant_id")?;
            shares.push(ExpenseShare {
                participant_id: parse_uuid(&participant_text, "expense_shares.participant_id")?,
                amount_minor: row.get("amount_minor")?,
                is_paid: parse_bool(row.get("is_paid")?, "expense_shares.is_paid")?,
            });
        }

        Ok(shares)
    }
}

impl ExpenseRepository for SqliteExpenseRepository<'_> {
    fn create_expense(&self, expense: &Expense) -> RepoResult<ExpenseId> {
        expense.validate()?;

        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO expenses (
                id,
                event_id,
                title,
                amount_minor,
                paid_by,
                split_mode,
                is_settled
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                expense.id.to_string(),
                expense.event_id.to_string(),
                expense.title.as_str(),
                expense.amount_minor,
                expense.paid_by.to_string(),
                split_mode_to_db(expense.split_mode),
                bool_to_int(expense.is_settled),
            ],
        )?;

        for (position, share) in expense.shares.iter().enumerate() {
            tx.execute(
                "INSERT INTO expense_shares (
                    expense_id,
                    participant_id,
                    amount_minor,
                    is_paid,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    expense.id.to_string(),
                    share.participant_id.to_string(),
                    share.amount_minor,
                    bool_to_int(share.is_paid),
                    position as i64,
                ],
            )?;
        }

        tx.commit()?;
        Ok(expense.id)
    }

    fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPENSE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let expense = parse_expense_row(row, self.load_shares(id)?)?;
        Ok(Some(expense))
    }

    fn list_expenses(&self, event_id: EventId) -> RepoResult<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EXPENSE_SELECT_SQL}
             WHERE event_id = ?1
             ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([event_id.to_string()])?;
        let mut headers = Vec::new();

        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let id = parse_uuid(&id_text, "expenses.id")?;
            headers.push((id, row_fields(row)?));
        }

        let mut expenses = Vec::with_capacity(headers.len());
        for (id, fields) in headers {
            let shares = self.load_shares(id)?;
            expenses.push(assemble_expense(id, fields, shares)?);
        }

        Ok(expenses)
    }

    fn settle_expense(&self, id: ExpenseId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE expenses SET is_settled = 1 WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn mark_share_paid(&self, id: ExpenseId, participant_id: ParticipantId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE expense_shares
             SET is_paid = 1
             WHERE expense_id = ?1 AND participant_id = ?2;",
            params![id.to_string(), participant_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_expense(&self, id: ExpenseId) -> RepoResult<()> {
        // expense_shares rows go with the expense via ON DELETE CASCADE.
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn total_spent(&self, event_id: EventId) -> RepoResult<i64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(amount_minor), 0) FROM expenses WHERE event_id = ?1;",
            [event_id.to_string()],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(total)
    }
}

/// Scalar columns of one expense row, before shares are attached.
struct ExpenseFields {
    event_id: EventId,
    title: String,
    amount_minor: i64,
    paid_by: ParticipantId,
    split_mode: SplitMode,
    is_settled: bool,
}

fn row_fields(row: &Row<'_>) -> RepoResult<ExpenseFields> {
    let event_text: String = row.get("event_id")?;
    let payer_text: String = row.get("paid_by")?;
    let mode_text: String = row.get("split_mode")?;
    let split_mode = parse_split_mode(&mode_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid split mode `{mode_text}` in expenses.split_mode"
        ))
    })?;

    Ok(ExpenseFields {
        event_id: parse_uuid(&event_text, "expenses.event_id")?,
        title: row.get("title")?,
        amount_minor: row.get("amount_minor")?,
        paid_by: parse_uuid(&payer_text, "expenses.paid_by")?,
        split_mode,
        is_settled: parse_bool(row.get("is_settled")?, "expenses.is_settled")?,
    })
}

fn assemble_expense(
    id: ExpenseId,
    fields: ExpenseFields,
    shares: Vec<ExpenseShare>,
) -> RepoResult<Expense> {
    let expense = Expense {
        id,
        event_id: fields.event_id,
        title: fields.title,
        amount_minor: fields.amount_minor,
        paid_by: fields.paid_by,
        split_mode: fields.split_mode,
        shares,
        is_settled: fields.is_settled,
    };
    expense.validate()?;
    Ok(expense)
}

fn parse_expense_row(row: &Row<'_>, shares: Vec<ExpenseShare>) -> RepoResult<Expense> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "expenses.id")?;
    assemble_expense(id, row_fields(row)?, shares)
}

fn split_mode_to_db(mode: SplitMode) -> &'static str {
    match mode {
        SplitMode::Equal => "equal",
        SplitMode::Custom => "custom",
    }
}

fn parse_split_mode(value: &str) -> Option<SplitMode> {
    match value {
        "equal" => Some(SplitMode::Equal),
        "custom" => Some(SplitMode::Custom),
        _ => None,
    }
}
