//! Event and roster repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist event records, their budget, and the participant roster.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Roster order is stable: join time first, then participant id.

use crate::model::event::{Event, EventId, EventValidationError};
use crate::model::participant::Participant;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    start_epoch_ms,
    end_epoch_ms,
    budget_minor
FROM events";

/// Repository interface for event aggregate roots.
pub trait EventRepository {
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn update_event(&self, event: &Event) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// Sets the planning budget. The budget is independent of expenses.
    fn set_budget(&self, id: EventId, budget_minor: i64) -> RepoResult<()>;
    /// Adds one participant to the event roster, creating the participant
    /// record when it does not exist yet.
    fn add_participant(&self, event_id: EventId, participant: &Participant) -> RepoResult<()>;
    /// Lists the roster in join order.
    fn list_participants(&self, event_id: EventId) -> RepoResult<Vec<Participant>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (
                id,
                title,
                description,
                start_epoch_ms,
                end_epoch_ms,
                budget_minor
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                event.id.to_string(),
                event.title.as_str(),
                event.description.as_str(),
                event.start_epoch_ms,
                event.end_epoch_ms,
                event.budget_minor,
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &Event) -> RepoResult<()> {
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                title = ?1,
                description = ?2,
                start_epoch_ms = ?3,
                end_epoch_ms = ?4,
                budget_minor = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                event.title.as_str(),
                event.description.as_str(),
                event.start_epoch_ms,
                event.end_epoch_ms,
                event.budget_minor,
                event.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id));
        }

        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn set_budget(&self, id: EventId, budget_minor: i64) -> RepoResult<()> {
        if budget_minor <= 0 {
            return Err(EventValidationError::NonPositiveBudget(budget_minor).into());
        }

        let changed = self.conn.execute(
            "UPDATE events
             SET
                budget_minor = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![budget_minor, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn add_participant(&self, event_id: EventId, participant: &Participant) -> RepoResult<()> {
        participant.validate()?;

        let tx = self.conn.unchecked_transaction()?;

        // Participants are immutable once created: the id wins, a differing
        // display name in the insert is ignored.
        tx.execute(
            "INSERT OR IGNORE INTO participants (id, display_name) VALUES (?1, ?2);",
            params![participant.id.to_string(), participant.display_name.as_str()],
        )?;

        // Re-joining an event is a no-op; a missing event surfaces as a
        // foreign key failure from SQLite.
        tx.execute(
            "INSERT OR IGNORE INTO event_participants (event_id, participant_id)
             VALUES (?1, ?2);",
            params![event_id.to_string(), participant.id.to_string()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn list_participants(&self, event_id: EventId) -> RepoResult<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.display_name
             FROM event_participants ep
             JOIN participants p ON p.id = ep.participant_id
             WHERE ep.event_id = ?1
             ORDER BY ep.joined_at ASC, p.id ASC;",
        )?;

        let mut rows = stmt.query([event_id.to_string()])?;
        let mut participants = Vec::new();

        while let Some(row) = rows.next()? {
            participants.push(parse_participant_row(row)?);
        }

        Ok(participants)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let id_text: String = row.get("id")?;
    let event = Event {
        id: parse_uuid(&id_text, "events.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        start_epoch_ms: row.get("start_epoch_ms")?,
        end_epoch_ms: row.get("end_epoch_ms")?,
        budget_minor: row.get("budget_minor")?,
    };
    event.validate()?;
    Ok(event)
}

fn parse_participant_row(row: &Row<'_>) -> RepoResult<Participant> {
    let id_text: String = row.get("id")?;
    let participant = Participant {
        id: parse_uuid(&id_text, "participants.id")?,
        display_name: row.get("display_name")?,
    };
    participant.validate()?;
    Ok(participant)
}
