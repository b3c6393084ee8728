//! Notification repository contracts and SQLite implementation.

use crate::model::notification::{Notification, NotificationId, NotificationKind};
use crate::model::participant::ParticipantId;
use crate::repo::{bool_to_int, parse_bool, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTIFICATION_SELECT_SQL: &str = "SELECT
    id,
    recipient,
    kind,
    title,
    message,
    event_id,
    is_read
FROM notifications";

/// Query options for listing notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationListQuery {
    pub unread_only: bool,
}

/// Repository interface for notification persistence.
pub trait NotificationRepository {
    fn create_notification(&self, notification: &Notification) -> RepoResult<NotificationId>;
    /// Lists a participant's notifications, newest first.
    fn list_for_recipient(
        &self,
        recipient: ParticipantId,
        query: &NotificationListQuery,
    ) -> RepoResult<Vec<Notification>>;
    fn mark_read(&self, id: NotificationId) -> RepoResult<()>;
}

/// SQLite-backed notification repository.
pub struct SqliteNotificationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotificationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NotificationRepository for SqliteNotificationRepository<'_> {
    fn create_notification(&self, notification: &Notification) -> RepoResult<NotificationId> {
        notification.validate()?;

        self.conn.execute(
            "INSERT INTO notifications (
                id,
                recipient,
                kind,
                title,
                message,
                event_id,
                is_read
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                notification.id.to_string(),
                notification.recipient.to_string(),
                kind_to_db(notification.kind),
                notification.title.as_str(),
                notification.message.as_str(),
                notification.event_id.to_string(),
                bool_to_int(notification.is_read),
            ],
        )?;

        Ok(notification.id)
    }

    fn list_for_recipient(
        &self,
        recipient: ParticipantId,
        query: &NotificationListQuery,
    ) -> RepoResult<Vec<Notification>> {
        let mut sql = format!("{NOTIFICATION_SELECT_SQL} WHERE recipient = ?1");
        if query.unread_only {
            sql.push_str(" AND is_read = 0");
        }
        sql.push_str(" ORDER BY created_at DESC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([recipient.to_string()])?;
        let mut notifications = Vec::new();

        while let Some(row) = rows.next()? {
            notifications.push(parse_notification_row(row)?);
        }

        Ok(notifications)
    }

    fn mark_read(&self, id: NotificationId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notifications SET is_read = 1 WHERE id = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_notification_row(row: &Row<'_>) -> RepoResult<Notification> {
    let id_text: String = row.get("id")?;
    let recipient_text: String = row.get("recipient")?;
    let event_text: String = row.get("event_id")?;

    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid notification kind `{kind_text}` in notifications.kind"
        ))
    })?;

    let notification = Notification {
        id: parse_uuid(&id_text, "notifications.id")?,
        recipient: parse_uuid(&recipient_text, "notifications.recipient")?,
        kind,
        title: row.get("title")?,
        message: row.get("message")?,
        event_id: parse_uuid(&event_text, "notifications.event_id")?,
        is_read: parse_bool(row.get("is_read")?, "notifications.is_read")?,
    };
    notification.validate()?;
    Ok(notification)
}

fn kind_to_db(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::ExpenseAdded => "expense_added",
        NotificationKind::TaskAssigned => "task_assigned",
        NotificationKind::EventUpdate => "event_update",
    }
}

fn parse_kind(value: &str) -> Option<NotificationKind> {
    match value {
        "expense_added" => Some(NotificationKind::ExpenseAdded),
        "task_assigned" => Some(NotificationKind::TaskAssigned),
        "event_update" => Some(NotificationKind::EventUpdate),
        _ => None,
    }
}
