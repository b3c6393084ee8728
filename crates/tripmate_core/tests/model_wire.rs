use tripmate_core::{
    Expense, ExpenseShare, ExpenseValidationError, Notification, NotificationKind, SplitMode,
    Task, TaskStatus,
};
use uuid::Uuid;

#[test]
fn task_serialization_uses_snake_case_status() {
    let event_id = Uuid::new_v4();
    let mut task = Task::new(event_id, "Book a table");
    task.status = TaskStatus::InProgress;
    task.due_epoch_ms = Some(1_760_000_100_000);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["event_id"], event_id.to_string());
    assert_eq!(json["due_epoch_ms"], 1_760_000_100_000_i64);
    assert_eq!(json["assignee"], serde_json::Value::Null);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn expense_serialization_round_trips() {
    let event_id = Uuid::new_v4();
    let payer = Uuid::new_v4();
    let other = Uuid::new_v4();
    let expense = Expense::new(
        event_id,
        "Cinema tickets",
        1500,
        payer,
        SplitMode::Equal,
        vec![
            ExpenseShare::new(payer, 750),
            ExpenseShare::new(other, 750),
        ],
    );

    let json = serde_json::to_value(&expense).unwrap();
    assert_eq!(json["split_mode"], "equal");
    assert_eq!(json["amount_minor"], 1500);
    assert_eq!(json["is_settled"], false);
    assert_eq!(json["shares"][0]["amount_minor"], 750);

    let decoded: Expense = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, expense);
}

#[test]
fn expense_validate_enforces_exact_share_sum() {
    let event_id = Uuid::new_v4();
    let payer = Uuid::new_v4();

    let short = Expense::new(
        event_id,
        "Lunch",
        3200,
        payer,
        SplitMode::Custom,
        vec![ExpenseShare::new(payer, 3100)],
    );
    assert_eq!(
        short.validate().unwrap_err(),
        ExpenseValidationError::ShareSumMismatch {
            expected_minor: 3200,
            actual_minor: 3100,
        }
    );

    let duplicate = Expense::new(
        event_id,
        "Lunch",
        3200,
        payer,
        SplitMode::Custom,
        vec![
            ExpenseShare::new(payer, 1600),
            ExpenseShare::new(payer, 1600),
        ],
    );
    assert_eq!(
        duplicate.validate().unwrap_err(),
        ExpenseValidationError::DuplicateShareParticipant(payer)
    );

    let negative = Expense::new(
        event_id,
        "Lunch",
        100,
        payer,
        SplitMode::Custom,
        vec![ExpenseShare::new(payer, -100)],
    );
    assert!(matches!(
        negative.validate().unwrap_err(),
        ExpenseValidationError::NegativeShare { .. }
    ));
}

#[test]
fn notification_kind_uses_snake_case_wire_names() {
    let notification = Notification::new(
        Uuid::new_v4(),
        NotificationKind::ExpenseAdded,
        "New expense",
        "Expense \"Cinema tickets\" for 15.00 was added",
        Uuid::new_v4(),
    );

    let json = serde_json::to_value(&notification).unwrap();
    assert_eq!(json["kind"], "expense_added");
    assert_eq!(json["is_read"], false);

    let mut decoded: Notification = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, notification);

    decoded.mark_read();
    assert!(decoded.is_read);
}
