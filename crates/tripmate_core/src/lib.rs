//! Core domain logic for tripmate, a shared event-planning app.
//! This crate is the single source of truth for business invariants:
//! expense splitting, task progress, and the persistence behind them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod split;
pub mod stats;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventContext, EventId, EventValidationError};
pub use model::expense::{
    Expense, ExpenseId, ExpenseShare, ExpenseValidationError, SplitMode,
};
pub use model::notification::{Notification, NotificationId, NotificationKind};
pub use model::participant::{Participant, ParticipantId};
pub use model::task::{Task, TaskId, TaskStatus, TaskValidationError};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::expense_repo::{ExpenseRepository, SqliteExpenseRepository};
pub use repo::notification_repo::{
    NotificationListQuery, NotificationRepository, SqliteNotificationRepository,
};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::expense_service::{
    BudgetSummary, ExpenseService, ExpenseServiceError, NewExpenseRequest, SplitSpec,
};
pub use service::task_service::{NewTaskRequest, TaskService, TaskServiceError};
pub use split::{
    compute_custom_split, compute_equal_split, SplitResult, SplitValidationError,
};
pub use stats::{aggregate, filter_by_status, StatusFilter, TaskStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
