//! Task use-case service.
//!
//! # Responsibility
//! - Provide create/status/list entry points for the tasks tab.
//! - Compute progress statistics via the pure aggregation module.
//! - Emit `task_assigned` notifications when a task lands on someone.
//!
//! # Invariants
//! - New tasks default to `todo` unless the request names an initial status.
//! - Operations are scoped by `EventContext`: a task from another event is
//!   reported as not found, never touched.

use crate::model::event::EventContext;
use crate::model::notification::{Notification, NotificationKind};
use crate::model::participant::ParticipantId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::RepoError;
use crate::stats::{aggregate, TaskStats};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    pub assignee: Option<ParticipantId>,
    /// Optional due date in unix epoch milliseconds.
    pub due_epoch_ms: Option<i64>,
    /// Explicit initial status; defaults to `todo`.
    pub initial_status: Option<TaskStatus>,
}

impl NewTaskRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<T, N> {
    tasks: T,
    notifications: N,
}

impl<T, N> TaskService<T, N>
where
    T: TaskRepository,
    N: NotificationRepository,
{
    /// Creates a service using the provided repository implementations.
    pub fn new(tasks: T, notifications: N) -> Self {
        Self {
            tasks,
            notifications,
        }
    }

    /// Creates one task inside the context's event.
    ///
    /// # Contract
    /// - Status defaults to `todo` when the request carries none.
    /// - An assigned task produces a `task_assigned` notification for the
    ///   assignee.
    pub fn create_task(
        &self,
        ctx: EventContext,
        request: &NewTaskRequest,
    ) -> Result<Task, TaskServiceError> {
        let mut task = Task::new(ctx.event_id, request.title.clone());
        task.assignee = request.assignee;
        task.due_epoch_ms = request.due_epoch_ms;
        if let Some(status) = request.initial_status {
            task.status = status;
        }

        self.tasks.create_task(&task)?;

        if let Some(assignee) = task.assignee {
            let notification = Notification::new(
                assignee,
                NotificationKind::TaskAssigned,
                "New task",
                format!("You were assigned the task \"{}\"", task.title),
                ctx.event_id,
            );
            self.notifications.create_notification(&notification)?;
        }

        info!(
            "event=task_created module=service status=ok event_id={} task_id={} assigned={}",
            ctx.event_id,
            task.id,
            task.assignee.is_some()
        );

        Ok(task)
    }

    /// Moves a task of the context's event to a new status.
    pub fn update_status(
        &self,
        ctx: EventContext,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<(), TaskServiceError> {
        self.owned_task(ctx, task_id)?;
        self.tasks.set_status(task_id, status)?;
        Ok(())
    }

    /// Marks a task as done.
    pub fn complete_task(&self, ctx: EventContext, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.update_status(ctx, task_id, TaskStatus::Done)
    }

    /// Removes a task from the context's event.
    pub fn delete_task(&self, ctx: EventContext, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.owned_task(ctx, task_id)?;
        self.tasks.delete_task(task_id)?;
        Ok(())
    }

    /// Lists the event's tasks, optionally restricted to one status.
    pub fn list_tasks(
        &self,
        ctx: EventContext,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, TaskServiceError> {
        let query = TaskListQuery { status };
        Ok(self.tasks.list_tasks(ctx.event_id, &query)?)
    }

    /// Computes the progress numbers for the tasks tab.
    pub fn progress(&self, ctx: EventContext) -> Result<TaskStats, TaskServiceError> {
        let tasks = self
            .tasks
            .list_tasks(ctx.event_id, &TaskListQuery::default())?;
        Ok(aggregate(&tasks))
    }

    fn owned_task(&self, ctx: EventContext, task_id: TaskId) -> Result<Task, TaskServiceError> {
        let task = self
            .tasks
            .get_task(task_id)?
            .filter(|task| task.event_id == ctx.event_id)
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;
        Ok(task)
    }
}
