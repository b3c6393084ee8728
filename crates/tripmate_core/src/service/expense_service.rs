//! Expense use-case service.
//!
//! # Responsibility
//! - Turn "add expense" requests into validated, persisted records with a
//!   computed share breakdown.
//! - Maintain the budget summary numbers the money tab displays.
//! - Emit `expense_added` notifications to the other share holders.
//!
//! # Invariants
//! - Share mappings always come from the split calculator; the service never
//!   invents amounts.
//! - Operations are scoped by `EventContext`: an expense from another event
//!   is reported as not found, never touched.

use crate::model::event::{EventContext, EventId};
use crate::model::expense::{Expense, ExpenseId, SplitMode};
use crate::model::notification::{Notification, NotificationKind};
use crate::model::participant::ParticipantId;
use crate::repo::event_repo::EventRepository;
use crate::repo::expense_repo::ExpenseRepository;
use crate::repo::notification_repo::NotificationRepository;
use crate::repo::RepoError;
use crate::service::format_amount_minor;
use crate::split::{compute_custom_split, compute_equal_split, SplitValidationError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for expense use-cases.
#[derive(Debug)]
pub enum ExpenseServiceError {
    /// Share mapping failed validation (sum mismatch, negative share, ...).
    InvalidSplit(SplitValidationError),
    /// The context names an event that does not exist.
    EventNotFound(EventId),
    /// Equal split requested for an event with no participants.
    EmptyRoster(EventId),
    ExpenseNotFound(ExpenseId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ExpenseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSplit(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::EmptyRoster(id) => write!(f, "event {id} has no participants to split across"),
            Self::ExpenseNotFound(id) => write!(f, "expense not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExpenseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSplit(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SplitValidationError> for ExpenseServiceError {
    fn from(value: SplitValidationError) -> Self {
        Self::InvalidSplit(value)
    }
}

impl From<RepoError> for ExpenseServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ExpenseNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// How a new expense should be divided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitSpec {
    /// Evenly across the event roster.
    Equal,
    /// Hand-entered shares in minor units.
    Custom(Vec<(ParticipantId, i64)>),
}

/// Request model for adding an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseRequest {
    pub title: String,
    /// Total amount in minor currency units.
    pub amount_minor: i64,
    /// Participant who fronted the money.
    pub paid_by: ParticipantId,
    pub split: SplitSpec,
}

/// Budget numbers for the money tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSummary {
    /// Configured budget, if any, in minor units.
    pub budget_minor: Option<i64>,
    /// Sum of all expense amounts in minor units.
    pub spent_minor: i64,
    /// `budget - spent`; negative when over budget, `None` without a budget.
    pub remaining_minor: Option<i64>,
}

/// Expense service facade over repository implementations.
pub struct ExpenseService<E, X, N> {
    events: E,
    expenses: X,
    notifications: N,
}

impl<E, X, N> ExpenseService<E, X, N>
where
    E: EventRepository,
    X: ExpenseRepository,
    N: NotificationRepository,
{
    /// Creates a service using the provided repository implementations.
    pub fn new(events: E, expenses: X, notifications: N) -> Self {
        Self {
            events,
            expenses,
            notifications,
        }
    }

    /// Adds one expense to the context's event.
    ///
    /// # Contract
    /// - Equal splits are computed over the event roster in join order.
    /// - Custom splits are validated against the amount before persistence.
    /// - Every share holder except the acting participant receives an
    ///   `expense_added` notification.
    pub fn add_expense(
        &self,
        ctx: EventContext,
        request: &NewExpenseRequest,
    ) -> Result<Expense, ExpenseServiceError> {
        let (split_mode, shares) = match &request.split {
            SplitSpec::Equal => {
                let roster = self.events.list_participants(ctx.event_id)?;
                if roster.is_empty() {
                    return Err(ExpenseServiceError::EmptyRoster(ctx.event_id));
                }
                let ids: Vec<ParticipantId> = roster.iter().map(|p| p.id).collect();
                (
                    SplitMode::Equal,
                    compute_equal_split(request.amount_minor, &ids)?,
                )
            }
            SplitSpec::Custom(entries) => (
                SplitMode::Custom,
                compute_custom_split(request.amount_minor, entries)?,
            ),
        };

        let expense = Expense::new(
            ctx.event_id,
            request.title.clone(),
            request.amount_minor,
            request.paid_by,
            split_mode,
            shares,
        );
        self.expenses.create_expense(&expense)?;

        self.notify_share_holders(ctx, &expense)?;

        info!(
            "event=expense_added module=service status=ok event_id={} expense_id={} amount_minor={} shares={}",
            ctx.event_id,
            expense.id,
            expense.amount_minor,
            expense.shares.len()
        );

        Ok(expense)
    }

    /// Lists the event's expenses, newest first.
    pub fn list_expenses(&self, ctx: EventContext) -> Result<Vec<Expense>, ExpenseServiceError> {
        Ok(self.expenses.list_expenses(ctx.event_id)?)
    }

    /// Marks an expense of the context's event as settled up.
    pub fn settle_expense(
        &self,
        ctx: EventContext,
        expense_id: ExpenseId,
    ) -> Result<(), ExpenseServiceError> {
        self.owned_expense(ctx, expense_id)?;
        self.expenses.settle_expense(expense_id)?;
        Ok(())
    }

    /// Removes an expense from the context's event.
    pub fn delete_expense(
        &self,
        ctx: EventContext,
        expense_id: ExpenseId,
    ) -> Result<(), ExpenseServiceError> {
        self.owned_expense(ctx, expense_id)?;
        self.expenses.delete_expense(expense_id)?;
        Ok(())
    }

    /// Sets the event's planning budget, in minor units.
    pub fn set_budget(
        &self,
        ctx: EventContext,
        budget_minor: i64,
    ) -> Result<(), ExpenseServiceError> {
        self.events
            .set_budget(ctx.event_id, budget_minor)
            .map_err(|err| match err {
                RepoError::NotFound(_) => ExpenseServiceError::EventNotFound(ctx.event_id),
                other => other.into(),
            })
    }

    /// Computes the display numbers for the budget panel.
    pub fn budget_summary(&self, ctx: EventContext) -> Result<BudgetSummary, ExpenseServiceError> {
        let event = self
            .events
            .get_event(ctx.event_id)?
            .ok_or(ExpenseServiceError::EventNotFound(ctx.event_id))?;
        let spent_minor = self.expenses.total_spent(ctx.event_id)?;

        Ok(BudgetSummary {
            budget_minor: event.budget_minor,
            spent_minor,
            remaining_minor: event.budget_minor.map(|budget| budget - spent_minor),
        })
    }

    fn owned_expense(
        &self,
        ctx: EventContext,
        expense_id: ExpenseId,
    ) -> Result<Expense, ExpenseServiceError> {
        let expense = self
            .expenses
            .get_expense(expense_id)?
            .filter(|expense| expense.event_id == ctx.event_id)
            .ok_or(ExpenseServiceError::ExpenseNotFound(expense_id))?;
        Ok(expense)
    }

    fn notify_share_holders(
        &self,
        ctx: EventContext,
        expense: &Expense,
    ) -> Result<(), ExpenseServiceError> {
        let message = format!(
            "Expense \"{}\" for {} was added",
            expense.title,
            format_amount_minor(expense.amount_minor)
        );

        for share in &expense.shares {
            if share.participant_id == ctx.actor {
                continue;
            }
            let notification = Notification::new(
                share.participant_id,
                NotificationKind::ExpenseAdded,
                "New expense",
                message.clone(),
                ctx.event_id,
            );
            self.notifications.create_notification(&notification)?;
        }

        Ok(())
    }
}
