//! Pure task-progress aggregation.
//!
//! # Responsibility
//! - Compute per-status counts and the completion percentage.
//! - Provide a restartable status filter over task collections.
//!
//! # Invariants
//! - Input collections are never mutated.
//! - Filtering preserves the original relative order.

use crate::model::task::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Summary counts derived from a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    /// `round(done / total * 100)`, or 0 when there are no tasks.
    pub percent_complete: u8,
}

/// Status filter for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// No filtering; every task passes.
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Whether a task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => task.status == status,
        }
    }
}

/// Computes summary statistics for the given tasks.
///
/// Pure: the input slice is only read. Empty input yields all zeroes.
pub fn aggregate(tasks: &[Task]) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Todo => stats.todo += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Done => stats.done += 1,
        }
    }

    if stats.total > 0 {
        let percent = (stats.done as f64 / stats.total as f64 * 100.0).round();
        stats.percent_complete = percent as u8;
    }

    stats
}

/// Returns a lazy, restartable iterator over tasks matching `filter`.
///
/// The iterator is `Clone`, so callers can restart the walk without
/// re-invoking this function. Relative order of the input is preserved.
pub fn filter_by_status(
    tasks: &[Task],
    filter: StatusFilter,
) -> impl Iterator<Item = &Task> + Clone {
    tasks.iter().filter(move |task| filter.matches(task))
}

#[cfg(test)]
mod tests {
    use super::{aggregate, filter_by_status, StatusFilter, TaskStats};
    use crate::model::task::{Task, TaskStatus};
    use uuid::Uuid;

    fn task_with_status(event_id: Uuid, title: &str, status: TaskStatus) -> Task {
        let mut task = Task::new(event_id, title);
        task.status = status;
        task
    }

    fn sample_tasks() -> Vec<Task> {
        let event_id = Uuid::new_v4();
        vec![
            task_with_status(event_id, "buy tickets", TaskStatus::Todo),
            task_with_status(event_id, "book a table", TaskStatus::InProgress),
            task_with_status(event_id, "write the shopping list", TaskStatus::Done),
        ]
    }

    #[test]
    fn aggregate_of_empty_input_is_all_zero() {
        assert_eq!(aggregate(&[]), TaskStats::default());
    }

    #[test]
    fn aggregate_counts_each_status() {
        let stats = aggregate(&sample_tasks());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.percent_complete, 33);
    }

    #[test]
    fn aggregate_rounds_completion_percentage() {
        let event_id = Uuid::new_v4();
        let tasks = vec![
            task_with_status(event_id, "a", TaskStatus::Done),
            task_with_status(event_id, "b", TaskStatus::Done),
            task_with_status(event_id, "c", TaskStatus::Todo),
        ];

        // 2/3 rounds up to 67.
        assert_eq!(aggregate(&tasks).percent_complete, 67);
    }

    #[test]
    fn filter_by_status_keeps_only_matches_in_order() {
        let mut tasks = sample_tasks();
        let event_id = tasks[0].event_id;
        tasks.push(task_with_status(event_id, "confirm rsvp", TaskStatus::Done));

        let done: Vec<&str> = filter_by_status(&tasks, StatusFilter::Only(TaskStatus::Done))
            .map(|task| task.title.as_str())
            .collect();

        assert_eq!(done, vec!["write the shopping list", "confirm rsvp"]);
    }

    #[test]
    fn filter_all_passes_everything_and_restarts() {
        let tasks = sample_tasks();
        let iter = filter_by_status(&tasks, StatusFilter::All);

        assert_eq!(iter.clone().count(), 3);
        // Cloning restarts the walk from the beginning.
        assert_eq!(iter.count(), 3);
    }
}
