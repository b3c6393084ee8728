//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate split calculation, persistence and notifications into
//!   use-case level APIs.
//! - Keep consumers decoupled from storage details.
//!
//! # Invariants
//! - Every operation takes an explicit [`crate::model::event::EventContext`];
//!   there is no ambient event or user identity.
//! - Saves are synchronous and return `Result`; no retries, no timers.

pub mod expense_service;
pub mod task_service;

/// Renders a minor-unit amount as a major-unit decimal string, e.g. `1500`
/// becomes `15.00`. Currency symbol is a presentation concern.
pub(crate) fn format_amount_minor(amount_minor: i64) -> String {
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::format_amount_minor;

    #[test]
    fn format_amount_minor_renders_decimals() {
        assert_eq!(format_amount_minor(1500), "15.00");
        assert_eq!(format_amount_minor(305), "3.05");
        assert_eq!(format_amount_minor(0), "0.00");
        assert_eq!(format_amount_minor(-50), "-0.50");
    }
}
