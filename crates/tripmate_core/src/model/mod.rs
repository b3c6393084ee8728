//! Domain model for shared event planning.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the records they protect.
//!
//! # Invariants
//! - Every domain object is identified by a stable, non-nil UUID.
//! - Records validate themselves before they are allowed near storage.

pub mod event;
pub mod expense;
pub mod notification;
pub mod participant;
pub mod task;
