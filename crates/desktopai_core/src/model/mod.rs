//! Domain values shared by calendar, dashboard and task-store code.
//!
//! # Responsibility
//! - Define the task record as delivered by the backend.
//! - Define canonical date identity used for every date comparison.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Dates cross process boundaries only in ISO `YYYY-MM-DD` form.

pub mod date_key;
pub mod task;
