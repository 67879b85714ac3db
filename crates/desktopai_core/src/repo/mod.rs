//! Repository contracts and SQLite persistence for the local task store.
//!
//! # Responsibility
//! - Define use-case oriented data access over tasks and settings.
//! - Keep SQL details out of the backend service.
//!
//! # Invariants
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Mutations on missing rows return `NotFound`, not silent success.

pub mod task_repo;
