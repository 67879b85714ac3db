//! Backend use-case services.
//!
//! # Responsibility
//! - Implement the backend contract over the local task store.
//! - Keep the view controller decoupled from storage details.

pub mod task_service;
