//! Core use-case services.
//!
//! # Responsibility
//! - Gate page access on the session token.
//! - Express task list mutations as pure functions over slices.

pub mod auth_service;
pub mod task_service;
