//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep tool/CLI layers decoupled from storage details.
//!
//! Every service borrows a repository and a clock; construction is cheap
//! and services hold no state of their own.

pub mod event_service;
pub mod expense_service;
pub mod note_service;
pub mod reminder_service;
pub mod summary_service;
pub mod task_service;
