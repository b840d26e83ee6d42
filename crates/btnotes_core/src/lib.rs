//! Core domain logic for BTNotes.
//! This crate is the single source of truth for task list invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod store;

pub use app::{App, AppError, AppResult, PendingDelete};
pub use config::{AppConfig, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectValidationError, TeamMember};
pub use model::seed::{seed_projects, seed_tasks, seed_team};
pub use model::task::{
    Priority, Task, TaskId, TaskIdGenerator, TaskStatus, TaskType, TaskValidationError,
};
pub use render::{format_date, ProgressChart, SortDirection, TaskColumn, TaskTable, Views};
pub use service::auth_service::{
    AuthError, AuthService, AuthState, LoginForm, Page, Route, SignupForm,
};
pub use service::task_service::{
    build_task, create_task, delete_task, progress_counts, toggle_status, ProgressCounts,
    TaskForm, TaskFormError,
};
pub use store::{
    load_json, save_json, MemorySessionStore, SessionStore, SqliteSessionStore, StoreError,
    StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
