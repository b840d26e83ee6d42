//! Application state for the app page.
//!
//! # Responsibility
//! - Own the authoritative task list plus read-only reference data.
//! - Apply mutations, persist them, then re-render every view.
//!
//! # Invariants
//! - Every view derives from `App::tasks`; nothing else holds task state.
//! - A mutation replaces the list only after it has been persisted, so a
//!   failed save leaves in-memory state untouched.
//! - Deletion requires an explicit `PendingDelete` confirmation step.

use crate::model::project::{Project, TeamMember};
use crate::model::seed::{seed_projects, seed_tasks, seed_team};
use crate::model::task::{Task, TaskId, TaskIdGenerator};
use crate::render::Views;
use crate::service::auth_service::AuthService;
use crate::service::task_service::{
    create_task, delete_task, find_task, progress_counts, toggle_status, ProgressCounts,
    TaskForm, TaskFormError,
};
use crate::store::{
    load_json, save_json, SessionStore, StoreError, PROJECTS_KEY, TASKS_KEY, TEAM_KEY,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The app page was opened without a session token.
    NotAuthenticated,
    Form(TaskFormError),
    Store(StoreError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not signed in; please log in first"),
            Self::Form(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotAuthenticated => None,
            Self::Form(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TaskFormError> for AppError {
    fn from(value: TaskFormError) -> Self {
        Self::Form(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// A delete awaiting user confirmation.
///
/// Dropping it (or calling `cancel`) abandons the deletion.
#[must_use = "a pending delete does nothing until confirmed"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    id: TaskId,
    title: String,
}

impl PendingDelete {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Title of the task to delete, for the confirmation prompt.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cancel(self) {}
}

/// The app page: session store, lists and views.
pub struct App<S: SessionStore> {
    store: S,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    team: Vec<TeamMember>,
    ids: TaskIdGenerator,
    views: Views,
}

impl<S: SessionStore> App<S> {
    /// Opens the app page for an authenticated session.
    ///
    /// Loads the three collections (seeded when absent or malformed) and
    /// renders every view once.
    ///
    /// # Errors
    /// - `AppError::NotAuthenticated` when no token is stored.
    pub fn open(store: S) -> AppResult<Self> {
        let auth = AuthService::new(store);
        if !auth.state().is_authenticated() {
            warn!("event=app_open module=app status=rejected reason=not_authenticated");
            return Err(AppError::NotAuthenticated);
        }
        let store = auth.into_store();

        let tasks: Vec<Task> = load_json(&store, TASKS_KEY, seed_tasks());
        let projects: Vec<Project> = load_json(&store, PROJECTS_KEY, seed_projects());
        let team: Vec<TeamMember> = load_json(&store, TEAM_KEY, seed_team());
        let ids = TaskIdGenerator::after(&tasks);

        let mut app = Self {
            store,
            tasks,
            projects,
            team,
            ids,
            views: Views::new(),
        };
        app.views.render_tasks(&app.tasks);
        app.views.render_reference(&app.projects, &app.team);

        info!(
            "event=app_open module=app status=ok tasks={} projects={} team={}",
            app.tasks.len(),
            app.projects.len(),
            app.team.len()
        );
        Ok(app)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn team(&self) -> &[TeamMember] {
        &self.team
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut Views {
        &mut self.views
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn progress_counts(&self) -> ProgressCounts {
        progress_counts(&self.tasks)
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        find_task(&self.tasks, id)
    }

    /// Validates `form`, prepends the new task, persists and re-renders.
    ///
    /// Returns the new task's id.
    pub fn add_task(&mut self, form: &TaskForm) -> AppResult<TaskId> {
        let id = self.ids.next_id();
        let next = match create_task(&self.tasks, form, id) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    "event=task_create module=app status=rejected reason={}",
                    form_rejection_code(&err)
                );
                return Err(err.into());
            }
        };
        self.commit(next)?;
        info!(
            "event=task_create module=app status=ok task_id={id} kind={}",
            form.kind.as_str()
        );
        Ok(id)
    }

    /// Flips the status of `id`. Unknown ids change nothing but still
    /// persist and re-render.
    pub fn toggle_task(&mut self, id: TaskId) -> AppResult<()> {
        let next = toggle_status(&self.tasks, id);
        self.commit(next)?;
        info!("event=task_toggle module=app status=ok task_id={id}");
        Ok(())
    }

    /// First step of deletion: returns the pending request, or `None` when
    /// `id` is not in the list.
    pub fn request_delete(&self, id: TaskId) -> Option<PendingDelete> {
        self.find_task(id).map(|task| PendingDelete {
            id: task.id,
            title: task.title.clone(),
        })
    }

    /// Second step of deletion: removes the confirmed task.
    pub fn confirm_delete(&mut self, pending: PendingDelete) -> AppResult<()> {
        self.delete_task(pending.id)
    }

    /// Removes `id` without a confirmation step. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: TaskId) -> AppResult<()> {
        let before = self.tasks.len();
        let next = delete_task(&self.tasks, id);
        let removed = before - next.len();
        self.commit(next)?;
        info!("event=task_delete module=app status=ok task_id={id} removed={removed}");
        Ok(())
    }

    /// Clears the session token and closes the app page.
    pub fn logout(self) -> AppResult<S> {
        let mut auth = AuthService::new(self.store);
        auth.logout()?;
        Ok(auth.into_store())
    }

    fn commit(&mut self, next: Vec<Task>) -> AppResult<()> {
        save_json(&mut self.store, TASKS_KEY, &next)?;
        self.tasks = next;
        self.views.render_tasks(&self.tasks);
        Ok(())
    }
}

fn form_rejection_code(err: &TaskFormError) -> &'static str {
    match err {
        TaskFormError::TitleRequired => "title_required",
        TaskFormError::PasswordRequired => "password_required",
        TaskFormError::Invalid(_) => "invalid_field",
    }
}
