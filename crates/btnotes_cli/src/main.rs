//! BTNotes command-line front end.
//!
//! # Responsibility
//! - Map the login, signup and app pages onto subcommands.
//! - Keep one session in a SQLite file shared across invocations.
//!
//! # Invariants
//! - Validation failures print the user-facing message and exit non-zero;
//!   they never panic.
//! - App subcommands redirect to login when the session has no token.

use anyhow::{bail, Context, Result};
use btnotes_core::store::SqliteSessionStore;
use btnotes_core::{
    init_logging, App, AppConfig, AppError, AuthError, AuthService, ConfigOverrides, LoginForm,
    Page, Route, SignupForm, SortDirection, TaskColumn, TaskForm, TaskId, TaskType,
};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "btnotes", version, about = "BTNotes task and notes manager")]
struct Cli {
    /// Session file (env: BTNOTES_SESSION).
    #[arg(long, global = true)]
    session: Option<PathBuf>,
    /// trace|debug|info|warn|error (env: BTNOTES_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute log directory; logging is off without one (env: BTNOTES_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with any non-empty username and password.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create a demo account (password of at least 6 characters).
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// End the session.
    Logout,
    /// Show the dashboard: cards, task table, progress, projects, team.
    App {
        /// Filter the task table.
        #[arg(long)]
        search: Option<String>,
        /// Task table sort column: title|type|priority|status|due.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
    },
    /// Add a task or note.
    Add {
        #[arg(long)]
        title: String,
        /// Todo | "Plan Note" | "Password Note".
        #[arg(long = "type", default_value = "Todo")]
        kind: String,
        /// 1-5, defaults to 3.
        #[arg(long)]
        priority: Option<u8>,
        /// YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Required for Password Note.
        #[arg(long)]
        password: Option<String>,
    },
    /// Flip a task between pending and complete.
    Toggle { id: i64 },
    /// Delete a task after confirmation.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Default)]
struct TableControls {
    search: Option<String>,
    sort: Option<TaskColumn>,
    desc: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli, confirm_delete) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs one subcommand. `confirm` answers the delete prompt for a title.
fn run(cli: Cli, confirm: impl FnOnce(&str) -> bool) -> Result<ExitCode> {
    let config = AppConfig::resolve(ConfigOverrides {
        session_path: cli.session,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    });
    if let Some(dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, &dir.to_string_lossy())?;
    }

    let mut store = SqliteSessionStore::open(&config.session_path).with_context(|| {
        format!(
            "failed to open session `{}`",
            config.session_path.display()
        )
    })?;
    info!("event=cli_start module=cli status=ok");

    match cli.command {
        Command::Login { username, password } => {
            login_page(&mut store, LoginForm { username, password })
        }
        Command::Signup {
            username,
            password,
            confirm,
        } => signup_page(
            &mut store,
            SignupForm {
                username,
                password,
                confirm,
            },
        ),
        Command::Logout => {
            AuthService::new(&mut store).logout()?;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        Command::App { search, sort, desc } => {
            let sort = match sort.as_deref() {
                Some(raw) => match TaskColumn::parse(raw) {
                    Some(column) if column.is_orderable() => Some(column),
                    _ => bail!("cannot sort by `{raw}`; expected title|type|priority|status|due"),
                },
                None => None,
            };
            with_app(&mut store, |app| {
                print_dashboard(app, &TableControls { search, sort, desc });
                Ok(())
            })
        }
        Command::Add {
            title,
            kind,
            priority,
            due,
            description,
            password,
        } => {
            let Some(kind) = TaskType::parse(&kind) else {
                bail!("unknown type `{kind}`; expected Todo, \"Plan Note\" or \"Password Note\"");
            };
            let form = TaskForm {
                title,
                kind,
                priority,
                due_date: due,
                description,
                password,
            };
            with_app(&mut store, |app| {
                let id = app.add_task(&form)?;
                println!("Added: your item has been saved (id {id}).");
                print_summary(app);
                Ok(())
            })
        }
        Command::Toggle { id } => with_app(&mut store, |app| {
            let id = TaskId::new(id);
            app.toggle_task(id)?;
            match app.find_task(id) {
                Some(task) => println!("{} is now {}.", task.title, task.status.label()),
                None => println!("No task with id {id}."),
            }
            print_summary(app);
            Ok(())
        }),
        Command::Delete { id, yes } => with_app(&mut store, |app| {
            let Some(pending) = app.request_delete(TaskId::new(id)) else {
                println!("No task with id {id}.");
                return Ok(());
            };
            if yes || confirm(pending.title()) {
                app.confirm_delete(pending)?;
                println!("Deleted.");
            } else {
                pending.cancel();
                println!("Cancelled.");
            }
            print_summary(app);
            Ok(())
        }),
    }
}

fn login_page(store: &mut SqliteSessionStore, form: LoginForm) -> Result<ExitCode> {
    let mut auth = AuthService::new(&mut *store);
    if auth.route(Page::Login) == Route::Redirect(Page::App) {
        println!("Already signed in.");
        return open_app_page(store);
    }
    match auth.login(&form) {
        Ok(_) => {
            println!("Logged in. Welcome back to BTNotes.");
            open_app_page(store)
        }
        Err(err) => auth_failure(err),
    }
}

fn signup_page(store: &mut SqliteSessionStore, form: SignupForm) -> Result<ExitCode> {
    let mut auth = AuthService::new(&mut *store);
    if auth.route(Page::Signup) == Route::Redirect(Page::App) {
        println!("Already signed in.");
        return open_app_page(store);
    }
    match auth.signup(&form) {
        Ok(_) => {
            println!("Account created. Your BTNotes account is ready.");
            open_app_page(store)
        }
        Err(err) => auth_failure(err),
    }
}

fn auth_failure(err: AuthError) -> Result<ExitCode> {
    match err {
        AuthError::Store(store_err) => Err(store_err.into()),
        validation => {
            eprintln!("{validation}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn open_app_page(store: &mut SqliteSessionStore) -> Result<ExitCode> {
    with_app(store, |app| {
        print_dashboard(app, &TableControls::default());
        Ok(())
    })
}

/// Opens the app page and runs `action`, turning validation failures into
/// a printed message plus a failing exit code.
fn with_app(
    store: &mut SqliteSessionStore,
    action: impl FnOnce(&mut App<&mut SqliteSessionStore>) -> Result<(), AppError>,
) -> Result<ExitCode> {
    let mut app = match App::open(store) {
        Ok(app) => app,
        Err(AppError::NotAuthenticated) => {
            eprintln!("Not signed in. Run `btnotes login` first.");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    match action(&mut app) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(AppError::Form(err)) => {
            eprintln!("{}: {err}", err.title());
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn print_dashboard(app: &mut App<&mut SqliteSessionStore>, controls: &TableControls) {
    if let Some(table) = app.views_mut().tasks_table_mut() {
        if let Some(search) = controls.search.as_deref() {
            table.set_search(search);
        }
        if let Some(column) = controls.sort {
            let direction = if controls.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            table.set_order(column, direction);
        } else if controls.desc {
            let column = table.order().column;
            table.set_order(column, SortDirection::Desc);
        }
    }
    print!("{}", app.views().dashboard());
}

fn print_summary(app: &App<&mut SqliteSessionStore>) {
    let counts = app.progress_counts();
    println!(
        "{} item(s): {} complete, {} pending.",
        counts.total(),
        counts.complete,
        counts.pending
    );
}

/// Prompts on stdin. Unreadable input counts as "no".
fn confirm_delete(title: &str) -> bool {
    print!("Delete item \"{title}\"? This action cannot be undone. [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
