//! Placeholder authentication gate.
//!
//! # Responsibility
//! - Derive the session auth state from token presence.
//! - Validate login/signup forms and issue a demo token.
//! - Decide page redirects between login, signup and the app.
//!
//! # Invariants
//! - Credentials are never verified, hashed or logged; any non-empty
//!   input passes.
//! - A session is `Authenticated` iff a non-empty token is stored.

use crate::store::{SessionStore, StoreError, StoreResult, AUTH_KEY};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum signup password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;
const TOKEN_PREFIX: &str = "demo-token-";

/// Page modes the front end can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    App,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated { token: String },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Routing decision for a page visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Stay,
    Redirect(Page),
}

/// Raw login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Raw signup form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Debug)]
pub enum AuthError {
    /// Login without username or password.
    MissingCredentials,
    /// Signup with any field empty.
    MissingFields,
    PasswordTooShort { min_chars: usize },
    PasswordMismatch,
    Store(StoreError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "Please enter both username and password."),
            Self::MissingFields => write!(f, "All fields are required."),
            Self::PasswordTooShort { min_chars } => write!(
                f,
                "Password must be at least {min_chars} characters long."
            ),
            Self::PasswordMismatch => write!(f, "Passwords do not match."),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Auth gate over one session store.
pub struct AuthService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Current auth state. An unreadable token counts as anonymous.
    pub fn state(&self) -> AuthState {
        match self.store.get(AUTH_KEY) {
            Ok(Some(token)) if !token.is_empty() => AuthState::Authenticated { token },
            Ok(_) => AuthState::Anonymous,
            Err(err) => {
                warn!("event=auth_state module=auth status=error error={err}");
                AuthState::Anonymous
            }
        }
    }

    /// Decides whether visiting `page` stays or redirects.
    pub fn route(&self, page: Page) -> Route {
        route_for(&self.state(), page)
    }

    /// Accepts any non-empty username/password pair and stores a new token.
    pub fn login(&mut self, form: &LoginForm) -> Result<String, AuthError> {
        if form.username.trim().is_empty() || form.password.trim().is_empty() {
            warn!("event=auth_login module=auth status=rejected reason=missing_credentials");
            return Err(AuthError::MissingCredentials);
        }
        let token = self.issue_token()?;
        info!("event=auth_login module=auth status=ok");
        Ok(token)
    }

    /// Validates signup fields (presence, length, confirmation, in that
    /// order) and stores a new token.
    pub fn signup(&mut self, form: &SignupForm) -> Result<String, AuthError> {
        validate_signup(form).inspect_err(|err| {
            warn!(
                "event=auth_signup module=auth status=rejected reason={}",
                signup_rejection_code(err)
            );
        })?;
        let token = self.issue_token()?;
        info!("event=auth_signup module=auth status=ok");
        Ok(token)
    }

    /// Clears the token. Logging out an anonymous session is a no-op.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.store.remove(AUTH_KEY)?;
        info!("event=auth_logout module=auth status=ok");
        Ok(())
    }

    fn issue_token(&mut self) -> Result<String, AuthError> {
        let token = demo_token(Utc::now().timestamp_millis());
        self.store.set(AUTH_KEY, &token)?;
        Ok(token)
    }
}

/// Pure routing table used by `AuthService::route`.
pub fn route_for(state: &AuthState, page: Page) -> Route {
    match (state.is_authenticated(), page) {
        (true, Page::Login | Page::Signup) => Route::Redirect(Page::App),
        (false, Page::App) => Route::Redirect(Page::Login),
        _ => Route::Stay,
    }
}

/// Checks a signup form without touching the store.
pub fn validate_signup(form: &SignupForm) -> Result<(), AuthError> {
    let username = form.username.trim();
    let password = form.password.trim();
    let confirm = form.confirm.trim();

    if username.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::PasswordTooShort {
            min_chars: MIN_PASSWORD_CHARS,
        });
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    Ok(())
}

fn signup_rejection_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingCredentials | AuthError::MissingFields => "missing_fields",
        AuthError::PasswordTooShort { .. } => "password_too_short",
        AuthError::PasswordMismatch => "password_mismatch",
        AuthError::Store(_) => "store_error",
    }
}

fn demo_token(now_ms: i64) -> String {
    format!("{TOKEN_PREFIX}{now_ms}")
}

#[cfg(test)]
mod tests {
    use super::{demo_token, route_for, validate_signup, AuthError, AuthState, Page, Route, SignupForm};

    fn signup(username: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        }
    }

    #[test]
    fn route_table_matches_auth_state() {
        let anonymous = AuthState::Anonymous;
        let authenticated = AuthState::Authenticated {
            token: "demo-token-1".to_string(),
        };

        assert_eq!(route_for(&anonymous, Page::Login), Route::Stay);
        assert_eq!(route_for(&anonymous, Page::Signup), Route::Stay);
        assert_eq!(route_for(&anonymous, Page::App), Route::Redirect(Page::Login));
        assert_eq!(route_for(&authenticated, Page::Login), Route::Redirect(Page::App));
        assert_eq!(route_for(&authenticated, Page::Signup), Route::Redirect(Page::App));
        assert_eq!(route_for(&authenticated, Page::App), Route::Stay);
    }

    #[test]
    fn signup_checks_run_in_order() {
        assert!(matches!(
            validate_signup(&signup("amira", "", "abc")),
            Err(AuthError::MissingFields)
        ));
        // Short and mismatched: length is reported first.
        assert!(matches!(
            validate_signup(&signup("amira", "abc", "xyz")),
            Err(AuthError::PasswordTooShort { min_chars: 6 })
        ));
        assert!(matches!(
            validate_signup(&signup("amira", "secret1", "secret2")),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(validate_signup(&signup("amira", " secret1 ", "secret1")).is_ok());
    }

    #[test]
    fn demo_token_has_stable_prefix() {
        assert_eq!(demo_token(42), "demo-token-42");
    }
}
