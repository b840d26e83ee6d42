use btnotes_core::store::AUTH_KEY;
use btnotes_core::{
    AuthError, AuthService, AuthState, LoginForm, MemorySessionStore, Page, Route,
    SessionStore, SignupForm, SqliteSessionStore,
};

fn login_form(username: &str, password: &str) -> LoginForm {
    LoginForm {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn signup_form(username: &str, password: &str, confirm: &str) -> SignupForm {
    SignupForm {
        username: username.to_string(),
        password: password.to_string(),
        confirm: confirm.to_string(),
    }
}

#[test]
fn anonymous_session_routes_app_to_login() {
    let auth = AuthService::new(MemorySessionStore::new());
    assert_eq!(auth.state(), AuthState::Anonymous);
    assert_eq!(auth.route(Page::App), Route::Redirect(Page::Login));
    assert_eq!(auth.route(Page::Login), Route::Stay);
    assert_eq!(auth.route(Page::Signup), Route::Stay);
}

#[test]
fn login_with_any_non_empty_credentials_issues_token() {
    let mut auth = AuthService::new(MemorySessionStore::new());
    let token = auth.login(&login_form("anyone", "x")).unwrap();

    assert!(token.starts_with("demo-token-"));
    assert_eq!(auth.state(), AuthState::Authenticated { token });
    assert_eq!(auth.route(Page::Login), Route::Redirect(Page::App));
    assert_eq!(auth.route(Page::Signup), Route::Redirect(Page::App));
    assert_eq!(auth.route(Page::App), Route::Stay);
}

#[test]
fn login_with_blank_field_is_rejected_without_token() {
    let mut auth = AuthService::new(MemorySessionStore::new());
    let err = auth.login(&login_form("  ", "secret")).unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
    assert_eq!(err.to_string(), "Please enter both username and password.");

    let err = auth.login(&login_form("amira", "")).unwrap_err();
    assert!(matches!(err, AuthError::MissingCredentials));
    assert_eq!(auth.state(), AuthState::Anonymous);
}

#[test]
fn signup_validates_then_issues_token() {
    let mut auth = AuthService::new(MemorySessionStore::new());

    let err = auth.signup(&signup_form("bayo", "", "")).unwrap_err();
    assert!(matches!(err, AuthError::MissingFields));

    let err = auth.signup(&signup_form("bayo", "12345", "12345")).unwrap_err();
    assert!(matches!(err, AuthError::PasswordTooShort { min_chars: 6 }));

    let err = auth
        .signup(&signup_form("bayo", "123456", "654321"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Passwords do not match.");
    assert_eq!(auth.state(), AuthState::Anonymous);

    auth.signup(&signup_form("bayo", "123456", "123456")).unwrap();
    assert!(auth.state().is_authenticated());
}

#[test]
fn logout_returns_to_anonymous_and_is_idempotent() {
    let mut store = SqliteSessionStore::open_in_memory().unwrap();
    store.set(AUTH_KEY, "demo-token-1").unwrap();

    let mut auth = AuthService::new(store);
    assert!(auth.state().is_authenticated());
    auth.logout().unwrap();
    auth.logout().unwrap();
    assert_eq!(auth.state(), AuthState::Anonymous);
    assert_eq!(auth.route(Page::App), Route::Redirect(Page::Login));
}

#[test]
fn empty_token_counts_as_anonymous() {
    let mut store = MemorySessionStore::new();
    store.set(AUTH_KEY, "").unwrap();
    let auth = AuthService::new(&mut store);
    assert_eq!(auth.state(), AuthState::Anonymous);
}
