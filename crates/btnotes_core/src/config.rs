//! Runtime configuration resolution.
//!
//! Precedence: explicit override, then environment, then default.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Env var naming the session file.
pub const SESSION_PATH_ENV: &str = "BTNOTES_SESSION";
/// Env var naming the log level.
pub const LOG_LEVEL_ENV: &str = "BTNOTES_LOG_LEVEL";
/// Env var naming the absolute log directory.
pub const LOG_DIR_ENV: &str = "BTNOTES_LOG_DIR";
const DEFAULT_SESSION_FILE_NAME: &str = "btnotes_session.sqlite3";

/// Values supplied on the command line, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub session_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub session_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves against an arbitrary environment lookup.
    pub fn resolve_with(overrides: ConfigOverrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let env_value = |key: &str| {
            env(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let session_path = overrides
            .session_path
            .or_else(|| env_value(SESSION_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(default_session_path);
        let log_level = overrides
            .log_level
            .or_else(|| env_value(LOG_LEVEL_ENV))
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = overrides
            .log_dir
            .or_else(|| env_value(LOG_DIR_ENV).map(PathBuf::from));

        Self {
            session_path,
            log_level,
            log_dir,
        }
    }
}

/// Session file in the system temp dir, mirroring a tab-scoped lifetime.
pub fn default_session_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_SESSION_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{
        default_session_path, AppConfig, ConfigOverrides, LOG_DIR_ENV, LOG_LEVEL_ENV,
        SESSION_PATH_ENV,
    };
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), env_from(&[]));
        assert_eq!(config.session_path, default_session_path());
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn env_fills_gaps_and_blank_values_are_ignored() {
        let env = env_from(&[
            (SESSION_PATH_ENV, "/tmp/s.sqlite3"),
            (LOG_LEVEL_ENV, "  "),
            (LOG_DIR_ENV, "/var/log/btnotes"),
        ]);
        let config = AppConfig::resolve_with(ConfigOverrides::default(), env);
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/btnotes")));
    }

    #[test]
    fn overrides_win_over_env() {
        let env = env_from(&[(SESSION_PATH_ENV, "/tmp/env.sqlite3"), (LOG_LEVEL_ENV, "warn")]);
        let overrides = ConfigOverrides {
            session_path: Some(PathBuf::from("/tmp/flag.sqlite3")),
            log_level: Some("trace".to_string()),
            log_dir: None,
        };
        let config = AppConfig::resolve_with(overrides, env);
        assert_eq!(config.session_path, PathBuf::from("/tmp/flag.sqlite3"));
        assert_eq!(config.log_level, "trace");
    }
}
