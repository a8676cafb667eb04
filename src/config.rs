use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Digest used for newly stored passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// sha1(plaintext || salt), kept for existing credentials
    Sha1,
    #[default]
    Argon2,
}

impl FromStr for PasswordScheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "legacy" => Ok(Self::Sha1),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => f.write_str("sha1"),
            Self::Argon2 => f.write_str("argon2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub scheme: PasswordScheme,
    pub accept_legacy: bool,
    pub rehash_on_login: bool,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            scheme: PasswordScheme::default(),
            accept_legacy: true,
            rehash_on_login: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub password: PasswordConfig,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl AppConfig {
    /// Load from the process environment, after reading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let scheme = match lookup("PASSWORD_SCHEME") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "PASSWORD_SCHEME",
                value,
            })?,
            None => PasswordScheme::default(),
        };

        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            scheme,
            accept_legacy: parse_bool(&lookup, "ACCEPT_LEGACY_HASHES", defaults.accept_legacy)?,
            rehash_on_login: parse_bool(&lookup, "REHASH_ON_LOGIN", defaults.rehash_on_login)?,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        let log_filter =
            lookup("RUST_LOG").unwrap_or_else(|| "user_credentials=info,sea_orm=warn".to_string());

        Ok(Self {
            database_url,
            password,
            log_format,
            log_filter,
        })
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.password, PasswordConfig::default());
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_database_url_negative() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[rstest]
    #[case("sha1", PasswordScheme::Sha1)]
    #[case("LEGACY", PasswordScheme::Sha1)]
    #[case("argon2", PasswordScheme::Argon2)]
    #[case("Argon2id", PasswordScheme::Argon2)]
    fn test_scheme_parsing(#[case] raw: &str, #[case] expected: PasswordScheme) {
        let config = load(&[("DATABASE_URL", "x"), ("PASSWORD_SCHEME", raw)]).unwrap();
        assert_eq!(config.password.scheme, expected);
    }

    #[test]
    fn test_invalid_values_negative() {
        assert!(matches!(
            load(&[("DATABASE_URL", "x"), ("PASSWORD_SCHEME", "md5")]),
            Err(ConfigError::Invalid { key: "PASSWORD_SCHEME", .. })
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "x"), ("REHASH_ON_LOGIN", "maybe")]),
            Err(ConfigError::Invalid { key: "REHASH_ON_LOGIN", .. })
        ));
    }

    #[test]
    fn test_flags_and_log_format() {
        let config = load(&[
            ("DATABASE_URL", "x"),
            ("ACCEPT_LEGACY_HASHES", "false"),
            ("REHASH_ON_LOGIN", "0"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert!(!config.password.accept_legacy);
        assert!(!config.password.rehash_on_login);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
