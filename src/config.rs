//! Runtime configuration, read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `NOTES_API_URL` | `http://localhost:3001/api` |
//! | `NOTES_SESSION_DB` | `.noteapp_session` |
//! | `NOTES_HTTP_TIMEOUT_SECS` | `10` |
//! | `NOTES_ERROR_TTL_SECS` | `5` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_SESSION_DB: &str = ".noteapp_session";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ERROR_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session_db: PathBuf,
    pub http_timeout: Duration,
    pub error_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_db: PathBuf::from(DEFAULT_SESSION_DB),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            error_ttl: Duration::from_secs(DEFAULT_ERROR_TTL_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("NOTES_API_URL") {
            Some(raw) => {
                let parsed = url::Url::parse(raw.trim()).map_err(|e| {
                    ClientError::Config(format!("NOTES_API_URL is not a valid URL: {}", e))
                })?;
                parsed.as_str().trim_end_matches('/').to_string()
            }
            None => defaults.api_url,
        };

        let session_db = lookup("NOTES_SESSION_DB")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_db);

        let http_timeout = match lookup("NOTES_HTTP_TIMEOUT_SECS") {
            Some(raw) => match parse_secs("NOTES_HTTP_TIMEOUT_SECS", &raw)? {
                // A zero timeout fails every request before it is sent.
                0 => {
                    return Err(ClientError::Config(
                        "NOTES_HTTP_TIMEOUT_SECS must be at least 1".to_string(),
                    ))
                }
                secs => Duration::from_secs(secs),
            },
            None => defaults.http_timeout,
        };

        let error_ttl = match lookup("NOTES_ERROR_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_secs("NOTES_ERROR_TTL_SECS", &raw)?),
            None => defaults.error_ttl,
        };

        Ok(Self {
            api_url,
            session_db,
            http_timeout,
            error_ttl,
        })
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<u64, ClientError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| {
            ClientError::Config(format!(
                "{} must be a whole number of seconds, got {:?}",
                name, raw
            ))
        })
}
