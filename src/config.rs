use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub public_dir: PathBuf,
    pub queue: QueueConfig,
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Where orders go. The URL is mandatory; region and endpoint fall back to
/// the SDK's default resolution when unset.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub url: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub send_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: String,
    pub logo: String,
    pub placeholder: String,
    pub emoji: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: "The Oktaco Shop".to_string(),
            logo: "/oktaco.png".to_string(),
            placeholder: "Tacos, burritos, churros...".to_string(),
            emoji: "🌯".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = non_blank(&lookup, "QUEUE").ok_or_else(|| {
            AppError::Config("QUEUE must be set to the destination queue url".to_string())
        })?;

        let send_timeout_ms: u64 = parse_or_default(&lookup, "QUEUE_SEND_TIMEOUT_MS", 5_000)?;
        if send_timeout_ms == 0 {
            return Err(AppError::Config(
                "QUEUE_SEND_TIMEOUT_MS must be > 0".to_string(),
            ));
        }

        let log_format = match non_blank(&lookup, "LOG_FORMAT").as_deref() {
            None | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "invalid LOG_FORMAT: {other}, expected compact/json"
                )))
            }
        };

        let defaults = Theme::default();

        Ok(Self {
            http_port: parse_or_default(&lookup, "HTTP_PORT", 3000)?,
            log_level: non_blank(&lookup, "LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format,
            public_dir: non_blank(&lookup, "PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            queue: QueueConfig {
                url,
                region: non_blank(&lookup, "REGION"),
                endpoint: non_blank(&lookup, "QUEUE_ENDPOINT"),
                send_timeout: Duration::from_millis(send_timeout_ms),
            },
            theme: Theme {
                title: non_blank(&lookup, "THEME_TITLE").unwrap_or(defaults.title),
                logo: non_blank(&lookup, "THEME_LOGO").unwrap_or(defaults.logo),
                placeholder: non_blank(&lookup, "THEME_PLACEHOLDER")
                    .unwrap_or(defaults.placeholder),
                emoji: non_blank(&lookup, "THEME_EMOJI").unwrap_or(defaults.emoji),
            },
        })
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_blank(lookup, key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Config(format!("invalid {key}: {err}"))),
        None => Ok(default),
    }
}
