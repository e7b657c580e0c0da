use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_DNS_TIMEOUT_SECS: u64 = 2;

/// Errors raised while resolving [`AppConfig`] at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_SECRET_KEY must be set to a non-empty value")]
    MissingSecret,

    #[error("{name} is not a valid integer: {value:?}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{name} is not a valid boolean: {value:?}")]
    InvalidBool { name: &'static str, value: String },
}

/// # Application Configuration
///
/// Process-wide settings resolved once at startup and shared read-only
/// with the API-key guard and the request handlers.
///
/// ## Environment Variables
/// - `HOST` (default `127.0.0.1`)
/// - `PORT` (default `8000`)
/// - `ENVIRONMENT` (default `development`)
/// - `API_PREFIX` (default `/api`)
/// - `API_SECRET_KEY` (required)
/// - `CHECK_DELIVERABILITY` (default `true`)
/// - `DNS_TIMEOUT_SECS` (default `2`)
/// - `DISPOSABLE_DOMAINS_FILE` (optional, extra blocklist entries)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub api_prefix: String,
    pub api_secret_key: String,
    pub check_deliverability: bool,
    pub dns_timeout_secs: u64,
    pub disposable_domains_file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_secret_key = var("API_SECRET_KEY").ok_or(ConfigError::MissingSecret)?;

        let port = match var("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let dns_timeout_secs = match var("DNS_TIMEOUT_SECS") {
            Some(raw) => parse_number("DNS_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_DNS_TIMEOUT_SECS,
        };

        let check_deliverability = match var("CHECK_DELIVERABILITY") {
            Some(raw) => parse_bool("CHECK_DELIVERABILITY", &raw)?,
            None => true,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            api_prefix: normalize_prefix(
                &lookup("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
            ),
            api_secret_key,
            check_deliverability,
            dns_timeout_secs,
            disposable_domains_file: var("DISPOSABLE_DOMAINS_FILE").map(PathBuf::from),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Base path of the versioned API, e.g. `/api/v1`.
    pub fn versioned_prefix(&self) -> String {
        format!("{}/v1", self.api_prefix)
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    raw.trim()
        .parse::<T>()
        .map_err(|source| ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
            source,
        })
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: raw.to_string(),
        }),
    }
}

/// Ensures a leading `/` and strips trailing ones; `""` and `"/"` map to `""`.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
