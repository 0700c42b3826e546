use axum::http::HeaderValue;
use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service name reported by health endpoints.
pub const SERVICE_NAME: &str = "IsCoolGPT";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-lite";
const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 2048;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HEALTH_PROBE_TIMEOUT_SECS: u64 = 10;

// Defaults for optional request fields.
pub const DEFAULT_EXPLANATION_LEVEL: &str = "intermediate";
pub const DEFAULT_DIFFICULTY: &str = "medium";
pub const DEFAULT_QUESTION_TYPE: &str = "multiple_choice";
pub const DEFAULT_CURRENT_LEVEL: &str = "beginner";

#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub mode: ModeFlags,
    pub cors: CorsSettings,
    pub debug: bool,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub max_output_tokens: i32,
    /// Ceiling for feature generation calls.
    pub generation_timeout: Duration,
    /// Ceiling for the `/health/full` probe.
    pub health_probe_timeout: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    /// `CI=true`
    pub ci: bool,
    /// `SKIP_API_VALIDATION=true`
    pub skip_api_validation: bool,
}

impl ModeFlags {
    /// Either flag puts the service in CI/test mode: no provider is ever contacted.
    pub fn is_test_mode(&self) -> bool {
        self.ci || self.skip_api_validation
    }
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    /// `["*"]` means any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl StudyConfig {
    /// Load configuration from the process environment (and `.env`).
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Fails when the Gemini credential is missing outside CI/test mode.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mode = ModeFlags {
            ci: parse_flag(get("CI").as_deref()),
            skip_api_validation: parse_flag(get("SKIP_API_VALIDATION").as_deref()),
        };

        let api_key = get("GEMINI_API_KEY").map(Secret::new);
        if api_key.is_none() && !mode.is_test_mode() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY environment variable is required"
            )));
        }

        let gemini = GeminiSettings {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_output_tokens: parse_positive(
                "MAX_TOKENS",
                get("MAX_TOKENS"),
                DEFAULT_MAX_OUTPUT_TOKENS,
            )?,
            generation_timeout: Duration::from_secs(parse_positive(
                "GENERATION_TIMEOUT_SECS",
                get("GENERATION_TIMEOUT_SECS"),
                DEFAULT_GENERATION_TIMEOUT_SECS,
            )?),
            health_probe_timeout: Duration::from_secs(parse_positive(
                "HEALTH_PROBE_TIMEOUT_SECS",
                get("HEALTH_PROBE_TIMEOUT_SECS"),
                DEFAULT_HEALTH_PROBE_TIMEOUT_SECS,
            )?),
        };

        let allowed_origins: Vec<String> = get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        // Each origin becomes a response header value.
        if let Some(bad) = allowed_origins
            .iter()
            .find(|o| o.as_str() != "*" && HeaderValue::from_str(o).is_err())
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "ALLOWED_ORIGINS contains an invalid origin '{}'",
                bad
            )));
        }

        Ok(StudyConfig {
            common,
            gemini,
            mode,
            cors: CorsSettings { allowed_origins },
            debug: parse_flag(get("DEBUG").as_deref()),
            otlp_endpoint: get("OTLP_ENDPOINT"),
        })
    }

    /// Whether a non-empty provider credential is present.
    pub fn api_configured(&self) -> bool {
        self.gemini
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Parse a numeric setting that must be greater than zero.
fn parse_positive<T>(key: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = value else {
        return Ok(default);
    };

    let parsed: T = raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })?;

    if parsed <= T::default() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be greater than zero, got '{}'",
            key,
            raw
        )));
    }

    Ok(parsed)
}
