//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;

use interview_coach_core::{OrchestratorSettings, SamplingParams};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub cors_origin: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub interview_model: String,
    pub feedback_model: String,
    pub interview_sampling: SamplingParams,
    pub feedback_sampling: SamplingParams,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server Settings ---
        let bind_address = parse_var("BIND_ADDRESS", "0.0.0.0:3000".parse::<SocketAddr>().ok())?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // --- Generation Service Settings ---
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let openai_base_url = std::env::var("OPENAI_BASE_URL").ok();
        let interview_model =
            std::env::var("INTERVIEW_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let feedback_model =
            std::env::var("FEEDBACK_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let interview_sampling = SamplingParams {
            temperature: parse_var(
                "INTERVIEW_TEMPERATURE",
                Some(SamplingParams::DIALOGUE.temperature),
            )?,
            max_output_tokens: parse_var(
                "INTERVIEW_MAX_TOKENS",
                Some(SamplingParams::DIALOGUE.max_output_tokens),
            )?,
        };
        let feedback_sampling = SamplingParams {
            temperature: parse_var(
                "FEEDBACK_TEMPERATURE",
                Some(SamplingParams::FEEDBACK.temperature),
            )?,
            max_output_tokens: parse_var(
                "FEEDBACK_MAX_TOKENS",
                Some(SamplingParams::FEEDBACK.max_output_tokens),
            )?,
        };

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            openai_api_key,
            openai_base_url,
            interview_model,
            feedback_model,
            interview_sampling,
            feedback_sampling,
        })
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            dialogue: self.interview_sampling,
            feedback: self.feedback_sampling,
        }
    }
}

/// Reads and parses an environment variable, using `default` when it is unset.
/// A variable without a default is required.
fn parse_var<T>(name: &str, default: Option<T>) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => default.ok_or_else(|| ConfigError::MissingVar(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names so they can run in parallel.

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let value: u32 = parse_var("COACH_TEST_UNSET_TOKENS", Some(200)).unwrap();
        assert_eq!(value, 200);
    }

    #[test]
    fn test_parse_var_missing_without_default() {
        let err = parse_var::<u32>("COACH_TEST_REQUIRED_TOKENS", None).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingVar(name) if name == "COACH_TEST_REQUIRED_TOKENS")
        );
    }

    #[test]
    fn test_parse_var_reads_and_trims_value() {
        std::env::set_var("COACH_TEST_TEMPERATURE", " 0.25 ");
        let value: f32 = parse_var("COACH_TEST_TEMPERATURE", Some(0.7)).unwrap();
        assert!((value - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_var_rejects_invalid_value() {
        std::env::set_var("COACH_TEST_BAD_TOKENS", "lots");
        let err = parse_var::<u32>("COACH_TEST_BAD_TOKENS", Some(500)).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue(name, _) if name == "COACH_TEST_BAD_TOKENS")
        );
    }
}
