//! Environment-driven relay configuration.
//!
//! All values are read once at process start and treated as immutable for
//! the process lifetime:
//!
//! - `GEMINI_API_KEY` (required) -- provider credential, wrapped in
//!   [`SecretString`] so it never appears in Debug output or logs
//! - `MODEL` (required) -- Gemini model identifier
//! - `SYSTEM_INSTRUCTION` (optional) -- persona instruction; defaults to
//!   the built-in anime-geek persona

use secrecy::SecretString;
use thiserror::Error;

/// Default persona instruction used when `SYSTEM_INSTRUCTION` is unset.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "Your persona is that of an enthusiastic and jovial anime geek. All responses must be directly related to anime or manga, so please avoid topics outside of this domain. When answering, be brief and to the point, just like you're chatting with a friend who gets it. Feel free to add some quirky, friendly flair when appropriate. If you are ever uncertain about a user's request or require more information, you must ask a clarifying question to ensure a more accurate response.";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable '{0}'")]
    MissingVar(&'static str),

    #[error("environment variable '{0}' must not be empty")]
    EmptyVar(&'static str),
}

/// Immutable process-lifetime configuration.
#[derive(Debug)]
pub struct RelayConfig {
    /// Gemini API credential. Never logged.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Fixed persona system instruction.
    pub system_instruction: String,
}

impl RelayConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead
    /// of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = require(&lookup, "GEMINI_API_KEY")?;
        let model = require(&lookup, "MODEL")?;

        let system_instruction = match lookup("SYSTEM_INSTRUCTION") {
            Some(value) if !value.trim().is_empty() => value,
            _ => DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            model,
            system_instruction,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyVar(key)),
        Some(value) => Ok(value),
        None => Err(ConfigError::MissingVar(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_config_parses() {
        let vars = env(&[
            ("GEMINI_API_KEY", "test-key-not-real"),
            ("MODEL", "gemini-2.0-flash"),
            ("SYSTEM_INSTRUCTION", "be brief"),
        ]);
        let config = RelayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.system_instruction, "be brief");
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let vars = env(&[("MODEL", "gemini-2.0-flash")]);
        let err = RelayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("GEMINI_API_KEY")));
    }

    #[test]
    fn test_empty_model_is_an_error() {
        let vars = env(&[("GEMINI_API_KEY", "test-key"), ("MODEL", "  ")]);
        let err = RelayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyVar("MODEL")));
    }

    #[test]
    fn test_persona_defaults_when_unset() {
        let vars = env(&[
            ("GEMINI_API_KEY", "test-key"),
            ("MODEL", "gemini-2.0-flash"),
        ]);
        let config = RelayConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    }
}
