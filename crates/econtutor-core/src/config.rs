//! Relay configuration.
//!
//! Built once at process start and shared read-only for the process
//! lifetime. A missing credential is not a start-up error: the relay still
//! serves, and every chat request answers `ServiceUnavailable`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::persona::DEFAULT_PERSONA;

/// Model used when `GROQ_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

/// Groq's OpenAI-compatible API root.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Environment variable names.
pub mod env {
    pub const API_KEY: &str = "GROQ_API_KEY";
    pub const MODEL: &str = "GROQ_MODEL";
    pub const BASE_URL: &str = "GROQ_BASE_URL";
    pub const PERSONA_FILE: &str = "TUTOR_PERSONA_FILE";
}

/// Errors while building configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read persona file {path}: {source}")]
    PersonaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Persona file {0} is empty")]
    EmptyPersona(PathBuf),
}

/// Process-wide relay configuration.
#[derive(Clone)]
pub struct RelayConfig {
    /// Upstream credential; `None` when unset or empty.
    pub api_key: Option<String>,
    /// Chat-completion model identifier.
    pub model: String,
    /// Provider API root, without a trailing slash.
    pub base_url: String,
    /// System prompt prepended to conversations that lack one.
    pub persona: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("persona_len", &self.persona.len())
            .finish()
    }
}

impl RelayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self {
            api_key: non_empty(env::API_KEY),
            ..Self::default()
        };
        if let Some(model) = non_empty(env::MODEL) {
            config.model = model;
        }
        if let Some(base_url) = non_empty(env::BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Some(path) = non_empty(env::PERSONA_FILE) {
            config.persona = read_persona(PathBuf::from(path))?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.trim().is_empty()).then_some(api_key);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    /// Whether an upstream credential is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn read_persona(path: PathBuf) -> Result<String, ConfigError> {
    let persona = std::fs::read_to_string(&path).map_err(|source| ConfigError::PersonaFile {
        path: path.clone(),
        source,
    })?;
    if persona.trim().is_empty() {
        return Err(ConfigError::EmptyPersona(path));
    }
    Ok(persona)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = RelayConfig::from_lookup(|_| None).unwrap();
        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.persona, DEFAULT_PERSONA);
    }

    #[test]
    fn test_environment_overrides() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            (env::API_KEY, "gsk_test"),
            (env::MODEL, "llama-3.1-8b-instant"),
            (env::BASE_URL, "http://localhost:9999/v1/"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_empty_credential_counts_as_missing() {
        let config = RelayConfig::from_lookup(lookup_from(&[(env::API_KEY, "")])).unwrap();
        assert!(!config.has_credential());
        assert!(!RelayConfig::default().with_api_key("  ").has_credential());
    }

    #[test]
    fn test_persona_file_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "You are a strict micro-economics examiner.").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config =
            RelayConfig::from_lookup(lookup_from(&[(env::PERSONA_FILE, path.as_str())])).unwrap();
        assert_eq!(config.persona, "You are a strict micro-economics examiner.");
    }

    #[test]
    fn test_missing_persona_file_is_an_error() {
        let result = RelayConfig::from_lookup(lookup_from(&[(
            env::PERSONA_FILE,
            "/nonexistent/persona.txt",
        )]));
        assert!(matches!(result, Err(ConfigError::PersonaFile { .. })));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = RelayConfig::default().with_api_key("gsk_secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
