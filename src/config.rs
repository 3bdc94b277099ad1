use std::fmt;
use std::time::Duration;

use crate::error::{IntelBriefError, Result};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the Gemini backend.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Per-request limit. Synthesis regularly runs for tens of seconds.
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `GEMINI_API_KEY` (required) plus the optional
    /// `INTEL_BRIEF_MODEL`, `INTEL_BRIEF_BASE_URL` and
    /// `INTEL_BRIEF_TIMEOUT_SECS` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| IntelBriefError::Config("GEMINI_API_KEY must be set".to_string()))?;

        let mut config = Self::new(api_key);

        if let Some(model) = lookup("INTEL_BRIEF_MODEL").filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model);
        }
        if let Some(base_url) = lookup("INTEL_BRIEF_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(raw) = lookup("INTEL_BRIEF_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                IntelBriefError::Config(format!(
                    "INTEL_BRIEF_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_key_is_set() {
        let config = GeminiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_overrides() {
        let config = GeminiConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("INTEL_BRIEF_MODEL", "gemini-2.5-pro"),
            ("INTEL_BRIEF_BASE_URL", "http://localhost:9000/"),
            ("INTEL_BRIEF_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_key_and_bad_timeout_are_config_errors() {
        assert!(matches!(
            GeminiConfig::from_lookup(lookup(&[])),
            Err(IntelBriefError::Config(_))
        ));
        assert!(matches!(
            GeminiConfig::from_lookup(lookup(&[
                ("GEMINI_API_KEY", "k"),
                ("INTEL_BRIEF_TIMEOUT_SECS", "soon"),
            ])),
            Err(IntelBriefError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", GeminiConfig::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
    }
}
