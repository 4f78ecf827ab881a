//! Analyzer configuration

use crate::ai::client::{DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Analyzer configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            anthropic_api_key: var("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            api_url: var("ANTHROPIC_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            model: var("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            max_tokens: var("ANTHROPIC_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_vars(lookup(&[]));
        assert_eq!(config.anthropic_api_key, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_vars(lookup(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ANTHROPIC_API_URL", "http://127.0.0.1:9000/v1/messages"),
            ("ANTHROPIC_MODEL", "claude-test"),
            ("ANTHROPIC_MAX_TOKENS", "1024"),
        ]));
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_url, "http://127.0.0.1:9000/v1/messages");
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn blank_key_and_bad_token_limit_fall_back() {
        let config = Config::from_vars(lookup(&[
            ("ANTHROPIC_API_KEY", "  "),
            ("ANTHROPIC_MAX_TOKENS", "lots"),
        ]));
        assert_eq!(config.anthropic_api_key, None);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }
}
