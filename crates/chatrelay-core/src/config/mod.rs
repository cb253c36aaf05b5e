//! Configuration module for chatrelay.
//!
//! Loads typed configuration from the process environment. The provider
//! credential is mandatory and checked here, before any socket is bound;
//! everything else falls back to a sensible default.

use std::env;

/// Environment variable holding the provider API key (required).
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Environment variable overriding the provider base URL (optional).
pub const API_BASE_VAR: &str = "CHATRELAY_API_BASE";

/// Environment variable overriding the model identifier (optional).
pub const MODEL_VAR: &str = "CHATRELAY_MODEL";

/// Environment variables overriding the bind address (optional).
pub const HOST_VAR: &str = "CHATRELAY_HOST";
pub const PORT_VAR: &str = "CHATRELAY_PORT";

/// Default model identifier submitted with every completion request.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

/// Resolved relay configuration.
///
/// The API key lives here for the process lifetime and is handed to the
/// provider at construction; nothing reads the environment at request time.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: Option<String>,
    pub model: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Fails if the provider API key is unset or empty, or if the port
    /// override is not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = match env::var(API_KEY_VAR) {
            Ok(key) if !key.is_empty() => key,
            _ => anyhow::bail!(
                "{} is not set. Export your provider API key before starting the relay",
                API_KEY_VAR
            ),
        };

        let api_base = env::var(API_BASE_VAR).ok().filter(|s| !s.is_empty());
        let model = env::var(MODEL_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let host = env::var(HOST_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match env::var(PORT_VAR) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("{} is not a valid port: {:?}", PORT_VAR, raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            api_base,
            model,
            host,
            port,
        })
    }

    /// The address the HTTP front door binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let config = Config {
            api_key: "sk-test".into(),
            api_base: None,
            model: DEFAULT_MODEL.into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    // Environment variables are process-global, so the set/unset cases for
    // the key live in one test to avoid racing parallel tests.
    #[test]
    fn test_from_env_requires_api_key() {
        env::remove_var(API_KEY_VAR);
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));

        env::set_var(API_KEY_VAR, "sk-test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "sk-test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.port, DEFAULT_PORT);
        env::remove_var(API_KEY_VAR);
    }
}
