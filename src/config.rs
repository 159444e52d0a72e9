use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::Result;
use crate::errors::ViviRagError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub backtrace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub embedding_model: String,
    pub input_type: String,
    pub namespace: String,
    pub controller_endpoint: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            embedding_model: "llama-text-embed-v2".to_string(),
            input_type: "passage".to_string(),
            namespace: String::new(),
            controller_endpoint: "https://api.pinecone.io".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub endpoint: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-exp".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default config file locations.
    ///
    /// Tries `config.toml`, then `config.example.toml`, then the built-in
    /// defaults. Credentials never live in these files (see [`Credentials`]).
    pub fn load() -> Result<Self> {
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            Self::from_file("config.example.toml")
        } else {
            Ok(Self::default())
        }
    }

    /// Fixed sleep between retry attempts
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry.delay_ms)
    }

    /// Number of matches requested per retrieval
    pub const fn top_k(&self) -> usize {
        self.retrieval.top_k
    }
}

/// Environment variable carrying the Pinecone API key.
pub const PINECONE_API_KEY_VAR: &str = "PINECONE_API_KEY";
/// Environment variable carrying the Pinecone index name.
pub const PINECONE_INDEX_VAR: &str = "PINECONE_INDEX";
/// Environment variable carrying the Google API key for Gemini.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

const REQUIRED_VARS: [&str; 3] = [PINECONE_API_KEY_VAR, PINECONE_INDEX_VAR, GOOGLE_API_KEY_VAR];

/// External-service credentials, supplied via the process environment only.
#[derive(Clone)]
pub struct Credentials {
    pub pinecone_api_key: String,
    pub pinecone_index: String,
    pub google_api_key: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    ///
    /// # Errors
    /// [`ViviRagError::MissingCredentials`] naming every variable that is
    /// absent or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an injected lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let pinecone_api_key = require(PINECONE_API_KEY_VAR);
        let pinecone_index = require(PINECONE_INDEX_VAR);
        let google_api_key = require(GOOGLE_API_KEY_VAR);

        if !missing.is_empty() {
            return Err(ViviRagError::MissingCredentials(missing.join(", ")));
        }

        Ok(Self {
            pinecone_api_key,
            pinecone_index,
            google_api_key,
        })
    }

    /// Presence (never the value) of each required variable.
    pub fn presence(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, bool)> {
        REQUIRED_VARS
            .iter()
            .map(|name| (*name, lookup(name).is_some_and(|v| !v.trim().is_empty())))
            .collect()
    }

    /// Presence report against the process environment.
    pub fn presence_from_env() -> Vec<(&'static str, bool)> {
        Self::presence(|name| std::env::var(name).ok())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("pinecone_api_key", &"***")
            .field("pinecone_index", &self.pinecone_index)
            .field("google_api_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_original_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.retrieval.embedding_model, "llama-text-embed-v2");
        assert_eq!(config.retrieval.input_type, "passage");
        assert_eq!(config.generation.model, "gemini-2.0-flash-exp");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str("[retrieval]\ntop_k = 5\n").unwrap();
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.retrieval.embedding_model, "llama-text-embed-v2");
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn missing_credentials_are_all_named() {
        let err = Credentials::from_lookup(|_| None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(PINECONE_API_KEY_VAR));
        assert!(message.contains(PINECONE_INDEX_VAR));
        assert!(message.contains(GOOGLE_API_KEY_VAR));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Credentials::from_lookup(|name| {
            if name == PINECONE_API_KEY_VAR {
                Some("  ".to_string())
            } else {
                Some("value".to_string())
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains(PINECONE_API_KEY_VAR));
    }

    #[test]
    fn presence_reports_without_values() {
        let presence = Credentials::presence(|name| {
            (name == PINECONE_INDEX_VAR).then(|| "vivi-ia-base".to_string())
        });
        assert_eq!(
            presence,
            vec![
                (PINECONE_API_KEY_VAR, false),
                (PINECONE_INDEX_VAR, true),
                (GOOGLE_API_KEY_VAR, false),
            ]
        );
    }

    #[test]
    fn debug_never_prints_key_material() {
        let credentials = Credentials {
            pinecone_api_key: "secret-key".to_string(),
            pinecone_index: "vivi-ia-base".to_string(),
            google_api_key: "another-secret".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(!rendered.contains("another-secret"));
        assert!(rendered.contains("vivi-ia-base"));
    }
}
