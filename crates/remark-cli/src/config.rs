//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use remark_annotator::AnnotatorConfig;
use remark_client::openai::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "remark.toml";

/// CLI configuration.
///
/// Loaded from a TOML file, then overridden field by field from command
/// line flags. The credential is never read from ambient environment
/// inside the pipeline; whatever this resolves to is passed into the
/// client constructor once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Completion-service client settings
    #[serde(default)]
    pub client: ClientSettings,

    /// Annotation pipeline settings
    #[serde(default)]
    pub annotator: AnnotatorConfig,
}

/// Completion-service client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Access credential; absence at startup is fatal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Endpoint of an OpenAI-compatible service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse; with no path given,
    /// `./remark.toml` is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the credential, a startup-fatal condition when absent.
    pub fn require_api_key(&self) -> Result<String> {
        self.client
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::CredentialMissing)
    }
}
