//! Configuration for the annotation pipeline

use crate::prompt::PromptRules;
use serde::{Deserialize, Serialize};

/// How one record's failure affects the rest of the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Propagate the first error and stop; accumulated results are dropped
    Abort,
    /// Record the error against that record's slot and continue
    Isolate,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Isolate
    }
}

/// Configuration for the annotation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Disposition of per-record failures
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Validate the sentiment against the closed expected set
    ///
    /// Off by default: the pipeline accepts whatever string the parser
    /// extracts, including whitespace-only values.
    #[serde(default)]
    pub strict_sentiment: bool,

    /// Business rules rendered into every prompt
    #[serde(default)]
    pub rules: PromptRules,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            strict_sentiment: false,
            rules: PromptRules::default(),
        }
    }
}

impl AnnotatorConfig {
    /// Fail-fast preset: the first classified error aborts the whole batch
    pub fn fail_fast() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
            ..Self::default()
        }
    }

    /// Strict preset: sentiment values must match the expected set
    pub fn strict() -> Self {
        Self {
            strict_sentiment: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.rules.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
