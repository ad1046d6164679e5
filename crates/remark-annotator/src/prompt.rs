//! Prompt rendering for the completion service

use remark_client::CompletionRequest;
use serde::{Deserialize, Serialize};

/// Fixed system-role instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Business rules rendered into the prompt
///
/// These rules instruct the completion service; they are not enforced
/// locally. Keeping them as one named configuration value gives the
/// rendering (and any future post-validation) a single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRules {
    /// Problem terms whose mention must force the sentiment below
    #[serde(default)]
    pub sentiment_triggers: Vec<String>,

    /// Sentiment forced by any trigger mention
    #[serde(default = "default_forced_sentiment")]
    pub forced_sentiment: String,

    /// Example comments pinned to a specific category
    #[serde(default)]
    pub category_rules: Vec<CategoryRule>,
}

/// Pins comments resembling an example to a fixed category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Example comment text
    pub example: String,

    /// Category such comments must receive
    pub category: String,
}

fn default_forced_sentiment() -> String {
    "Negative".to_string()
}

impl Default for PromptRules {
    fn default() -> Self {
        Self {
            sentiment_triggers: vec!["damaged".to_string(), "poor".to_string()],
            forced_sentiment: default_forced_sentiment(),
            category_rules: vec![CategoryRule {
                example: "I received the wrong item.".to_string(),
                category: "Product Quality".to_string(),
            }],
        }
    }
}

impl PromptRules {
    /// Validate the rules
    pub fn validate(&self) -> Result<(), String> {
        if crate::types::Sentiment::parse(&self.forced_sentiment).is_none() {
            return Err(format!(
                "forced_sentiment '{}' is not a recognized sentiment",
                self.forced_sentiment
            ));
        }
        if self.sentiment_triggers.iter().any(|t| t.trim().is_empty()) {
            return Err("sentiment_triggers must not contain blank entries".to_string());
        }
        for rule in &self.category_rules {
            if rule.example.trim().is_empty() || rule.category.trim().is_empty() {
                return Err("category_rules must not contain blank entries".to_string());
            }
        }
        Ok(())
    }
}

/// Builds the per-record request for the completion service
///
/// Rendering is deterministic: the same text and rules always produce a
/// byte-identical request.
pub struct PromptBuilder {
    text: String,
    rules: PromptRules,
}

impl PromptBuilder {
    /// Create a new prompt builder for a record's text
    pub fn new(text: String) -> Self {
        Self {
            text,
            rules: PromptRules::default(),
        }
    }

    /// Use a specific set of business rules
    pub fn with_rules(mut self, rules: PromptRules) -> Self {
        self.rules = rules;
        self
    }

    /// Build the complete request
    pub fn build(&self) -> CompletionRequest {
        let mut prompt = String::new();

        // 1. The comment to analyze
        prompt.push_str("Analyze the following comment:\n\n");
        prompt.push_str(&format!("Comment: {}\n\n", self.text));

        // 2. The three required attributes, with the business rules inline
        prompt.push_str("Extract the following attributes:\n");
        prompt.push_str("- Sentiment: Positive, Neutral, or Negative.");
        if !self.rules.sentiment_triggers.is_empty() {
            prompt.push_str(&format!(
                " Ensure that any mention of problems ({}) results in a {} sentiment.",
                self.format_triggers(),
                self.rules.forced_sentiment
            ));
        }
        prompt.push('\n');
        prompt.push_str(
            "- Category: Broad category (e.g., Delivery, Customer Service, Product Quality).\n",
        );
        for rule in &self.rules.category_rules {
            prompt.push_str(&format!(
                "  Comments like '{}' should be classified as '{}'.\n",
                rule.example, rule.category
            ));
        }
        prompt.push_str(
            "- Key Themes: Key points in the comment (e.g., fast delivery, damaged packaging).\n",
        );

        // 3. Output shape reminder
        prompt.push('\n');
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        CompletionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: prompt,
        }
    }

    fn format_triggers(&self) -> String {
        let quoted: Vec<String> = self
            .rules
            .sentiment_triggers
            .iter()
            .map(|t| format!("'{}'", t))
            .collect();
        format!("e.g., {}", quoted.join(", "))
    }
}

const OUTPUT_FORMAT_REMINDER: &str = r#"Reply with exactly three lines, in this order, each formatted as "Label: value":
Sentiment: <value>
Category: <value>
Key Themes: <comma-separated values>"#;
