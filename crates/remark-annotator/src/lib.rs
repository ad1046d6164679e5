//! Remark Annotator
//!
//! Annotates free-text customer feedback by delegating interpretation to a
//! completion service and normalizing its reply into structured fields.
//!
//! # Overview
//!
//! The Annotator is the core of Remark. For each record it renders a
//! deterministic prompt, sends it through a `CompletionClient`, and parses
//! the reply into three fields: sentiment, category, and key themes. A
//! record either yields a fully populated `Annotation` or a classified
//! error; no partially populated result is ever emitted.
//!
//! # Architecture
//!
//! ```text
//! Records → Filter → PromptBuilder → CompletionClient → Parser → Annotations
//! ```
//!
//! # Key Features
//!
//! - **Prompt Rendering**: Byte-deterministic prompts with the business
//!   rules exposed as named `PromptRules` configuration
//! - **Reply Parsing**: Fixed three-line `"Label: value"` extraction with
//!   theme normalization
//! - **Failure Policy**: Per-record isolation by default, with the
//!   fail-fast abort disposition available via configuration
//! - **Strict Sentiment**: Opt-in validation of the sentiment value against
//!   the closed Positive/Neutral/Negative set
//!
//! # Example Usage
//!
//! ```no_run
//! use remark_annotator::{Annotator, AnnotatorConfig, Record};
//! use remark_client::MockClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MockClient::new(
//!     "Sentiment: Positive\nCategory: Delivery\nKey Themes: fast delivery",
//! );
//! let annotator = Annotator::new(client, AnnotatorConfig::default());
//!
//! let records = vec![Record::new(0, "Arrived a day early, great service.")];
//! let outcome = annotator.annotate_batch(records).await?;
//!
//! println!("Annotated: {} records", outcome.metadata.records_attempted);
//! # Ok(())
//! # }
//! ```
//!
//! # Known Weak Point
//!
//! The business rules (problem terms force a Negative sentiment; a wrong
//! item is categorized as Product Quality) are guidance embedded in the
//! prompt, not locally enforced invariants. The parser does not re-validate
//! them; correctness of sentiment and category depends on the external
//! service honoring the prompt.

#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod parser;
mod pipeline;
mod prompt;
mod types;


pub use config::{AnnotatorConfig, FailurePolicy};
pub use error::AnnotatorError;
pub use pipeline::Annotator;
pub use prompt::{CategoryRule, PromptRules};
pub use types::{
    Annotation, BatchMetadata, BatchOutcome, Record, RecordOutcome, Sentiment,
};
