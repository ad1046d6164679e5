//! Core annotation pipeline

use crate::config::{AnnotatorConfig, FailurePolicy};
use crate::error::AnnotatorError;
use crate::filter::filter_records;
use crate::parser::{canonicalize_sentiment, parse_reply};
use crate::prompt::PromptBuilder;
use crate::types::{Annotation, BatchMetadata, BatchOutcome, Record, RecordOutcome};
use remark_client::{ClientError, CompletionClient, CompletionRequest};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info};

/// The Annotator runs records through the completion service sequentially
///
/// One record is fully processed (request → reply → parse) before the next
/// begins; the completion call is the only blocking point. Output order
/// mirrors filtered input order.
pub struct Annotator<C>
where
    C: CompletionClient,
{
    client: Arc<C>,
    config: AnnotatorConfig,
    model_name: String,
}

impl<C> Annotator<C>
where
    C: CompletionClient + Send + Sync + 'static,
{
    /// Create a new Annotator
    pub fn new(client: C, config: AnnotatorConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Label the batch metadata with a specific model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Annotate a batch of records
    ///
    /// Applies the record filter, then processes each survivor in order.
    /// Every classified error is logged with its kind and message at the
    /// failure site; the configured `FailurePolicy` then decides whether it
    /// fails only that record's slot or aborts the batch. Under `Abort`,
    /// accumulated outcomes are discarded and the error is returned.
    pub async fn annotate_batch(
        &self,
        records: Vec<Record>,
    ) -> Result<BatchOutcome, AnnotatorError> {
        let start_time = SystemTime::now();

        let total = records.len();
        let records = filter_records(records);
        let records_dropped = total - records.len();

        info!(
            "Starting annotation: {} records ({} dropped as blank), model '{}'",
            records.len(),
            records_dropped,
            self.model_name
        );

        let mut outcomes = Vec::with_capacity(records.len());
        let mut records_attempted = 0;
        let mut records_failed = 0;

        for record in records {
            records_attempted += 1;
            match self.annotate_one(&record).await {
                Ok(annotation) => {
                    debug!("record {} annotated", record.row);
                    outcomes.push(RecordOutcome {
                        record,
                        result: Ok(annotation),
                    });
                }
                Err(e) => {
                    error!(kind = e.kind(), "record {} failed: {}", record.row, e);
                    records_failed += 1;
                    match self.config.failure_policy {
                        FailurePolicy::Abort => return Err(e),
                        FailurePolicy::Isolate => outcomes.push(RecordOutcome {
                            record,
                            result: Err(e),
                        }),
                    }
                }
            }
        }

        let processing_time_ms = start_time
            .elapsed()
            .unwrap_or(Duration::from_secs(0))
            .as_millis() as u64;

        info!(
            "Annotation complete: {} ok, {} failed, {} dropped in {}ms",
            records_attempted - records_failed,
            records_failed,
            records_dropped,
            processing_time_ms
        );

        Ok(BatchOutcome {
            outcomes,
            metadata: BatchMetadata {
                model_name: self.model_name.clone(),
                records_dropped,
                records_attempted,
                records_failed,
                processing_time_ms,
            },
        })
    }

    /// Annotate a single record
    async fn annotate_one(&self, record: &Record) -> Result<Annotation, AnnotatorError> {
        let request = PromptBuilder::new(record.text.clone())
            .with_rules(self.config.rules.clone())
            .build();

        debug!("record {}: prompt length {} chars", record.row, request.user.len());

        let reply = self.call_client(request).await?;

        debug!("record {}: reply length {} chars", record.row, reply.len());

        let mut annotation = parse_reply(&reply)?;

        if self.config.strict_sentiment {
            canonicalize_sentiment(&mut annotation)?;
        }

        Ok(annotation)
    }

    /// Call the completion client
    async fn call_client(&self, request: CompletionRequest) -> Result<String, AnnotatorError> {
        let client = Arc::clone(&self.client);

        // The client contract is blocking, so hop off the async runtime
        tokio::task::spawn_blocking(move || {
            client.complete(&request).map_err(AnnotatorError::from)
        })
        .await
        .map_err(|e| {
            AnnotatorError::from(ClientError::Service(format!("task join error: {}", e)))
        })?
    }
}
