pub mod memory;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::editing::batch::build_batch;
use crate::editing::cursor::DocumentCursor;
use crate::editing::operation::EditOperation;
use crate::parsing::parse_markup;

/// Failures reported by the remote document service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Collaborator-reported, not recoverable locally. Surfaced verbatim.
    #[error("authentication failed: {0}")]
    AuthenticationFailure(String),
    /// The document id does not resolve. Fatal for the call.
    #[error("document not found: {0}")]
    DocumentNotFound(String),
    /// The remote write failed. No local retry, and no partial-success
    /// state is assumed.
    #[error("batch apply failed: {detail}")]
    BatchApplyFailure { detail: String },
}

impl ServiceError {
    /// Stable machine-readable label for the normalized outcome shape.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceError::AuthenticationFailure(_) => "authentication_failure",
            ServiceError::DocumentNotFound(_) => "document_not_found",
            ServiceError::BatchApplyFailure { .. } => "batch_apply_failure",
        }
    }
}

/// Boundary to the remote document service (the batch executor).
///
/// Implementations own transport and authentication. Batches apply as a
/// single all-or-nothing call: success or failure is reported per batch, not
/// per operation, and on failure nothing is assumed applied.
///
/// Concurrent callers appending to one document race on the length read; the
/// design assumes a single logical writer per document.
pub trait DocumentService {
    /// Current end offset of the document's content.
    fn document_length(&self, document_id: &str) -> Result<usize, ServiceError>;

    /// Apply one ordered operation batch atomically.
    fn apply_batch(
        &mut self,
        document_id: &str,
        operations: &[EditOperation],
    ) -> Result<(), ServiceError>;
}

/// Normalized outcome of one append call. Errors never escape this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AppendOutcome {
    #[serde(rename_all = "camelCase")]
    Success {
        operations_executed: usize,
        document_id: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        error: String,
        details: String,
        timestamp: DateTime<Utc>,
    },
}

/// Compile a markup string and append it to the identified document.
///
/// Reads the document length once, compiles the batch against that cursor,
/// and applies it through the service. Empty or malformed markup compiles to
/// an empty buffer and is a no-op success with zero operations; it makes no
/// remote calls at all.
///
/// Re-running an append duplicates content: the target is append-only and
/// carries no dedup key. Retry policy, if any, belongs to the caller.
pub fn append_markup<S: DocumentService>(
    service: &mut S,
    document_id: &str,
    markup: &str,
) -> AppendOutcome {
    match try_append(service, document_id, markup) {
        Ok(operations_executed) => AppendOutcome::Success {
            operations_executed,
            document_id: document_id.to_string(),
            timestamp: Utc::now(),
        },
        Err(e) => {
            log::debug!("append to {document_id} failed: {e}");
            AppendOutcome::Error {
                error: e.label().to_string(),
                details: e.to_string(),
                timestamp: Utc::now(),
            }
        }
    }
}

fn try_append<S: DocumentService>(
    service: &mut S,
    document_id: &str,
    markup: &str,
) -> Result<usize, ServiceError> {
    let parsed = parse_markup(markup);
    if parsed.buffer.is_empty() {
        log::debug!("nothing to append to {document_id}");
        return Ok(0);
    }

    let length = service.document_length(document_id)?;
    let cursor = DocumentCursor::at(length);
    let operations = build_batch(cursor, &parsed.buffer, &parsed.annotations);
    service.apply_batch(document_id, &operations)?;

    log::debug!(
        "applied {} operations to {document_id} at cursor {length}",
        operations.len()
    );
    Ok(operations.len())
}
