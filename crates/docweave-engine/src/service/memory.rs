use std::collections::HashMap;

use crate::editing::operation::{EditOperation, ParagraphStyle, TextStyle};

use super::{DocumentService, ServiceError};

/// Style payload recorded against a stored range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StylePayload {
    Paragraph(ParagraphStyle),
    Text(TextStyle),
}

/// One styled range of a stored document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedStyle {
    pub start: usize,
    pub end: usize,
    pub payload: StylePayload,
}

/// A document held by the in-memory service: its text plus every styled
/// range applied so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredDocument {
    pub text: String,
    pub styles: Vec<AppliedStyle>,
}

impl StoredDocument {
    /// Styled ranges overlapping `start..end`, for assertions and preview.
    pub fn styles_in(&self, start: usize, end: usize) -> Vec<&AppliedStyle> {
        self.styles
            .iter()
            .filter(|s| s.start < end && s.end > start)
            .collect()
    }
}

/// Reference implementation of [`DocumentService`], used by tests and the
/// CLI preview mode.
///
/// Batches apply transactionally: every operation is staged against a copy
/// of the document, and the copy replaces the stored document only when the
/// whole batch succeeds. A failed batch leaves the document untouched.
#[derive(Debug, Default)]
pub struct InMemoryDocumentService {
    documents: HashMap<String, StoredDocument>,
}

impl InMemoryDocumentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty document under the given id.
    pub fn create_document(&mut self, document_id: &str) {
        self.documents
            .insert(document_id.to_string(), StoredDocument::default());
    }

    pub fn document(&self, document_id: &str) -> Option<&StoredDocument> {
        self.documents.get(document_id)
    }
}

impl DocumentService for InMemoryDocumentService {
    fn document_length(&self, document_id: &str) -> Result<usize, ServiceError> {
        self.documents
            .get(document_id)
            .map(|d| d.text.len())
            .ok_or_else(|| ServiceError::DocumentNotFound(document_id.to_string()))
    }

    fn apply_batch(
        &mut self,
        document_id: &str,
        operations: &[EditOperation],
    ) -> Result<(), ServiceError> {
        let stored = self
            .documents
            .get(document_id)
            .ok_or_else(|| ServiceError::DocumentNotFound(document_id.to_string()))?;

        let mut staged = stored.clone();
        for op in operations {
            apply_one(&mut staged, op)?;
        }
        self.documents.insert(document_id.to_string(), staged);
        Ok(())
    }
}

fn apply_one(doc: &mut StoredDocument, op: &EditOperation) -> Result<(), ServiceError> {
    match op {
        EditOperation::InsertText { pos, text } => {
            if *pos > doc.text.len() || !doc.text.is_char_boundary(*pos) {
                return Err(apply_failure(format!(
                    "insert position {pos} outside document of length {}",
                    doc.text.len()
                )));
            }
            doc.text.insert_str(*pos, text);
            // Ranges at or past the insertion point move with the text.
            for style in &mut doc.styles {
                if style.start >= *pos {
                    style.start += text.len();
                    style.end += text.len();
                } else if style.end > *pos {
                    style.end += text.len();
                }
            }
        }
        EditOperation::SetParagraphStyle { start, end, style } => {
            record_style(doc, *start, *end, StylePayload::Paragraph(*style))?;
        }
        EditOperation::SetTextStyle { start, end, style } => {
            record_style(doc, *start, *end, StylePayload::Text(*style))?;
        }
    }
    Ok(())
}

fn record_style(
    doc: &mut StoredDocument,
    start: usize,
    end: usize,
    payload: StylePayload,
) -> Result<(), ServiceError> {
    // Paragraph styles may extend one position past the end to cover the
    // final paragraph's terminator.
    let limit = match payload {
        StylePayload::Paragraph(_) => doc.text.len() + 1,
        StylePayload::Text(_) => doc.text.len(),
    };
    if start > end || end > limit {
        return Err(apply_failure(format!(
            "style range {start}..{end} outside document of length {}",
            doc.text.len()
        )));
    }
    doc.styles.push(AppliedStyle {
        start,
        end,
        payload,
    });
    Ok(())
}

fn apply_failure(detail: String) -> ServiceError {
    ServiceError::BatchApplyFailure { detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::operation::NamedStyle;
    use pretty_assertions::assert_eq;

    fn service_with(id: &str) -> InMemoryDocumentService {
        let mut service = InMemoryDocumentService::new();
        service.create_document(id);
        service
    }

    #[test]
    fn unknown_document_reports_not_found() {
        let service = InMemoryDocumentService::new();
        let err = service.document_length("missing").unwrap_err();
        assert!(matches!(err, ServiceError::DocumentNotFound(_)));
    }

    #[test]
    fn insert_and_style_round_trip() {
        let mut service = service_with("doc");
        let ops = vec![
            EditOperation::InsertText {
                pos: 0,
                text: "Title\nbody".to_string(),
            },
            EditOperation::SetParagraphStyle {
                start: 0,
                end: 6,
                style: ParagraphStyle {
                    named_style: NamedStyle::Heading1,
                },
            },
        ];
        service.apply_batch("doc", &ops).unwrap();

        let doc = service.document("doc").unwrap();
        assert_eq!(doc.text, "Title\nbody");
        assert_eq!(doc.styles.len(), 1);
        assert_eq!((doc.styles[0].start, doc.styles[0].end), (0, 6));
    }

    #[test]
    fn failed_batch_leaves_document_untouched() {
        let mut service = service_with("doc");
        service
            .apply_batch(
                "doc",
                &[EditOperation::InsertText {
                    pos: 0,
                    text: "kept?".to_string(),
                }],
            )
            .unwrap();

        // Second batch inserts fine but styles out of range; the whole
        // batch must roll back.
        let err = service
            .apply_batch(
                "doc",
                &[
                    EditOperation::InsertText {
                        pos: 5,
                        text: " more".to_string(),
                    },
                    EditOperation::SetTextStyle {
                        start: 0,
                        end: 999,
                        style: TextStyle::bold(),
                    },
                ],
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::BatchApplyFailure { .. }));

        let doc = service.document("doc").unwrap();
        assert_eq!(doc.text, "kept?");
        assert!(doc.styles.is_empty());
    }

    #[test]
    fn insert_before_styled_range_shifts_it() {
        let mut service = service_with("doc");
        service
            .apply_batch(
                "doc",
                &[
                    EditOperation::InsertText {
                        pos: 0,
                        text: "abc".to_string(),
                    },
                    EditOperation::SetTextStyle {
                        start: 1,
                        end: 2,
                        style: TextStyle::italic(),
                    },
                ],
            )
            .unwrap();
        service
            .apply_batch(
                "doc",
                &[EditOperation::InsertText {
                    pos: 0,
                    text: ">> ".to_string(),
                }],
            )
            .unwrap();

        let doc = service.document("doc").unwrap();
        assert_eq!(doc.text, ">> abc");
        assert_eq!((doc.styles[0].start, doc.styles[0].end), (4, 5));
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut service = service_with("doc");
        let err = service
            .apply_batch(
                "doc",
                &[EditOperation::InsertText {
                    pos: 1,
                    text: "x".to_string(),
                }],
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::BatchApplyFailure { .. }));
    }
}
