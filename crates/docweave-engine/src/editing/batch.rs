use std::ops::Range;

use crate::editing::annotation::{StyleAnnotation, StyleKind};
use crate::editing::cursor::DocumentCursor;
use crate::editing::operation::{EditOperation, NamedStyle, ParagraphStyle, TextStyle};
use crate::parsing::inline::delimiter_ranges;

/// Separator inserted before the content when the document already holds
/// text, so successive appends stay visually delimited.
pub const APPEND_SEPARATOR: &str = "\n\n";

/// Font size applied across rendered bullet lines, in points. Bullets are
/// styled through font size rather than native list semantics.
pub const BULLET_FONT_SIZE_PT: f64 = 12.0;

/// Compile the content buffer and its annotations into one ordered batch of
/// absolute-offset edit operations.
///
/// The batch contains, in order: a single `InsertText` of the delimiter-free
/// buffer at the cursor (separator-prefixed when the document is non-empty),
/// then one `SetParagraphStyle` per heading, one font-size `SetTextStyle`
/// per bullet line, and one `SetTextStyle` per bold and italic span.
///
/// Bold/italic delimiters are stripped from the inserted text as an ordered
/// list of delimiter deletions: every annotation offset is shifted left by
/// the number of delimiter bytes removed before it. The deletions come from
/// rescanning the buffer, not from the annotations, so duplicate fragments
/// whose styling aliases to the first occurrence still lose their markers at
/// every occurrence. Only delimiter characters are ever removed; styled text
/// is never deleted and reinserted, so every emitted range addresses the text
/// the leading insert places. Heading ranges are widened by one position past
/// the (shifted) text end so the named style spans the whole paragraph
/// including its terminator.
///
/// An empty buffer compiles to an empty batch.
pub fn build_batch(
    cursor: DocumentCursor,
    buffer: &str,
    annotations: &[StyleAnnotation],
) -> Vec<EditOperation> {
    if buffer.is_empty() {
        return Vec::new();
    }

    let delimiters = delimiter_ranges(buffer);
    let stripped = strip_ranges(buffer, &delimiters);

    let separator = if cursor.has_content() {
        APPEND_SEPARATOR
    } else {
        ""
    };
    // Base for every style offset: cursor, plus the separator the insert
    // carries in front of the content.
    let base = cursor.position() + separator.len();
    let shift = |offset: usize| base + strip_shifted(offset, &delimiters);

    let mut operations = vec![EditOperation::InsertText {
        pos: cursor.position(),
        text: format!("{separator}{stripped}"),
    }];

    for a in annotations {
        if let StyleKind::Heading { level } = a.kind {
            operations.push(EditOperation::SetParagraphStyle {
                start: shift(a.start),
                // +1 swallows the paragraph terminator.
                end: shift(a.end) + 1,
                style: ParagraphStyle {
                    named_style: NamedStyle::heading(level),
                },
            });
        }
    }
    for a in annotations {
        if a.kind == StyleKind::BulletFont {
            operations.push(EditOperation::SetTextStyle {
                start: shift(a.start),
                end: shift(a.end),
                style: TextStyle::font_size(BULLET_FONT_SIZE_PT),
            });
        }
    }
    for a in annotations {
        if a.kind == StyleKind::Bold {
            operations.push(EditOperation::SetTextStyle {
                start: shift(a.start),
                end: shift(a.end),
                style: TextStyle::bold(),
            });
        }
    }
    for a in annotations {
        if a.kind == StyleKind::Italic {
            operations.push(EditOperation::SetTextStyle {
                start: shift(a.start),
                end: shift(a.end),
                style: TextStyle::italic(),
            });
        }
    }

    log::debug!(
        "compiled batch: {} operations, {} content bytes at cursor {}",
        operations.len(),
        stripped.len(),
        cursor.position()
    );

    operations
}

/// The buffer with the given byte ranges removed, nothing else changed.
fn strip_ranges(buffer: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(buffer.len());
    let mut pos = 0;
    for r in ranges {
        if r.start > pos {
            out.push_str(&buffer[pos..r.start]);
        }
        pos = pos.max(r.end);
    }
    out.push_str(&buffer[pos..]);
    out
}

/// Offset-recomputation rule: where a pre-strip buffer offset lands once the
/// delimiter ranges before it have been deleted.
fn strip_shifted(offset: usize, ranges: &[Range<usize>]) -> usize {
    let removed: usize = ranges
        .iter()
        .take_while(|r| r.end <= offset)
        .map(|r| r.len())
        .sum();
    offset - removed
}
