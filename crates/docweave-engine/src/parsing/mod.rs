pub mod blocks;
pub mod inline;

use crate::editing::annotation::StyleAnnotation;
use blocks::{Block, BlockBuilder, LineClassifier};

/// Result of parsing one markup input: the joined content buffer, the blocks
/// it was built from, and every style annotation anchored to buffer offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMarkup {
    pub buffer: String,
    pub blocks: Vec<Block>,
    pub annotations: Vec<StyleAnnotation>,
}

/// Parse a markup string into a content buffer plus style annotations.
///
/// Runs the block-level fold first (headers, bullets, blanks, paragraphs),
/// then the inline resolver over the finished buffer. Block annotations come
/// first in input line order, followed by bold spans, then italic spans.
///
/// Parsing never fails: unrecognized lines pass through as paragraphs and an
/// empty input yields an empty buffer.
pub fn parse_markup(markup: &str) -> ParsedMarkup {
    let classifier = LineClassifier;
    let mut builder = BlockBuilder::new();

    for line in markup.lines() {
        builder.push(classifier.classify(line));
    }

    let (buffer, blocks, mut annotations) = builder.finish();
    annotations.extend(inline::resolve_spans(&buffer));

    log::trace!(
        "parsed {} blocks, {} annotations, {} buffer bytes",
        blocks.len(),
        annotations.len(),
        buffer.len()
    );

    ParsedMarkup {
        buffer,
        blocks,
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::annotation::StyleKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_is_deterministic() {
        let markup = "# A\n\n- one\n- two\n\nBody with **bold** and *italic*.";
        assert_eq!(parse_markup(markup), parse_markup(markup));
    }

    #[test]
    fn block_annotations_precede_inline_annotations() {
        let parsed = parse_markup("# A\n**b** then *i*");
        let kinds: Vec<_> = parsed.annotations.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StyleKind::Heading { level: 1 },
                StyleKind::Bold,
                StyleKind::Italic,
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_buffer() {
        let parsed = parse_markup("");
        assert_eq!(parsed.buffer, "");
        assert!(parsed.blocks.is_empty());
        assert!(parsed.annotations.is_empty());
    }
}
