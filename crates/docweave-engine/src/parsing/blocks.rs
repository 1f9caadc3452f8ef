use std::sync::OnceLock;

use regex::Regex;

use crate::editing::annotation::{StyleAnnotation, StyleKind};

/// Glyph that replaces a `-`/`*` list marker in the rendered line.
pub const BULLET_GLYPH: char = '•';

/// Kind of one logical line/paragraph unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Header { level: u8 },
    Bullet,
    Blank,
}

/// One classified block with its rendered text and position in the content
/// buffer, assigned as blocks are appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub buffer_start: usize,
    pub buffer_end: usize,
}

/// Classification of a single input line, before buffer placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Header { level: u8, text: String },
    Bullet { text: String },
    Blank,
    Paragraph { text: String },
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("invalid header regex"))
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*]\s+(.+)$").expect("invalid bullet regex"))
}

/// Classifies individual lines of markup.
///
/// Matchers run in a fixed precedence order and the first match wins:
/// header, bullet, blank, then paragraph as the fallthrough. A line that
/// could satisfy several patterns is always resolved by this order.
pub struct LineClassifier;

impl LineClassifier {
    pub fn classify(&self, line: &str) -> LineClass {
        if let Some(caps) = header_re().captures(line) {
            let text = caps[2].to_string();
            if !text.trim().is_empty() {
                return LineClass::Header {
                    level: caps[1].len() as u8,
                    text,
                };
            }
        }
        if let Some(caps) = bullet_re().captures(line) {
            return LineClass::Bullet {
                text: caps[1].to_string(),
            };
        }
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        LineClass::Paragraph {
            text: line.to_string(),
        }
    }
}

/// Folds classified lines into the content buffer, its blocks, and the
/// block-level style annotations.
///
/// Blocks join with single newlines; each block's offsets are taken against
/// the buffer length at the moment it is appended.
pub struct BlockBuilder {
    buffer: String,
    blocks: Vec<Block>,
    annotations: Vec<StyleAnnotation>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            blocks: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn push(&mut self, class: LineClass) {
        match class {
            LineClass::Header { level, text } => {
                let start = self.append(&text);
                let end = start + text.len();
                self.annotations.push(StyleAnnotation::new(
                    StyleKind::Heading { level },
                    start,
                    end,
                ));
                self.emit(BlockKind::Header { level }, text, start, end);
            }
            LineClass::Bullet { text } => {
                let rendered = format!("{BULLET_GLYPH} {text}");
                let start = self.append(&rendered);
                let end = start + rendered.len();
                self.annotations
                    .push(StyleAnnotation::new(StyleKind::BulletFont, start, end));
                self.emit(BlockKind::Bullet, rendered, start, end);
            }
            LineClass::Blank => {
                // Runs of blanks collapse to one, a blank directly after a
                // header is suppressed, and so are blanks before any content.
                match self.blocks.last().map(|b| b.kind) {
                    None | Some(BlockKind::Blank) | Some(BlockKind::Header { .. }) => {}
                    Some(_) => {
                        let start = self.append("");
                        self.emit(BlockKind::Blank, String::new(), start, start);
                    }
                }
            }
            LineClass::Paragraph { text } => {
                let start = self.append(&text);
                let end = start + text.len();
                self.emit(BlockKind::Paragraph, text, start, end);
            }
        }
    }

    pub fn finish(self) -> (String, Vec<Block>, Vec<StyleAnnotation>) {
        (self.buffer, self.blocks, self.annotations)
    }

    /// Append block text to the buffer, joining with a newline after the
    /// first block. Returns the buffer offset the text starts at.
    fn append(&mut self, text: &str) -> usize {
        if !self.blocks.is_empty() {
            self.buffer.push('\n');
        }
        let start = self.buffer.len();
        self.buffer.push_str(text);
        start
    }

    fn emit(&mut self, kind: BlockKind, text: String, start: usize, end: usize) {
        self.blocks.push(Block {
            kind,
            text,
            buffer_start: start,
            buffer_end: end,
        });
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
