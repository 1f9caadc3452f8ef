use serde::Serialize;

/// What a style annotation applies to its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StyleKind {
    /// Named heading style, levels 1-6. Ranges cover the header text only;
    /// the batch builder widens them by one position to take in the
    /// paragraph terminator.
    Heading { level: u8 },
    /// Reduced font size across a full rendered bullet line (glyph + text).
    BulletFont,
    /// Bold inner text, delimiters excluded.
    Bold,
    /// Italic inner text, delimiters excluded.
    Italic,
}

/// A style intent anchored to content-buffer byte offsets, prior to
/// absolute-offset translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleAnnotation {
    pub kind: StyleKind,
    pub start: usize,
    pub end: usize,
}

impl StyleAnnotation {
    pub fn new(kind: StyleKind, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "annotation range must not be inverted");
        Self { kind, start, end }
    }
}
