use serde::{Deserialize, Serialize};

/// Named paragraph styles understood by the remote document service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedStyle {
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "HEADING_4")]
    Heading4,
    #[serde(rename = "HEADING_5")]
    Heading5,
    #[serde(rename = "HEADING_6")]
    Heading6,
}

impl NamedStyle {
    /// Map a header level to its named style. Levels above 6 clamp to the
    /// deepest heading; the parser only ever produces 1-6.
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => NamedStyle::Heading1,
            2 => NamedStyle::Heading2,
            3 => NamedStyle::Heading3,
            4 => NamedStyle::Heading4,
            5 => NamedStyle::Heading5,
            _ => NamedStyle::Heading6,
        }
    }
}

/// Paragraph-level style payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub named_style: NamedStyle,
}

/// Font size with its unit, points only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSize {
    pub magnitude: f64,
    pub unit: FontUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontUnit {
    #[serde(rename = "PT")]
    Pt,
}

/// Character-level style payload. Only the fields a given operation sets are
/// present; absent fields leave the existing style untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            bold: Some(true),
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: Some(true),
            ..Self::default()
        }
    }

    pub fn font_size(points: f64) -> Self {
        Self {
            font_size: Some(FontSize {
                magnitude: points,
                unit: FontUnit::Pt,
            }),
            ..Self::default()
        }
    }
}

/// One position-addressed edit. All offsets are absolute document positions,
/// computed once against the pre-batch cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOperation {
    InsertText {
        pos: usize,
        text: String,
    },
    SetParagraphStyle {
        start: usize,
        end: usize,
        style: ParagraphStyle,
    },
    SetTextStyle {
        start: usize,
        end: usize,
        style: TextStyle,
    },
}
