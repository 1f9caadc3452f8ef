/// Absolute insertion point for a batch.
///
/// Captured once from the target document's current length before any
/// operation is built; every generated offset is anchored to this value.
/// The compiler only ever appends past the cursor, never rewrites before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentCursor {
    position: usize,
}

impl DocumentCursor {
    /// Cursor at the given document length.
    pub fn at(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the target document already holds content. Appends to a
    /// non-empty document are prefixed with a separator.
    pub fn has_content(&self) -> bool {
        self.position > 0
    }

    /// Cursor a follow-up batch would be built against once `len` bytes of
    /// content have been appended.
    pub fn advanced_by(&self, len: usize) -> Self {
        Self {
            position: self.position + len,
        }
    }
}
