pub mod editing;
pub mod parsing;
pub mod service;

// Re-export key types for easier usage
pub use editing::{annotation::*, batch::*, cursor::*, operation::*};
pub use parsing::{ParsedMarkup, blocks::*, inline::*, parse_markup};
pub use service::{AppendOutcome, DocumentService, ServiceError, append_markup};
