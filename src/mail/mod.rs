pub mod docx;
pub mod extract;
pub mod parser;
pub mod types;

pub use extract::{ExtractionError, extract};
pub use types::{CanonicalEmail, EmailMetadata, InputKind};
