use std::fmt;
use std::path::Path;

/// Header fields lifted out of a structured source (.eml).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailMetadata {
    pub sender: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,
}

impl EmailMetadata {
    pub fn is_empty(&self) -> bool {
        self.sender.is_none() && self.subject.is_none() && self.date.is_none()
    }
}

/// The normalized form every input is converted into before a prompt is built.
///
/// Created once per input event and never mutated afterwards; the next paste
/// or file load replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEmail {
    body: String,
    metadata: EmailMetadata,
}

impl CanonicalEmail {
    /// Wrap pasted text. Pasted input never carries metadata.
    pub fn from_text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            metadata: EmailMetadata::default(),
        }
    }

    pub fn with_metadata(body: impl Into<String>, metadata: EmailMetadata) -> Self {
        Self {
            body: body.into(),
            metadata,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn metadata(&self) -> &EmailMetadata {
        &self.metadata
    }

    /// Whether there is anything worth analyzing or replying to.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Declared format of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    PlainText,
    EmailContainer,
    WordDocument,
}

impl InputKind {
    /// Map a file extension to its kind. Unsupported extensions yield `None`
    /// and must be rejected before extraction.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "eml" => Some(Self::EmailContainer),
            "docx" => Some(Self::WordDocument),
            _ => None,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PlainText => "TXT",
            Self::EmailContainer => "EML",
            Self::WordDocument => "DOCX",
        };
        f.write_str(label)
    }
}
