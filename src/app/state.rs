//! Application state types
//!
//! Everything the shell renders lives here; the draft batch itself is owned
//! by [`DraftSession`](super::drafts::DraftSession).

use crate::ai::{GenerationConfig, QuickAction, ReplyLength, Tone};
use crate::mail::CanonicalEmail;

#[derive(Debug, Default)]
pub struct StatusState {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = Some(msg.to_string());
    }

    /// Hand pending notices to the renderer and reset them.
    pub fn take(&mut self) -> (Option<String>, Option<String>) {
        (self.message.take(), self.error.take())
    }
}

/// The email currently being replied to, or why the last load failed.
#[derive(Debug, Default)]
pub enum InputState {
    #[default]
    Empty,
    Loaded {
        email: CanonicalEmail,
        /// Analysis text, or an inline error if the analysis call failed
        analysis: Option<String>,
    },
    /// Extraction failed; the message is shown in place of the body
    Failed(String),
}

impl InputState {
    pub fn email(&self) -> Option<&CanonicalEmail> {
        match self {
            InputState::Loaded { email, .. } => Some(email),
            _ => None,
        }
    }

    pub fn analysis(&self) -> Option<&str> {
        match self {
            InputState::Loaded { analysis, .. } => analysis.as_deref(),
            _ => None,
        }
    }
}

/// Current position of the reply controls (tone, length, count, signature).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySettings {
    pub tone: Tone,
    pub length: ReplyLength,
    pub draft_count: usize,
    pub signature: String,
}

impl ReplySettings {
    /// Snapshot the controls for one generation trigger.
    pub fn snapshot(&self, action: Option<QuickAction>) -> GenerationConfig {
        GenerationConfig::new(
            self.tone,
            self.length,
            action,
            self.signature.clone(),
            self.draft_count,
        )
    }
}

impl From<GenerationConfig> for ReplySettings {
    fn from(config: GenerationConfig) -> Self {
        Self {
            tone: config.tone,
            length: config.length,
            draft_count: config.draft_count(),
            signature: config.signature,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub input: InputState,
    pub settings: ReplySettings,
    /// Quick action used for the current batch, if any
    pub last_action: Option<QuickAction>,
    pub status: StatusState,
}

impl AppState {
    pub fn new(settings: ReplySettings) -> Self {
        Self {
            input: InputState::default(),
            settings,
            last_action: None,
            status: StatusState::default(),
        }
    }

    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }
}
