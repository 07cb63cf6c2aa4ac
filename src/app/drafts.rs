//! Draft batch ownership: generation, per-draft editing and export
//!
//! A batch is replaced atomically by the next generation. Within a batch each
//! draft moves between `Viewing` and `Editing` independently of its siblings.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use thiserror::Error;

use crate::ai::prompts::{apply_signature, compose_draft_prompt};
use crate::ai::{GenerationConfig, TextGenerator};
use crate::constants::{EXPORT_FILE_PREFIX, EXPORT_FILE_TIME_FORMAT, EXPORT_HEADER_TIME_FORMAT};
use crate::mail::CanonicalEmail;

/// Misuse of the session API, such as addressing a draft that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("draft {index} does not exist (current batch has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("draft {0} is not being edited")]
    NotEditing(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    Viewing,
    /// Open for editing; `pending` is committed on save and dropped on cancel
    Editing { pending: String },
}

/// One reply candidate within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    index: usize,
    content: String,
    state: DraftState,
}

impl Draft {
    fn new(index: usize, content: String) -> Self {
        Self {
            index,
            content,
            state: DraftState::Viewing,
        }
    }

    /// 1-based position in the batch
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, DraftState::Editing { .. })
    }

    pub fn pending_edit(&self) -> Option<&str> {
        match &self.state {
            DraftState::Editing { pending } => Some(pending),
            DraftState::Viewing => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DraftSession {
    drafts: Vec<Draft>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn get(&self, index: usize) -> Result<&Draft, SessionError> {
        self.check(index)?;
        Ok(&self.drafts[index - 1])
    }

    /// Drop the current batch, e.g. when a new email arrives.
    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    /// Generate `config.draft_count()` drafts one after another and replace the
    /// current batch with them.
    ///
    /// A failed call does not abort the batch: that draft carries the error
    /// text as its content. The signature is applied to every draft.
    pub async fn generate_batch<G: TextGenerator>(
        &mut self,
        generator: &G,
        email: &CanonicalEmail,
        config: &GenerationConfig,
    ) -> &[Draft] {
        let count = config.draft_count();
        tracing::info!(
            count,
            tone = %config.tone,
            length = %config.length,
            action = ?config.action,
            "Generating draft batch"
        );

        let mut batch = Vec::with_capacity(count);
        for index in 1..=count {
            let prompt = compose_draft_prompt(email.body(), config, index);
            let reply = match generator.generate(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(index, "Draft generation failed: {}", e);
                    format!("Error generating reply: {}", e)
                }
            };
            batch.push(Draft::new(index, apply_signature(&reply, &config.signature)));
        }

        self.drafts = batch;
        &self.drafts
    }

    /// Open draft `index` for editing, seeding the buffer with its content.
    /// Already-open drafts keep their buffer.
    pub fn begin_edit(&mut self, index: usize) -> Result<&str, SessionError> {
        let draft = self.draft_mut(index)?;
        if let DraftState::Viewing = draft.state {
            draft.state = DraftState::Editing {
                pending: draft.content.clone(),
            };
        }
        Ok(draft.pending_edit().unwrap_or_default())
    }

    /// Replace the edit buffer of a draft that is being edited.
    pub fn update_pending(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        let draft = self.draft_mut(index)?;
        match &mut draft.state {
            DraftState::Editing { pending } => {
                *pending = text.into();
                Ok(())
            }
            DraftState::Viewing => Err(SessionError::NotEditing(index)),
        }
    }

    /// Commit `text` as the draft's content and close the editor.
    pub fn save_edit(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        let draft = self.draft_mut(index)?;
        draft.content = text.into();
        draft.state = DraftState::Viewing;
        tracing::debug!(index, "Draft saved");
        Ok(())
    }

    /// Commit the current edit buffer.
    pub fn commit_edit(&mut self, index: usize) -> Result<(), SessionError> {
        let draft = self.draft_mut(index)?;
        match std::mem::replace(&mut draft.state, DraftState::Viewing) {
            DraftState::Editing { pending } => {
                draft.content = pending;
                tracing::debug!(index, "Draft saved");
                Ok(())
            }
            DraftState::Viewing => Err(SessionError::NotEditing(index)),
        }
    }

    /// Discard the edit buffer; content is left as it was. No-op when not editing.
    pub fn cancel_edit(&mut self, index: usize) -> Result<(), SessionError> {
        let draft = self.draft_mut(index)?;
        draft.state = DraftState::Viewing;
        Ok(())
    }

    /// Render every draft's current (saved) content for download.
    pub fn export_all(&self) -> String {
        self.export_at(Local::now())
    }

    pub fn export_at(&self, now: DateTime<Local>) -> String {
        let mut out = format!(
            "Generated Email Replies - {}\n\n",
            now.format(EXPORT_HEADER_TIME_FORMAT)
        );
        for draft in &self.drafts {
            out.push_str(&format!("=== DRAFT {} ===\n{}\n\n", draft.index, draft.content));
        }
        out
    }

    /// Write the export into `dir` and return the file path.
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf> {
        let now = Local::now();
        let path = dir.join(export_file_name(now));

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
        fs::write(&path, self.export_at(now))
            .with_context(|| format!("Failed to write drafts to {}", path.display()))?;

        tracing::info!(path = %path.display(), drafts = self.drafts.len(), "Exported drafts");
        Ok(path)
    }

    fn check(&self, index: usize) -> Result<(), SessionError> {
        if index == 0 || index > self.drafts.len() {
            tracing::error!(index, len = self.drafts.len(), "Draft index out of range");
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.drafts.len(),
            });
        }
        Ok(())
    }

    fn draft_mut(&mut self, index: usize) -> Result<&mut Draft, SessionError> {
        self.check(index)?;
        Ok(&mut self.drafts[index - 1])
    }
}

pub fn export_file_name(now: DateTime<Local>) -> String {
    format!(
        "{}{}.txt",
        EXPORT_FILE_PREFIX,
        now.format(EXPORT_FILE_TIME_FORMAT)
    )
}
