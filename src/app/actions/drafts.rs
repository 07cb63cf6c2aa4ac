//! Draft editing, reply settings and export

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::ai::{ReplyLength, TextGenerator, Tone};
use crate::app::App;
use crate::app::drafts::SessionError;
use crate::constants::{MAX_DRAFTS, MIN_DRAFTS};

impl<G: TextGenerator> App<G> {
    pub fn set_tone(&mut self, tone: Tone) {
        self.state.settings.tone = tone;
        self.state.set_status(format!("Tone set to {}", tone));
    }

    pub fn set_length(&mut self, length: ReplyLength) {
        self.state.settings.length = length;
        self.state.set_status(format!("Length set to {}", length));
    }

    pub fn set_draft_count(&mut self, count: usize) -> Result<()> {
        if !(MIN_DRAFTS..=MAX_DRAFTS).contains(&count) {
            bail!(
                "Number of drafts must be between {} and {}",
                MIN_DRAFTS,
                MAX_DRAFTS
            );
        }
        self.state.settings.draft_count = count;
        self.state
            .set_status(format!("Will generate {} draft(s)", count));
        Ok(())
    }

    pub fn set_signature(&mut self, signature: String) {
        if signature.trim().is_empty() {
            self.state.set_status("Signature cleared");
        } else {
            self.state.set_status("Signature updated");
        }
        self.state.settings.signature = signature;
    }

    /// Open a draft for editing and return the text to edit.
    pub fn begin_edit(&mut self, index: usize) -> Result<String, SessionError> {
        self.drafts.begin_edit(index).map(str::to_string)
    }

    pub fn update_draft(&mut self, index: usize, text: String) -> Result<(), SessionError> {
        self.drafts.update_pending(index, text)
    }

    pub fn save_draft(&mut self, index: usize) -> Result<(), SessionError> {
        self.drafts.commit_edit(index)?;
        self.state.set_status("Changes saved!");
        Ok(())
    }

    pub fn cancel_edit(&mut self, index: usize) -> Result<(), SessionError> {
        self.drafts.cancel_edit(index)?;
        self.state.set_status(format!("Edit of draft {} cancelled", index));
        Ok(())
    }

    /// Write all drafts to a timestamped file in the export directory.
    pub fn export_drafts(&mut self) -> Result<PathBuf> {
        if self.drafts.is_empty() {
            bail!("No drafts to export. Generate some first.");
        }
        let path = self.drafts.write_export(&self.config.export.dir())?;
        self.state
            .set_status(format!("Drafts saved to {}", path.display()));
        Ok(path)
    }
}
