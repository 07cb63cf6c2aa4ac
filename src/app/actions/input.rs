//! Email input: pasted text and uploaded files

use std::path::Path;

use anyhow::{Context, Result};

use crate::ai::TextGenerator;
use crate::app::App;
use crate::app::state::InputState;
use crate::mail::{CanonicalEmail, InputKind, extract};

impl<G: TextGenerator> App<G> {
    /// Replace the current email with pasted text and analyze it.
    pub async fn paste_email(&mut self, text: String) {
        self.replace_email(CanonicalEmail::from_text(text)).await;
    }

    /// Load an uploaded file. Unsupported extensions are rejected before any
    /// extraction; extraction failures are shown in place of the email body.
    pub async fn load_file(&mut self, path: &Path) -> Result<()> {
        let Some(kind) = InputKind::from_path(path) else {
            self.state
                .set_error("Unsupported file type. Upload .txt, .eml, or .docx files.");
            return Ok(());
        };

        let raw = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::info!(path = %path.display(), %kind, bytes = raw.len(), "Loading email file");

        match extract(&raw, kind) {
            Ok(email) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.state
                    .set_status(format!("File '{}' loaded successfully!", name));
                self.replace_email(email).await;
            }
            Err(e) => {
                self.drafts.clear();
                self.state.last_action = None;
                self.state.input = InputState::Failed(e.to_string());
            }
        }
        Ok(())
    }

    /// New input event: the previous email, analysis and drafts are discarded.
    async fn replace_email(&mut self, email: CanonicalEmail) {
        self.drafts.clear();
        self.state.last_action = None;

        let analysis = if email.is_blank() {
            None
        } else {
            Some(self.analyze(&email).await)
        };

        self.state.input = InputState::Loaded { email, analysis };
    }
}

#[cfg(test)]
mod tests {
    use crate::ai::GenerateRequest;
    use crate::app::state::InputState;
    use crate::app::tests::app_with;
    use std::fs;

    #[tokio::test]
    async fn test_paste_runs_analysis() {
        let mut app = app_with(&["## English Analysis\n**Urgency:** High"]);

        app.paste_email("The server is down, please help!".to_string())
            .await;

        let email = app.state().input.email().unwrap();
        assert_eq!(email.body(), "The server is down, please help!");
        assert_eq!(
            app.state().input.analysis(),
            Some("## English Analysis\n**Urgency:** High")
        );
        let prompts = app.generator.prompts.borrow();
        assert!(prompts[0].contains("## Telugu Analysis"));
    }

    #[tokio::test]
    async fn test_blank_paste_skips_analysis() {
        let mut app = app_with(&[]);
        app.paste_email("   \n".to_string()).await;
        assert!(app.state().input.analysis().is_none());
        assert!(app.generator.prompts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_new_input_discards_drafts() {
        let mut app = app_with(&["analysis", "draft one", "draft two", "analysis 2"]);
        app.paste_email("First email".to_string()).await;
        app.generate(GenerateRequest::plain()).await;
        assert_eq!(app.drafts().len(), 2);

        app.paste_email("Second email".to_string()).await;
        assert!(app.drafts().is_empty());
        assert_eq!(app.state().input.analysis(), Some("analysis 2"));
    }

    #[tokio::test]
    async fn test_load_eml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invite.eml");
        fs::write(
            &path,
            "From: Priya <priya@example.com>\r\nSubject: Sync\r\n\r\nFree at 4?",
        )
        .unwrap();

        let mut app = app_with(&["analysis"]);
        app.load_file(&path).await.unwrap();

        let email = app.state().input.email().unwrap();
        assert!(email.body().starts_with("From: Priya <priya@example.com>\nSubject: Sync\n"));
        assert_eq!(email.metadata().subject.as_deref(), Some("Sync"));
        let (message, error) = app.state_mut().status.take();
        assert_eq!(message.as_deref(), Some("File 'invite.eml' loaded successfully!"));
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let mut app = app_with(&[]);
        app.load_file(&path).await.unwrap();

        assert!(matches!(app.state().input, InputState::Empty));
        assert!(app.state_mut().status.take().1.unwrap().contains(".docx"));
    }

    #[tokio::test]
    async fn test_extraction_failure_shown_inline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        fs::write(&path, b"not a zip at all").unwrap();

        let mut app = app_with(&[]);
        app.load_file(&path).await.unwrap();

        match &app.state().input {
            InputState::Failed(message) => {
                assert!(message.starts_with("Error reading DOCX file:"))
            }
            other => panic!("expected failed input, got {:?}", other),
        }
        assert!(app.generator.prompts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let mut app = app_with(&[]);
        let result = app.load_file(std::path::Path::new("/nonexistent/mail.txt")).await;
        assert!(result.is_err());
    }
}
