//! Plain-text rendering of session state for the interactive shell

use std::io::{self, Write};

use crate::ai::QuickAction;
use crate::app::drafts::DraftSession;
use crate::app::state::{InputState, ReplySettings};
use crate::command::available_commands;

const RULE: &str = "----------------------------------------";

pub fn render_email(out: &mut impl Write, input: &InputState) -> io::Result<()> {
    match input {
        InputState::Empty => writeln!(out, "Please paste an email or upload a file to get started!"),
        InputState::Failed(message) => writeln!(out, "{}", message),
        InputState::Loaded { email, .. } => {
            writeln!(out, "{}", RULE)?;
            writeln!(out, "{}", email.body())?;
            writeln!(out, "{}", RULE)
        }
    }
}

pub fn render_analysis(out: &mut impl Write, input: &InputState) -> io::Result<()> {
    match input.analysis() {
        Some(analysis) => {
            writeln!(out, "Analysis Results")?;
            writeln!(out, "{}", RULE)?;
            writeln!(out, "{}", analysis)
        }
        None => writeln!(out, "Paste or upload an email to see analysis"),
    }
}

pub fn render_drafts(
    out: &mut impl Write,
    session: &DraftSession,
    action: Option<QuickAction>,
) -> io::Result<()> {
    if session.is_empty() {
        return writeln!(out, "No drafts yet. Use 'generate' or a quick action.");
    }

    if let Some(action) = action {
        writeln!(out, "Quick action: {}", action.label())?;
    }

    for draft in session.drafts() {
        let marker = if draft.is_editing() { " (editing)" } else { "" };
        writeln!(out, "=== Draft {}{} ===", draft.index(), marker)?;
        writeln!(out, "{}", draft.content())?;
        if let Some(pending) = draft.pending_edit()
            && pending != draft.content()
        {
            writeln!(out, "--- unsaved changes ---")?;
            writeln!(out, "{}", pending)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_settings(
    out: &mut impl Write,
    settings: &ReplySettings,
    model: &str,
) -> io::Result<()> {
    writeln!(out, "Tone:      {}", settings.tone)?;
    writeln!(out, "Length:    {}", settings.length)?;
    writeln!(out, "Drafts:    {}", settings.draft_count)?;
    if settings.signature.trim().is_empty() {
        writeln!(out, "Signature: (none)")?;
    } else {
        writeln!(out, "Signature:")?;
        for line in settings.signature.lines() {
            writeln!(out, "  {}", line)?;
        }
    }
    writeln!(out, "Model:     {}", model)
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    let commands = available_commands();
    let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for command in commands {
        writeln!(out, "  {:width$}  {}", command.name, command.description, width = width)?;
    }
    Ok(())
}

pub fn render_status(
    out: &mut impl Write,
    message: Option<String>,
    error: Option<String>,
) -> io::Result<()> {
    if let Some(message) = message {
        writeln!(out, "{}", message)?;
    }
    if let Some(error) = error {
        writeln!(out, "Error: {}", error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ReplyLength, Tone};
    use crate::mail::CanonicalEmail;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_failed_input_shows_error_in_place_of_body() {
        let input = InputState::Failed("Error reading EML file: bad".to_string());
        assert_eq!(
            render(|out| render_email(out, &input)),
            "Error reading EML file: bad\n"
        );
        assert!(render(|out| render_analysis(out, &input)).contains("see analysis"));
    }

    #[test]
    fn test_loaded_email_and_analysis() {
        let input = InputState::Loaded {
            email: CanonicalEmail::from_text("Hello"),
            analysis: Some("**Urgency:** Low".to_string()),
        };
        assert!(render(|out| render_email(out, &input)).contains("\nHello\n"));
        assert!(render(|out| render_analysis(out, &input)).ends_with("**Urgency:** Low\n"));
    }

    #[test]
    fn test_settings_signature_lines() {
        let settings = ReplySettings {
            tone: Tone::Friendly,
            length: ReplyLength::Short,
            draft_count: 2,
            signature: "Best,\nAsha".to_string(),
        };
        let text = render(|out| render_settings(out, &settings, "gemini-2.5-flash"));
        assert!(text.contains("Tone:      friendly"));
        assert!(text.contains("  Best,\n  Asha\n"));
        assert!(text.ends_with("Model:     gemini-2.5-flash\n"));
    }

    #[test]
    fn test_empty_drafts_hint() {
        let text = render(|out| render_drafts(out, &DraftSession::new(), None));
        assert!(text.starts_with("No drafts yet"));
    }
}
