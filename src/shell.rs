//! Line-oriented interactive shell
//!
//! Reads one command per line, dispatches it to the [`App`] and renders the
//! result. Multi-line input (emails, signatures, draft edits) ends at a line
//! holding only `.`.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::ai::TextGenerator;
use crate::app::App;
use crate::app::state::InputState;
use crate::command::{ParsedCommand, parse_command};
use crate::constants::MULTILINE_TERMINATOR;
use crate::ui;

pub async fn run<G, R, W>(app: &mut App<G>, mut input: R, mut out: W) -> Result<()>
where
    G: TextGenerator,
    R: BufRead,
    W: Write,
{
    writeln!(out, "replyr - draft email replies. Type 'help' for commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };
        tracing::debug!(?command, "Shell command");

        if command == ParsedCommand::Quit {
            break;
        }

        dispatch(app, command, &mut input, &mut out).await?;

        let (message, error) = app.state_mut().status.take();
        ui::render_status(&mut out, message, error)?;
    }

    Ok(())
}

async fn dispatch<G, R, W>(
    app: &mut App<G>,
    command: ParsedCommand,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    G: TextGenerator,
    R: BufRead,
    W: Write,
{
    match command {
        ParsedCommand::Paste => {
            writeln!(
                out,
                "Paste the email you want to reply to (end with '{}' on its own line):",
                MULTILINE_TERMINATOR
            )?;
            let text = read_multiline(input)?;
            writeln!(out, "Analyzing email...")?;
            app.paste_email(text).await;
            ui::render_analysis(out, &app.state().input)?;
        }
        ParsedCommand::Load(path) => {
            if let Err(e) = app.load_file(&path).await {
                writeln!(out, "Error: {:#}", e)?;
                return Ok(());
            }
            match &app.state().input {
                InputState::Loaded { .. } => {
                    ui::render_email(out, &app.state().input)?;
                    ui::render_analysis(out, &app.state().input)?;
                }
                InputState::Failed(_) => ui::render_email(out, &app.state().input)?,
                InputState::Empty => {}
            }
        }
        ParsedCommand::Show => ui::render_email(out, &app.state().input)?,
        ParsedCommand::Analysis => ui::render_analysis(out, &app.state().input)?,
        ParsedCommand::Tone(tone) => app.set_tone(tone),
        ParsedCommand::Length(length) => app.set_length(length),
        ParsedCommand::Drafts(count) => {
            if let Err(e) = app.set_draft_count(count) {
                writeln!(out, "Error: {}", e)?;
            }
        }
        ParsedCommand::Signature => {
            writeln!(
                out,
                "Enter your signature (end with '{}'; empty clears it):",
                MULTILINE_TERMINATOR
            )?;
            let signature = read_multiline(input)?;
            app.set_signature(signature);
        }
        ParsedCommand::Settings => {
            ui::render_settings(out, &app.state().settings, &app.config().ai.model)?
        }
        ParsedCommand::Generate(request) => {
            if app.state().input.email().is_some_and(|email| !email.is_blank()) {
                writeln!(
                    out,
                    "Generating {} reply draft(s)...",
                    app.state().settings.draft_count
                )?;
            }
            app.generate(request).await;
            if !app.drafts().is_empty() {
                ui::render_drafts(out, app.drafts(), app.state().last_action)?;
            }
        }
        ParsedCommand::List => ui::render_drafts(out, app.drafts(), app.state().last_action)?,
        ParsedCommand::Edit(index) => match app.begin_edit(index) {
            Ok(current) => {
                writeln!(out, "Current text of draft {}:", index)?;
                writeln!(out, "{}", current)?;
                writeln!(
                    out,
                    "Enter the new text (end with '{}'; empty keeps the current text):",
                    MULTILINE_TERMINATOR
                )?;
                let text = read_multiline(input)?;
                if !text.trim().is_empty() {
                    app.update_draft(index, text)?;
                }
                writeln!(out, "Type 'save {0}' to keep or 'cancel {0}' to discard.", index)?;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        },
        ParsedCommand::Save(index) => {
            if let Err(e) = app.save_draft(index) {
                writeln!(out, "Error: {}", e)?;
            }
        }
        ParsedCommand::Cancel(index) => {
            if let Err(e) = app.cancel_edit(index) {
                writeln!(out, "Error: {}", e)?;
            }
        }
        ParsedCommand::Export => {
            if let Err(e) = app.export_drafts() {
                writeln!(out, "Error: {:#}", e)?;
            }
        }
        ParsedCommand::Help => ui::render_help(out)?,
        ParsedCommand::Quit => {}
    }
    Ok(())
}

/// Read lines until the terminator line or end of input.
fn read_multiline(input: &mut impl BufRead) -> std::io::Result<String> {
    let mut lines = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim_end() == MULTILINE_TERMINATOR {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::drafts::tests::ScriptedGenerator;
    use crate::config::Config;
    use std::io::Cursor;

    async fn run_script(app: &mut App<ScriptedGenerator>, script: &str) -> String {
        let mut out = Vec::new();
        run(app, Cursor::new(script.as_bytes()), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_full_session() {
        let generator = ScriptedGenerator::ok(&["Urgency: Medium", "Draft one", "Draft two"]);
        let mut app = App::new(Config::default(), generator);

        let script = "paste\n\
                      Hi, can we move our call to 3pm?\n\
                      Thanks, Dana\n\
                      .\n\
                      decline\n\
                      edit 2\n\
                      Sorry Dana, 3pm does not work.\n\
                      .\n\
                      save 2\n\
                      list\n\
                      quit\n\
                      generate\n";
        let output = run_script(&mut app, script).await;

        assert_eq!(
            app.state().input.email().unwrap().body(),
            "Hi, can we move our call to 3pm?\nThanks, Dana"
        );
        assert!(output.contains("Urgency: Medium"));
        assert!(output.contains("Quick action: Decline Politely"));
        assert!(output.contains("Changes saved!"));
        assert_eq!(
            app.drafts().get(2).unwrap().content(),
            "Sorry Dana, 3pm does not work."
        );
        assert_eq!(app.drafts().get(1).unwrap().content(), "Draft one");
        // Nothing after quit runs
        assert_eq!(app.generator.prompts.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_cancel_keeps_generated_text() {
        let mut app = App::new(Config::default(), ScriptedGenerator::ok(&["a", "Keep me"]));
        app.set_draft_count(1).unwrap();

        let script = "paste\nHello\n.\ngenerate\nedit 1\nThrow away\n.\ncancel 1\n";
        run_script(&mut app, script).await;

        assert_eq!(app.drafts().get(1).unwrap().content(), "Keep me");
        assert!(!app.drafts().get(1).unwrap().is_editing());
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_session() {
        let mut app = App::new(Config::default(), ScriptedGenerator::default());

        let script = "bogus\nedit 4\ndrafts 9\ngenerate\nload report.pdf\ntone casual\nsettings\n";
        let output = run_script(&mut app, script).await;

        assert!(output.contains("Unknown command: bogus"));
        assert!(output.contains("Error: draft 4 does not exist"));
        assert!(output.contains("Error: Number of drafts must be between 1 and 3"));
        assert!(output.contains("Error: Please paste an email or upload a file to get started!"));
        assert!(output.contains("Error: Unsupported file type"));
        assert!(output.contains("Tone:      casual"));
    }

    #[tokio::test]
    async fn test_blank_email_is_not_announced_as_generating() {
        let mut app = App::new(Config::default(), ScriptedGenerator::default());

        let output = run_script(&mut app, "paste\n   \n.\ngenerate\n").await;

        assert!(!output.contains("Generating"));
        assert!(output.contains("Error: Please paste an email or upload a file to get started!"));
        assert!(app.generator.prompts.borrow().is_empty());
    }

    #[test]
    fn test_read_multiline_stops_at_terminator() {
        let mut input = Cursor::new("line one\n\nline three\n.\nafter");
        assert_eq!(read_multiline(&mut input).unwrap(), "line one\n\nline three");

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "after");
    }
}
