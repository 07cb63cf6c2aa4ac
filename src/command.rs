//! Command types and parsing for the interactive shell

use std::path::PathBuf;

use crate::ai::{GenerateRequest, QuickAction, ReplyLength, Tone};

/// Help information for a command
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub name: &'static str,
    pub description: &'static str,
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Read a multi-line email from the terminal
    Paste,
    Load(PathBuf),
    Show,
    Analysis,
    Tone(Tone),
    Length(ReplyLength),
    Drafts(usize),
    /// Read a multi-line signature from the terminal
    Signature,
    Settings,
    /// Generate a batch; quick actions carry their action
    Generate(GenerateRequest),
    List,
    Edit(usize),
    Save(usize),
    Cancel(usize),
    Export,
    Help,
    Quit,
}

/// Parse one input line. The error text is meant for the user.
pub fn parse_command(input: &str) -> Result<ParsedCommand, String> {
    let trimmed = input.trim();
    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (trimmed, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "paste" => ParsedCommand::Paste,
        "load" | "upload" | "open" => {
            if arg.is_empty() {
                return Err("Usage: load <path to .txt, .eml or .docx>".to_string());
            }
            ParsedCommand::Load(PathBuf::from(arg))
        }
        "show" | "email" => ParsedCommand::Show,
        "analysis" | "analyze" => ParsedCommand::Analysis,
        "tone" => ParsedCommand::Tone(Tone::from_name(arg).ok_or_else(|| {
            format!(
                "Unknown tone '{}'. Choose one of: {}",
                arg,
                names(Tone::ALL.iter().map(|t| t.name()))
            )
        })?),
        "length" => ParsedCommand::Length(ReplyLength::from_name(arg).ok_or_else(|| {
            format!(
                "Unknown length '{}'. Choose one of: {}",
                arg,
                names(ReplyLength::ALL.iter().map(|l| l.name()))
            )
        })?),
        "drafts" => ParsedCommand::Drafts(parse_number(arg, "drafts <1-3>")?),
        "signature" | "sig" => ParsedCommand::Signature,
        "settings" => ParsedCommand::Settings,
        "generate" | "gen" | "regen" | "regenerate" => {
            ParsedCommand::Generate(GenerateRequest::plain())
        }
        "accept" => ParsedCommand::Generate(GenerateRequest::quick(QuickAction::AcceptMeeting)),
        "decline" => {
            ParsedCommand::Generate(GenerateRequest::quick(QuickAction::DeclinePolitely))
        }
        "info" => ParsedCommand::Generate(GenerateRequest::quick(QuickAction::RequestInfo)),
        "ack" | "acknowledge" => {
            ParsedCommand::Generate(GenerateRequest::quick(QuickAction::Acknowledge))
        }
        "followup" | "follow-up" => {
            ParsedCommand::Generate(GenerateRequest::quick(QuickAction::ScheduleFollowup))
        }
        "list" | "ls" => ParsedCommand::List,
        "edit" => ParsedCommand::Edit(parse_number(arg, "edit <draft>")?),
        "save" => ParsedCommand::Save(parse_number(arg, "save <draft>")?),
        "cancel" => ParsedCommand::Cancel(parse_number(arg, "cancel <draft>")?),
        "export" | "download" => ParsedCommand::Export,
        "help" | "h" | "?" => ParsedCommand::Help,
        "q" | "quit" | "exit" => ParsedCommand::Quit,
        _ => {
            return Err(format!(
                "Unknown command: {}. Type 'help' for a list of commands.",
                name
            ));
        }
    };

    Ok(command)
}

fn parse_number(arg: &str, usage: &str) -> Result<usize, String> {
    arg.parse()
        .map_err(|_| format!("Usage: {}", usage))
}

fn names<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// Get all available commands for help display
pub fn available_commands() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            name: "paste",
            description: "Paste an email (end with a line containing only '.')",
        },
        CommandHelp {
            name: "load <path>",
            description: "Load an email from a .txt, .eml or .docx file",
        },
        CommandHelp {
            name: "show",
            description: "Show the loaded email",
        },
        CommandHelp {
            name: "analysis",
            description: "Show the English/Telugu analysis of the email",
        },
        CommandHelp {
            name: "tone <name>",
            description: "professional, friendly, casual, formal, empathetic, assertive",
        },
        CommandHelp {
            name: "length <name>",
            description: "short, medium, detailed",
        },
        CommandHelp {
            name: "drafts <n>",
            description: "Number of drafts per batch (1-3)",
        },
        CommandHelp {
            name: "signature",
            description: "Set the signature appended to every draft",
        },
        CommandHelp {
            name: "settings",
            description: "Show the current reply settings",
        },
        CommandHelp {
            name: "generate",
            description: "Generate new reply drafts (alias: regen)",
        },
        CommandHelp {
            name: "accept",
            description: "Quick action: accept the meeting",
        },
        CommandHelp {
            name: "decline",
            description: "Quick action: decline politely",
        },
        CommandHelp {
            name: "info",
            description: "Quick action: request more information",
        },
        CommandHelp {
            name: "ack",
            description: "Quick action: acknowledge receipt",
        },
        CommandHelp {
            name: "followup",
            description: "Quick action: schedule a follow-up",
        },
        CommandHelp {
            name: "list",
            description: "Show the current drafts",
        },
        CommandHelp {
            name: "edit <n>",
            description: "Edit a draft (then 'save <n>' or 'cancel <n>')",
        },
        CommandHelp {
            name: "save <n>",
            description: "Save changes to a draft",
        },
        CommandHelp {
            name: "cancel <n>",
            description: "Discard changes to a draft",
        },
        CommandHelp {
            name: "export",
            description: "Download all drafts to a text file",
        },
        CommandHelp {
            name: "help",
            description: "Show this help message",
        },
        CommandHelp {
            name: "quit",
            description: "Exit",
        },
    ]
}
