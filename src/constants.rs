//! Application-wide constants
//!
//! Centralizes fixed values so the prompt, extraction and export code agree on them.

/// Model identifier sent to the generation service unless overridden in config.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Gemini REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Smallest number of drafts per batch.
pub const MIN_DRAFTS: usize = 1;

/// Largest number of drafts per batch.
pub const MAX_DRAFTS: usize = 3;

/// Draft count used when nothing else is configured.
pub const DEFAULT_DRAFTS: usize = 2;

// === Extraction placeholders ===

/// Shown when an .eml file carries no From header.
pub const UNKNOWN_SENDER: &str = "Unknown Sender";

/// Shown when an .eml file carries no Subject header.
pub const NO_SUBJECT: &str = "No Subject";

/// Shown when an .eml file carries no Date header.
pub const NO_DATE: &str = "No Date";

// === Export ===

/// File name prefix for exported draft dumps.
pub const EXPORT_FILE_PREFIX: &str = "email_drafts_";

/// Timestamp format used in export file names (minute granularity).
pub const EXPORT_FILE_TIME_FORMAT: &str = "%Y%m%d_%H%M";

/// Timestamp format used in the export header line.
pub const EXPORT_HEADER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// === Generation service ===

/// Initial delay before the first retry of a failed generation call, in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Maximum delay between generation retries, in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 10;

/// Line that terminates multi-line input in the shell.
pub const MULTILINE_TERMINATOR: &str = ".";
