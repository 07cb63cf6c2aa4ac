//! Action handlers for user commands
//!
//! - `input`: pasted text and file loads (extraction + automatic analysis)
//! - `ai`: analysis and draft batch generation
//! - `drafts`: per-draft editing, reply settings and export

mod ai;
mod drafts;
mod input;
