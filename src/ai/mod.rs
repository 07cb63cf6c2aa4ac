//! Generation features: prompt composition and the Gemini client
//!
//! - `options`: tone, length, quick actions and the per-batch config
//! - `prompts`: deterministic prompt text for analysis and replies
//! - `client`: the `TextGenerator` seam and its Gemini implementation
//! - `retry`: backoff for transient service failures

mod client;
pub mod options;
pub mod prompts;
mod retry;

pub use client::{GeminiClient, GenerationError, TextGenerator};
pub use options::{GenerateRequest, GenerationConfig, QuickAction, ReplyLength, Tone};
