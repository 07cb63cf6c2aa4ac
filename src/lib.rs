//! Draft email replies with a generative model.
//!
//! - [`mail`] turns pasted text or uploaded files (.txt, .eml, .docx) into a
//!   [`mail::CanonicalEmail`]
//! - [`ai`] composes analysis/reply prompts and talks to the Gemini API
//! - [`app`] owns the session: current email, reply settings and draft batch
//! - [`shell`] and [`ui`] are the line-oriented front end

pub mod ai;
pub mod app;
pub mod command;
pub mod config;
pub mod constants;
pub mod mail;
pub mod shell;
pub mod ui;
