//! Application core - owns the current email, reply settings and draft batch

mod actions;
pub mod drafts;
pub mod state;

use crate::ai::TextGenerator;
use crate::config::Config;
use drafts::DraftSession;
use state::{AppState, ReplySettings};

/// One interactive session. Every method runs to completion before the next
/// user action is handled, so no state is shared across tasks.
pub struct App<G> {
    pub(crate) config: Config,
    pub(crate) generator: G,
    pub(crate) state: AppState,
    pub(crate) drafts: DraftSession,
}

impl<G: TextGenerator> App<G> {
    pub fn new(config: Config, generator: G) -> Self {
        let settings = ReplySettings::from(config.defaults.generation_config(None));
        Self {
            config,
            generator,
            state: AppState::new(settings),
            drafts: DraftSession::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn drafts(&self) -> &DraftSession {
        &self.drafts
    }
}
