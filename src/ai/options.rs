//! Generation settings: tone, length, quick actions and the per-batch config

use std::fmt;

use crate::constants::{DEFAULT_DRAFTS, MAX_DRAFTS, MIN_DRAFTS};

/// Voice of the generated reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
    Formal,
    Empathetic,
    Assertive,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Casual,
        Tone::Formal,
        Tone::Empathetic,
        Tone::Assertive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Casual => "casual",
            Tone::Formal => "formal",
            Tone::Empathetic => "empathetic",
            Tone::Assertive => "assertive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.name().eq_ignore_ascii_case(name))
    }

    /// Like [`Tone::from_name`], but unknown names fall back to the default.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown tone {:?}, using {}", name, Self::default());
            Self::default()
        })
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target size of the generated reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReplyLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl ReplyLength {
    pub const ALL: [ReplyLength; 3] = [
        ReplyLength::Short,
        ReplyLength::Medium,
        ReplyLength::Detailed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReplyLength::Short => "short",
            ReplyLength::Medium => "medium",
            ReplyLength::Detailed => "detailed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|length| length.name().eq_ignore_ascii_case(name))
    }

    /// Like [`ReplyLength::from_name`], but unknown names fall back to the default.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown reply length {:?}, using {}", name, Self::default());
            Self::default()
        })
    }
}

impl fmt::Display for ReplyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predefined reply intent that adds one fixed instruction to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    AcceptMeeting,
    DeclinePolitely,
    RequestInfo,
    Acknowledge,
    ScheduleFollowup,
}

impl QuickAction {
    pub const ALL: [QuickAction; 5] = [
        QuickAction::AcceptMeeting,
        QuickAction::DeclinePolitely,
        QuickAction::RequestInfo,
        QuickAction::Acknowledge,
        QuickAction::ScheduleFollowup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QuickAction::AcceptMeeting => "accept_meeting",
            QuickAction::DeclinePolitely => "decline_politely",
            QuickAction::RequestInfo => "request_info",
            QuickAction::Acknowledge => "acknowledge",
            QuickAction::ScheduleFollowup => "schedule_followup",
        }
    }

    /// Button label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            QuickAction::AcceptMeeting => "Accept Meeting",
            QuickAction::DeclinePolitely => "Decline Politely",
            QuickAction::RequestInfo => "Request Info",
            QuickAction::Acknowledge => "Acknowledge",
            QuickAction::ScheduleFollowup => "Schedule Follow-up",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One user trigger for a new batch. Quick-action buttons carry their action,
/// the plain generate/regenerate button carries none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub action: Option<QuickAction>,
}

impl GenerateRequest {
    pub fn plain() -> Self {
        Self { action: None }
    }

    pub fn quick(action: QuickAction) -> Self {
        Self {
            action: Some(action),
        }
    }
}

/// Snapshot of the reply settings at the moment a batch is triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub tone: Tone,
    pub length: ReplyLength,
    pub action: Option<QuickAction>,
    pub signature: String,
    draft_count: usize,
}

impl GenerationConfig {
    /// `draft_count` is clamped into the supported range.
    pub fn new(
        tone: Tone,
        length: ReplyLength,
        action: Option<QuickAction>,
        signature: impl Into<String>,
        draft_count: usize,
    ) -> Self {
        Self {
            tone,
            length,
            action,
            signature: signature.into(),
            draft_count: clamp_draft_count(draft_count),
        }
    }

    pub fn draft_count(&self) -> usize {
        self.draft_count
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(
            Tone::default(),
            ReplyLength::default(),
            None,
            String::new(),
            DEFAULT_DRAFTS,
        )
    }
}

pub fn clamp_draft_count(count: usize) -> usize {
    count.clamp(MIN_DRAFTS, MAX_DRAFTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_names_round_trip() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_name(tone.name()), Some(tone));
        }
        assert_eq!(Tone::from_name(" Friendly "), Some(Tone::Friendly));
    }

    #[test]
    fn test_unknown_values_fall_back() {
        assert_eq!(Tone::from_name("sarcastic"), None);
        assert_eq!(Tone::resolve("sarcastic"), Tone::Professional);
        assert_eq!(ReplyLength::resolve("epic"), ReplyLength::Medium);
        assert_eq!(ReplyLength::resolve("SHORT"), ReplyLength::Short);
    }

    #[test]
    fn test_draft_count_is_clamped() {
        let config = |n| GenerationConfig::new(Tone::Casual, ReplyLength::Short, None, "", n);
        assert_eq!(config(0).draft_count(), 1);
        assert_eq!(config(2).draft_count(), 2);
        assert_eq!(config(9).draft_count(), 3);
        assert_eq!(GenerationConfig::default().draft_count(), 2);
    }
}
