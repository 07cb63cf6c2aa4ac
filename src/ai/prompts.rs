//! Prompt templates and instruction tables for analysis and reply generation
//!
//! Every function here is pure: the same inputs always produce the same text.

use super::options::{GenerationConfig, QuickAction, ReplyLength, Tone};

/// Tone instructions. Lookups fall back to the professional entry.
const TONE_INSTRUCTIONS: [(Tone, &str); 6] = [
    (
        Tone::Professional,
        "Use formal business language, be respectful and direct",
    ),
    (
        Tone::Friendly,
        "Use warm, approachable language while maintaining professionalism",
    ),
    (
        Tone::Casual,
        "Use relaxed, conversational tone but still appropriate for business",
    ),
    (
        Tone::Formal,
        "Use very formal, traditional business language with proper etiquette",
    ),
    (
        Tone::Empathetic,
        "Show understanding and compassion, acknowledge concerns warmly",
    ),
    (
        Tone::Assertive,
        "Be confident and clear, take charge of the situation",
    ),
];

/// Length instructions. Lookups fall back to the medium entry.
const LENGTH_INSTRUCTIONS: [(ReplyLength, &str); 3] = [
    (
        ReplyLength::Short,
        "Keep the reply to 2-3 sentences maximum, be very concise",
    ),
    (ReplyLength::Medium, "Write a balanced reply of 1-2 paragraphs"),
    (
        ReplyLength::Detailed,
        "Provide a comprehensive response with detailed explanations",
    ),
];

const ACTION_INSTRUCTIONS: [(QuickAction, &str); 5] = [
    (
        QuickAction::AcceptMeeting,
        "Accept the meeting invitation graciously and confirm availability",
    ),
    (
        QuickAction::DeclinePolitely,
        "Politely decline the request with a brief explanation",
    ),
    (
        QuickAction::RequestInfo,
        "Ask for additional information or clarification professionally",
    ),
    (
        QuickAction::Acknowledge,
        "Acknowledge receipt and provide appropriate response",
    ),
    (
        QuickAction::ScheduleFollowup,
        "Suggest scheduling a follow-up meeting or call",
    ),
];

/// Closing requirements appended to every reply prompt.
const REPLY_STRUCTURE: &str = r#"Generate a complete email reply with:
- Appropriate subject line (if needed)
- Professional greeting
- Main body addressing the sender's points
- Appropriate closing

Do not include sender's signature - that will be added separately."#;

fn lookup<K: PartialEq + Copy>(table: &[(K, &'static str)], key: K) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, instruction)| *instruction)
}

pub fn tone_instruction(tone: Tone) -> &'static str {
    lookup(&TONE_INSTRUCTIONS, tone)
        .or_else(|| lookup(&TONE_INSTRUCTIONS, Tone::Professional))
        .unwrap_or_default()
}

pub fn length_instruction(length: ReplyLength) -> &'static str {
    lookup(&LENGTH_INSTRUCTIONS, length)
        .or_else(|| lookup(&LENGTH_INSTRUCTIONS, ReplyLength::Medium))
        .unwrap_or_default()
}

pub fn action_instruction(action: QuickAction) -> Option<&'static str> {
    lookup(&ACTION_INSTRUCTIONS, action)
}

/// Bilingual (English + Telugu) analysis prompt. Only the body is interpolated.
pub fn compose_analysis_prompt(body: &str) -> String {
    format!(
        r#"Analyze the following email and provide analysis in both English and Telugu languages:

Email content:
{body}

Please provide the analysis in this exact format:

## English Analysis
**Summary:** [brief summary in English, 2-3 sentences]
**Intent:** [sender's intent/purpose in English]
**Key Points:** [bullet points in English]
**Urgency:** [Low/Medium/High]

## Telugu Analysis / తెలుగు విశ్లేషణ
**సారాంశం:** [brief summary in Telugu, 2-3 sentences]
**ఉద్దేశ్యం:** [sender's intent/purpose in Telugu]
**ముఖ్య అంశాలు:** [bullet points in Telugu]
**అత్యవసరత:** [తక్కువ/మధ్యమ/అధిక]"#
    )
}

/// Reply prompt: tone, length, optional action, the email, then structure rules.
pub fn compose_reply_prompt(body: &str, config: &GenerationConfig) -> String {
    let mut prompt = format!(
        "Write a professional email reply to the following email.\n\n\
         TONE: {}\n\
         LENGTH: {}\n",
        tone_instruction(config.tone),
        length_instruction(config.length)
    );

    if let Some(action) = config.action.and_then(action_instruction) {
        prompt.push_str("SPECIFIC ACTION: ");
        prompt.push_str(action);
        prompt.push('\n');
    }

    prompt.push_str("\nOriginal email to reply to:\n");
    prompt.push_str(body);
    prompt.push_str("\n\n");
    prompt.push_str(REPLY_STRUCTURE);
    prompt
}

/// Best-effort hint appended to the email body so drafts in one batch are less
/// likely to come back identical. Nothing guarantees the outputs differ.
pub fn variation_marker(index: usize, draft_count: usize) -> Option<String> {
    (draft_count > 1).then(|| format!(" (Draft {} variation)", index))
}

/// Reply prompt for draft `index` of a batch, including the variation hint.
pub fn compose_draft_prompt(body: &str, config: &GenerationConfig, index: usize) -> String {
    match variation_marker(index, config.draft_count()) {
        Some(marker) => compose_reply_prompt(&format!("{}{}", body, marker), config),
        None => compose_reply_prompt(body, config),
    }
}

/// Append the signature after a blank line, unless it is blank.
pub fn apply_signature(reply: &str, signature: &str) -> String {
    if signature.trim().is_empty() {
        reply.to_string()
    } else {
        format!("{}\n\n{}", reply, signature)
    }
}
