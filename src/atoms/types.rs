// ── Paw Atoms: Decision Engine Types ───────────────────────────────────────
//
// Inputs and outputs of the response decision engine. Pure data types with
// small constructor helpers; scoring logic lives in engine/.
//
// Optional inputs deserialize leniently: a field that is missing or has the
// wrong shape becomes `None` instead of failing the whole payload, so a
// malformed mention list or personality profile degrades to "no signal".

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 1: Event
// ═══════════════════════════════════════════════════════════════════════════

/// The slice of an inbound platform message the engine looks at.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub attachment_count: u32,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub mentioned_user_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub mentioned_role_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub mentioned_channel_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mentions_everyone: Option<bool>,
}

impl Event {
    /// A plain text event with no attachments and no mentions.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mentioned_user_count: Some(0),
            mentioned_role_count: Some(0),
            mentioned_channel_count: Some(0),
            mentions_everyone: Some(false),
            ..Default::default()
        }
    }

    /// Combined user + role + channel mentions, or `None` when no mention
    /// data is available at all. Missing individual counts count as zero.
    pub fn total_mentions(&self) -> Option<u64> {
        let counts = [
            self.mentioned_user_count,
            self.mentioned_role_count,
            self.mentioned_channel_count,
        ];
        if counts.iter().all(Option::is_none) {
            return None;
        }
        Some(counts.iter().map(|c| u64::from(c.unwrap_or(0))).sum())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 2: Context
// ═══════════════════════════════════════════════════════════════════════════

/// Per-call snapshot assembled by the caller: consent, addressing mode,
/// anti-spam counters and optional personalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Context {
    #[serde(default)]
    pub opted_in: bool,
    #[serde(default)]
    pub is_direct_message: bool,
    #[serde(default)]
    pub is_personal_thread: bool,
    #[serde(default)]
    pub mentioned_engine: bool,
    #[serde(default)]
    pub replied_to_engine: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_response_at: Option<DateTime<Utc>>,
    /// Evaluation instant for the cooldown check. When absent the engine
    /// reads the wall clock, which makes the decision time-dependent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub recent_sender_burst_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub recent_channel_burst_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalitySignals>,
}

impl Context {
    /// An opted-in context with no addressing or anti-spam signals.
    pub fn opted_in() -> Self {
        Self { opted_in: true, ..Default::default() }
    }

    /// DM, mention, or reply. Personal threads do not count.
    pub fn is_directly_addressed(&self) -> bool {
        self.is_direct_message || self.mentioned_engine || self.replied_to_engine
    }

    /// Direct address or a personal thread. Channel busyness is ignored here.
    pub fn is_engaged(&self) -> bool {
        self.is_directly_addressed() || self.is_personal_thread
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 3: Personality Signals
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Frustrated,
    Excited,
    Serious,
    Playful,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Frustrated => "frustrated",
            Mood::Excited => "excited",
            Mood::Serious => "serious",
            Mood::Playful => "playful",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreferredLength {
    Short,
    Medium,
    Detailed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    Formal,
    Casual,
    Technical,
}

/// Trait levels of the active persona, each in [0, 1].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Persona {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub curiosity: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub supportiveness: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub playfulness: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub directness: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractionPattern {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preferred_length: Option<PreferredLength>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<CommunicationStyle>,
    /// Recent 1–5 ratings of the system's replies to this user.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub recent_feedback_scores: Vec<f64>,
}

/// Relationship and persona signals from the personalization subsystem.
/// Every field is optional; engine::personality resolves defaults once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonalitySignals {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub relationship_strength: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub active_persona: Option<Persona>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub interaction_pattern: Option<InteractionPattern>,
}

// ═══════════════════════════════════════════════════════════════════════════
// SECTION 4: Decision
// ═══════════════════════════════════════════════════════════════════════════

/// Processing mode handed to the orchestration layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    QuickReply,
    DeepReason,
    Defer,
    Ignore,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::QuickReply => "quick-reply",
            Strategy::DeepReason => "deep-reason",
            Strategy::Defer => "defer",
            Strategy::Ignore => "ignore",
        }
    }

    /// Whether the orchestration layer has any work to do for this strategy.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Strategy::Ignore)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    pub should_respond: bool,
    /// Ordered labels of every signal that moved the score or the strategy.
    pub reason_trail: Vec<String>,
    pub confidence: f64,
    pub token_estimate: u64,
    pub strategy: Strategy,
    /// Final accumulated score.
    pub score: f64,
    /// Adjusted ambient threshold the score was compared against. For direct
    /// address this is the configured base used by the confidence term.
    pub threshold: f64,
}

impl Decision {
    pub fn has_reason(&self, reason: &str) -> bool {
        self.reason_trail.iter().any(|r| r == reason)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Lenient field decoders
// ═══════════════════════════════════════════════════════════════════════════

/// Decode any value as `T`, mapping a shape mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// A count given either as a non-negative integer or as the list being
/// counted (platform payloads carry mention arrays).
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| count_from_value(&v)))
}

fn lenient_count_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_count(deserializer).map(|c| c.unwrap_or(0))
}

/// Keep only the numeric entries of a list.
fn lenient_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Array(items)) => items.iter().filter_map(|v| v.as_f64()).collect(),
        _ => Vec::new(),
    })
}

pub(crate) fn count_from_value(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::Array(items) => u32::try_from(items.len()).ok(),
        _ => None,
    }
}
