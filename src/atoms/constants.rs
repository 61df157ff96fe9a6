// ── Paw Atoms: Constants ───────────────────────────────────────────────────
// All named constants for the decision engine live here.
// The scoring weights are hand-tuned and pinned by tests. Change them only
// together with the tests that exercise them.

// ── Config defaults ────────────────────────────────────────────────────────
pub const DEFAULT_COOLDOWN_MS: u64 = 30_000;
pub const DEFAULT_MAX_MENTIONS_ALLOWED: u32 = 5;
pub const DEFAULT_MODEL_TOKEN_LIMIT: u64 = 8_192;
pub const DEFAULT_AMBIENT_THRESHOLD: f64 = 20.0;
pub const DEFAULT_SHORT_MESSAGE_MIN_LEN: usize = 4;
pub const DEFAULT_BURST_COUNT_THRESHOLD: u32 = 5;

// ── Token estimation ───────────────────────────────────────────────────────
pub const CHARS_PER_TOKEN: u64 = 4;
pub const TOKENS_PER_ATTACHMENT: u64 = 256;

// ── Anti-abuse pre-check ───────────────────────────────────────────────────
pub const PENALTY_MENTIONS_EVERYONE: f64 = -40.0;
pub const PENALTY_TOO_MANY_MENTIONS: f64 = -25.0;

// ── Direct address ─────────────────────────────────────────────────────────
pub const BONUS_DIRECT_MESSAGE: f64 = 100.0;
pub const BONUS_MENTIONED: f64 = 95.0;
pub const BONUS_REPLY: f64 = 90.0;
pub const BONUS_PERSONAL_THREAD: f64 = 50.0;

// ── Content heuristics ─────────────────────────────────────────────────────
pub const BONUS_QUESTION: f64 = 25.0;
pub const BONUS_CODE_MENTION: f64 = 15.0;
pub const BONUS_URGENCY: f64 = 10.0;

// ── Short message / anti-spam ──────────────────────────────────────────────
pub const PENALTY_TOO_SHORT: f64 = -20.0;
pub const PENALTY_COOLDOWN: f64 = -30.0;
pub const PENALTY_USER_BURST: f64 = -15.0;
pub const PENALTY_CHANNEL_BUSY: f64 = -20.0;
pub const PENALTY_CHANNEL_ACTIVE: f64 = -10.0;
/// Channel burst at this multiple of the burst threshold counts as "busy".
pub const CHANNEL_BUSY_MULTIPLIER: u32 = 2;

// ── Strategy buckets ───────────────────────────────────────────────────────
pub const DEEP_REASON_LIMIT_FRACTION: f64 = 0.5;
pub const DEFER_LIMIT_FRACTION: f64 = 0.9;
pub const QUICK_REPLY_MAX_TOKENS: u64 = 100;

// ── Personality: score ─────────────────────────────────────────────────────
pub const RELATIONSHIP_SCORE_WEIGHT: f64 = 20.0;
pub const COMPATIBILITY_SCORE_WEIGHT: f64 = 15.0;
pub const MOOD_FRUSTRATED_BONUS: f64 = 15.0;
pub const MOOD_EXCITED_BONUS: f64 = 10.0;
pub const MOOD_PLAYFUL_BONUS: f64 = 8.0;
pub const MOOD_SERIOUS_ADDRESSED_BONUS: f64 = 5.0;
pub const MOOD_SERIOUS_AMBIENT_PENALTY: f64 = -5.0;
/// A persona trait above this counts as "strong" for trait bonuses and overrides.
pub const PERSONA_TRAIT_STRONG: f64 = 0.7;
pub const CURIOUS_QUESTION_BONUS: f64 = 10.0;
pub const SUPPORTIVE_HELP_BONUS: f64 = 12.0;
pub const PLAYFUL_LANGUAGE_BONUS: f64 = 8.0;
pub const DIRECTNESS_AMBIENT_SCALE: f64 = 10.0;
pub const PERSONA_TRAIT_NEUTRAL: f64 = 0.5;
pub const SHORT_PREFERENCE_BONUS: f64 = 5.0;
pub const SHORT_CONTENT_MAX_CHARS: usize = 50;
pub const TECHNICAL_MATCH_BONUS: f64 = 8.0;
pub const POSITIVE_FEEDBACK_BONUS: f64 = 5.0;
pub const NEGATIVE_FEEDBACK_PENALTY: f64 = -5.0;
pub const POSITIVE_FEEDBACK_AVG: f64 = 4.0;
pub const NEGATIVE_FEEDBACK_AVG: f64 = 2.0;

// ── Personality: ambient threshold ─────────────────────────────────────────
pub const THRESHOLD_RELATIONSHIP_WEIGHT: f64 = 10.0;
pub const THRESHOLD_COMPATIBILITY_WEIGHT: f64 = 8.0;
pub const THRESHOLD_CURIOSITY_WEIGHT: f64 = 5.0;
pub const THRESHOLD_SUPPORTIVENESS_WEIGHT: f64 = 3.0;
pub const THRESHOLD_DIRECTNESS_WEIGHT: f64 = 5.0;
pub const THRESHOLD_SERIOUS_RAISE: f64 = 5.0;
/// Adjusted ambient threshold never drops below this.
pub const AMBIENT_THRESHOLD_FLOOR: f64 = 5.0;

// ── Personality: strategy overrides ────────────────────────────────────────
pub const DETAILED_PREFERENCE_MIN_TOKENS: u64 = 200;
pub const SHORT_PREFERENCE_LIMIT_FRACTION: f64 = 0.3;
pub const HIGH_DIRECTNESS: f64 = 0.8;
pub const DIRECT_PERSONA_MAX_TOKENS: u64 = 500;
pub const STRONG_RELATIONSHIP: f64 = 0.8;
pub const NON_TRIVIAL_CONTENT_MIN_CHARS: usize = 20;

// ── Confidence ─────────────────────────────────────────────────────────────
pub const DIRECT_BASE_CONFIDENCE: f64 = 0.8;
pub const CONFIDENCE_RELATIONSHIP_BOOST: f64 = 0.1;
pub const CONFIDENCE_COMPATIBILITY_BOOST: f64 = 0.05;
pub const CONFIDENCE_FEEDBACK_BOOST: f64 = 0.05;
pub const CONFIDENCE_AFFINITY_CUTOFF: f64 = 0.7;
pub const DIRECT_BASE_WEIGHT: f64 = 0.7;
pub const DIRECT_SCORE_WEIGHT: f64 = 0.3;
pub const AMBIENT_CONFIDENCE_MIDPOINT: f64 = 0.5;
pub const CONFIDENCE_SCORE_SCALE: f64 = 100.0;
pub const AMBIENT_AFFINITY_BOOST: f64 = 0.1;
pub const AMBIENT_AFFINITY_CUTOFF: f64 = 0.6;

// ── Reason labels ──────────────────────────────────────────────────────────
// Stable machine-readable strings consumed by orchestration and audit logs.
pub const REASON_OPTED_OUT: &str = "opted-out";
pub const REASON_MENTIONS_EVERYONE: &str = "mentions-everyone";
pub const REASON_TOO_MANY_MENTIONS: &str = "too-many-mentions";
pub const REASON_DIRECT_MESSAGE: &str = "direct-message";
pub const REASON_MENTIONED: &str = "mentioned";
pub const REASON_REPLY: &str = "reply";
pub const REASON_PERSONAL_THREAD: &str = "personal-thread";
pub const REASON_QUESTION: &str = "question";
pub const REASON_CODE_MENTION: &str = "code-mention";
pub const REASON_URGENCY: &str = "urgency";
pub const REASON_TOO_SHORT: &str = "too-short";
pub const REASON_COOLDOWN: &str = "cooldown";
pub const REASON_USER_BURST: &str = "user-burst";
pub const REASON_CHANNEL_BUSY: &str = "channel-busy";
pub const REASON_CHANNEL_ACTIVE: &str = "channel-active";
pub const REASON_TOKEN_BUDGET: &str = "token-budget";
pub const REASON_ABUSE_BLOCK: &str = "abuse-block";
pub const REASON_BELOW_THRESHOLD: &str = "below-threshold";
pub const REASON_RELATIONSHIP: &str = "relationship";
pub const REASON_COMPATIBILITY: &str = "compatibility";
pub const REASON_CURIOUS_PERSONA: &str = "curious-persona";
pub const REASON_SUPPORTIVE_PERSONA: &str = "supportive-persona";
pub const REASON_PLAYFUL_PERSONA: &str = "playful-persona";
pub const REASON_PERSONA_DIRECTNESS: &str = "persona-directness";
pub const REASON_PREFERS_SHORT: &str = "prefers-short";
pub const REASON_TECHNICAL_MATCH: &str = "technical-match";
pub const REASON_POSITIVE_FEEDBACK: &str = "positive-feedback";
pub const REASON_NEGATIVE_FEEDBACK: &str = "negative-feedback";
