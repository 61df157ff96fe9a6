// Paw Response Engine — Personality Adjustments
//
// Optional relationship / persona / interaction-pattern modifiers. The raw
// `PersonalitySignals` are resolved once into concrete values (clamped to
// [0, 1], with defaults for anything missing), then applied to four places:
//   - the accumulated score
//   - the ambient threshold (non-direct messages only, floored)
//   - the selected strategy (ordered overrides, later rules win)
//   - the confidence of direct-address decisions
//
// Evaluation order matters: several rules pull in opposite directions (a
// highly direct persona forces quick-reply while a strong relationship
// upgrades to deep-reason). The order below is the contract.

use super::heuristics::ContentProfile;
use super::score::ScoreCard;
use crate::atoms::constants::*;
use crate::atoms::types::{CommunicationStyle, Mood, PersonalitySignals, PreferredLength, Strategy};

// ═══════════════════════════════════════════════════════════════════════════
// Resolution
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedPersona {
    pub curiosity: f64,
    pub supportiveness: f64,
    pub playfulness: f64,
    pub directness: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedPersonality {
    pub relationship: f64,
    pub compatibility: f64,
    pub mood: Mood,
    pub persona: Option<ResolvedPersona>,
    pub preferred_length: Option<PreferredLength>,
    pub style: Option<CommunicationStyle>,
    /// Mean of the finite recent feedback scores, if there are any.
    pub feedback_avg: Option<f64>,
}

/// Clamp a [0, 1] signal; missing or non-finite values take the default.
fn unit(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => default,
    }
}

pub(crate) fn resolve(signals: Option<&PersonalitySignals>) -> Option<ResolvedPersonality> {
    let signals = signals?;

    let persona = signals.active_persona.as_ref().map(|p| ResolvedPersona {
        curiosity: unit(p.curiosity, PERSONA_TRAIT_NEUTRAL),
        supportiveness: unit(p.supportiveness, PERSONA_TRAIT_NEUTRAL),
        playfulness: unit(p.playfulness, PERSONA_TRAIT_NEUTRAL),
        directness: unit(p.directness, PERSONA_TRAIT_NEUTRAL),
    });

    let pattern = signals.interaction_pattern.as_ref();
    let feedback_avg = pattern.and_then(|p| {
        let scores: Vec<f64> = p.recent_feedback_scores.iter().copied().filter(|s| s.is_finite()).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    });

    Some(ResolvedPersonality {
        relationship: unit(signals.relationship_strength, 0.0),
        compatibility: unit(signals.compatibility, 0.0),
        mood: signals.mood.unwrap_or_default(),
        persona,
        preferred_length: pattern.and_then(|p| p.preferred_length),
        style: pattern.and_then(|p| p.communication_style),
        feedback_avg,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Adjustments
// ═══════════════════════════════════════════════════════════════════════════

impl ResolvedPersonality {
    fn persona_trait(&self, pick: impl Fn(&ResolvedPersona) -> f64) -> Option<f64> {
        self.persona.as_ref().map(pick)
    }

    fn strong_trait(&self, pick: impl Fn(&ResolvedPersona) -> f64) -> bool {
        self.persona_trait(pick).is_some_and(|v| v > PERSONA_TRAIT_STRONG)
    }

    fn positive_feedback(&self) -> bool {
        self.feedback_avg.is_some_and(|avg| avg >= POSITIVE_FEEDBACK_AVG)
    }

    /// Relationship or compatibility strong enough for the ambient confidence boost.
    pub(crate) fn has_affinity(&self) -> bool {
        self.relationship > AMBIENT_AFFINITY_CUTOFF || self.compatibility > AMBIENT_AFFINITY_CUTOFF
    }

    /// Score modifiers. `addressed` means DM, mention, or reply.
    pub(crate) fn adjust_score(&self, content: &ContentProfile, addressed: bool, card: &mut ScoreCard) {
        if self.relationship > 0.0 {
            card.apply(self.relationship * RELATIONSHIP_SCORE_WEIGHT, REASON_RELATIONSHIP);
        }
        if self.compatibility > 0.0 {
            card.apply(self.compatibility * COMPATIBILITY_SCORE_WEIGHT, REASON_COMPATIBILITY);
        }

        let mood_delta = match self.mood {
            Mood::Neutral => None,
            Mood::Frustrated => Some(MOOD_FRUSTRATED_BONUS),
            Mood::Excited => Some(MOOD_EXCITED_BONUS),
            Mood::Playful => Some(MOOD_PLAYFUL_BONUS),
            Mood::Serious if addressed => Some(MOOD_SERIOUS_ADDRESSED_BONUS),
            Mood::Serious => Some(MOOD_SERIOUS_AMBIENT_PENALTY),
        };
        if let Some(delta) = mood_delta {
            card.apply(delta, format!("mood-{}", self.mood.as_str()));
        }

        if let Some(persona) = &self.persona {
            if persona.curiosity > PERSONA_TRAIT_STRONG && content.question {
                card.apply(CURIOUS_QUESTION_BONUS, REASON_CURIOUS_PERSONA);
            }
            if persona.supportiveness > PERSONA_TRAIT_STRONG && content.help_seeking {
                card.apply(SUPPORTIVE_HELP_BONUS, REASON_SUPPORTIVE_PERSONA);
            }
            if persona.playfulness > PERSONA_TRAIT_STRONG && content.playful {
                card.apply(PLAYFUL_LANGUAGE_BONUS, REASON_PLAYFUL_PERSONA);
            }
            // Direct personas hold back from ambient chatter; reserved ones lean in.
            let directness_delta = -(persona.directness - PERSONA_TRAIT_NEUTRAL) * DIRECTNESS_AMBIENT_SCALE;
            if !addressed && directness_delta != 0.0 {
                card.apply(directness_delta, REASON_PERSONA_DIRECTNESS);
            }
        }

        if self.preferred_length == Some(PreferredLength::Short) && content.trimmed_len < SHORT_CONTENT_MAX_CHARS {
            card.apply(SHORT_PREFERENCE_BONUS, REASON_PREFERS_SHORT);
        }
        if self.style == Some(CommunicationStyle::Technical) && content.technical {
            card.apply(TECHNICAL_MATCH_BONUS, REASON_TECHNICAL_MATCH);
        }
        match self.feedback_avg {
            Some(avg) if avg >= POSITIVE_FEEDBACK_AVG => card.apply(POSITIVE_FEEDBACK_BONUS, REASON_POSITIVE_FEEDBACK),
            Some(avg) if avg <= NEGATIVE_FEEDBACK_AVG => card.apply(NEGATIVE_FEEDBACK_PENALTY, REASON_NEGATIVE_FEEDBACK),
            _ => {}
        }
    }

    /// Ambient threshold for a non-direct message, never below the floor.
    pub(crate) fn adjust_threshold(&self, base: f64) -> f64 {
        let mut threshold = base;
        threshold -= self.relationship * THRESHOLD_RELATIONSHIP_WEIGHT;
        threshold -= self.compatibility * THRESHOLD_COMPATIBILITY_WEIGHT;
        if let Some(persona) = &self.persona {
            threshold -= persona.curiosity * THRESHOLD_CURIOSITY_WEIGHT;
            threshold -= persona.supportiveness * THRESHOLD_SUPPORTIVENESS_WEIGHT;
            threshold += persona.directness * THRESHOLD_DIRECTNESS_WEIGHT;
        }
        if self.mood == Mood::Serious {
            threshold += THRESHOLD_SERIOUS_RAISE;
        }
        threshold.max(AMBIENT_THRESHOLD_FLOOR)
    }

    /// Ordered strategy overrides. Each rule sees the result of the previous one.
    pub(crate) fn override_strategy(
        &self,
        current: Strategy,
        token_estimate: u64,
        model_token_limit: u64,
        content: &ContentProfile,
    ) -> Strategy {
        let mut strategy = current;

        if self.preferred_length == Some(PreferredLength::Detailed) && token_estimate > DETAILED_PREFERENCE_MIN_TOKENS {
            strategy = Strategy::DeepReason;
        }
        if self.preferred_length == Some(PreferredLength::Short)
            && (token_estimate as f64) < model_token_limit as f64 * SHORT_PREFERENCE_LIMIT_FRACTION
        {
            strategy = Strategy::QuickReply;
        }
        if self.style == Some(CommunicationStyle::Technical) && content.technical_complexity {
            strategy = Strategy::DeepReason;
        }
        if self.strong_trait(|p| p.curiosity) && content.question {
            strategy = Strategy::DeepReason;
        }
        if self.persona_trait(|p| p.directness).is_some_and(|d| d > HIGH_DIRECTNESS)
            && token_estimate < DIRECT_PERSONA_MAX_TOKENS
        {
            strategy = Strategy::QuickReply;
        }
        if self.strong_trait(|p| p.supportiveness) && content.help_seeking {
            strategy = Strategy::DeepReason;
        }
        if self.relationship > STRONG_RELATIONSHIP
            && strategy == Strategy::QuickReply
            && content.trimmed_len >= NON_TRIVIAL_CONTENT_MIN_CHARS
            && !content.greeting
        {
            strategy = Strategy::DeepReason;
        }

        strategy
    }

    /// Base confidence for a direct-address decision before blending with
    /// the score term.
    pub(crate) fn direct_base_confidence(&self) -> f64 {
        let mut base = DIRECT_BASE_CONFIDENCE;
        if self.relationship > CONFIDENCE_AFFINITY_CUTOFF {
            base += CONFIDENCE_RELATIONSHIP_BOOST;
        }
        if self.compatibility > CONFIDENCE_AFFINITY_CUTOFF {
            base += CONFIDENCE_COMPATIBILITY_BOOST;
        }
        if self.positive_feedback() {
            base += CONFIDENCE_FEEDBACK_BOOST;
        }
        base
    }
}
