// Paw Response Engine — Decision Engine
//
// The hot-path admission filter every channel bridge calls before routing a
// message to the agent loop. One call = one pass through the stages below;
// nothing is remembered between calls.
//
//   1. opt-in gate
//   2. token estimate (custom estimator, heuristic fallback)
//   3. anti-abuse pre-check
//   4. direct-address bonuses
//   5. content heuristics
//   6. personality score adjustment
//   7. short-message penalty
//   8. cooldown / burst penalties
//   9. strategy: token buckets → personality overrides → defer cutoff
//  10. thresholding + confidence

use super::config::DecisionConfig;
use super::heuristics::{self, ContentProfile};
use super::personality::{self, ResolvedPersonality};
use super::score::ScoreCard;
use super::tokenizer::{estimate_or_fallback, TokenEstimator};
use super::{abuse, spam, strategy};
use crate::atoms::constants::*;
use crate::atoms::error::EngineResult;
use crate::atoms::types::{Context, Decision, Event, Strategy};
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

/// Stateless response decision engine. Cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct DecisionEngine {
    config: DecisionConfig,
    estimator: Option<Arc<dyn TokenEstimator>>,
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("config", &self.config)
            .field("estimator", &self.estimator.as_ref().map(|e| e.name().to_string()))
            .finish()
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self { config: DecisionConfig::default(), estimator: None }
    }
}

impl DecisionEngine {
    /// Build an engine from a validated config.
    pub fn new(config: DecisionConfig) -> EngineResult<Self> {
        config.validate()?;
        info!(
            "[respond] Decision engine ready (threshold={}, token_limit={}, cooldown={}ms)",
            config.ambient_threshold, config.model_token_limit, config.cooldown_ms
        );
        Ok(Self { config, estimator: None })
    }

    /// Replace the default chars/4 heuristic with a custom estimator.
    pub fn with_estimator(mut self, estimator: impl TokenEstimator + 'static) -> Self {
        self.estimator = Some(Arc::new(estimator));
        self
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Decide whether and how to respond. Total: never panics on malformed
    /// optional input and always returns a well-formed decision.
    pub fn evaluate(&self, event: &Event, context: &Context) -> Decision {
        let cfg = &self.config;

        if !context.opted_in {
            debug!("[respond] Skipping event from opted-out user");
            return Decision {
                should_respond: false,
                reason_trail: vec![REASON_OPTED_OUT.to_string()],
                confidence: 0.0,
                token_estimate: 0,
                strategy: Strategy::Ignore,
                score: 0.0,
                threshold: cfg.ambient_threshold,
            };
        }

        let personality = personality::resolve(context.personality.as_ref());
        let token_estimate = estimate_or_fallback(self.estimator.as_deref(), event);
        let content = heuristics::analyze(&event.content);
        let addressed = context.is_directly_addressed();
        let mut card = ScoreCard::new();

        let abusive = abuse::apply_abuse_precheck(event, cfg, &mut card);
        apply_address_bonuses(context, &mut card);
        apply_content_bonuses(&content, &mut card);

        if let Some(p) = &personality {
            p.adjust_score(&content, addressed, &mut card);
        }

        if !addressed && content.trimmed_len < cfg.short_message_min_len {
            card.apply(PENALTY_TOO_SHORT, REASON_TOO_SHORT);
        }

        let now = context.now.unwrap_or_else(Utc::now);
        spam::apply_spam_penalties(context, cfg, now, &mut card);

        let mut selected = strategy::base_strategy(token_estimate, cfg);
        if let Some(p) = &personality {
            let overridden = p.override_strategy(selected, token_estimate, cfg.model_token_limit, &content);
            if overridden != selected {
                card.note(format!("persona-{}", overridden));
                selected = overridden;
            }
        }
        if strategy::exceeds_budget(token_estimate, cfg) {
            card.note(REASON_TOKEN_BUDGET);
            selected = Strategy::Defer;
        }

        let score = card.score();
        let verdict = if addressed {
            direct_verdict(score, abusive, personality.as_ref(), cfg, &mut card)
        } else {
            ambient_verdict(score, personality.as_ref(), cfg, &mut card)
        };

        if !verdict.should_respond {
            selected = Strategy::Ignore;
        }

        let decision = Decision {
            should_respond: verdict.should_respond,
            reason_trail: card.into_reasons(),
            confidence: clamp01(verdict.confidence),
            token_estimate,
            strategy: selected,
            score,
            threshold: verdict.threshold,
        };

        debug!(
            "[respond] respond={} strategy={} score={:.1} threshold={:.1} confidence={:.2} tokens={} reasons={:?}",
            decision.should_respond,
            decision.strategy,
            decision.score,
            decision.threshold,
            decision.confidence,
            decision.token_estimate,
            decision.reason_trail
        );

        decision
    }
}

// ── Scoring stages ─────────────────────────────────────────────────────

fn apply_address_bonuses(context: &Context, card: &mut ScoreCard) {
    if context.is_direct_message {
        card.apply(BONUS_DIRECT_MESSAGE, REASON_DIRECT_MESSAGE);
    }
    if context.mentioned_engine {
        card.apply(BONUS_MENTIONED, REASON_MENTIONED);
    }
    if context.replied_to_engine {
        card.apply(BONUS_REPLY, REASON_REPLY);
    }
    if context.is_personal_thread {
        card.apply(BONUS_PERSONAL_THREAD, REASON_PERSONAL_THREAD);
    }
}

fn apply_content_bonuses(content: &ContentProfile, card: &mut ScoreCard) {
    if content.question {
        card.apply(BONUS_QUESTION, REASON_QUESTION);
    }
    if content.code_mention {
        card.apply(BONUS_CODE_MENTION, REASON_CODE_MENTION);
    }
    if content.urgency {
        card.apply(BONUS_URGENCY, REASON_URGENCY);
    }
}

// ── Thresholding ───────────────────────────────────────────────────────

struct Verdict {
    should_respond: bool,
    confidence: f64,
    threshold: f64,
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Confidence contribution of the score relative to a threshold.
fn score_confidence(score: f64, threshold: f64) -> f64 {
    clamp01(AMBIENT_CONFIDENCE_MIDPOINT + (score - threshold) / CONFIDENCE_SCORE_SCALE)
}

/// DM / mention / reply: respond unless the abuse pre-check fired.
fn direct_verdict(
    score: f64,
    abusive: bool,
    personality: Option<&ResolvedPersonality>,
    cfg: &DecisionConfig,
    card: &mut ScoreCard,
) -> Verdict {
    let threshold = cfg.ambient_threshold;
    if abusive {
        card.note(REASON_ABUSE_BLOCK);
        return Verdict { should_respond: false, confidence: 0.0, threshold };
    }

    let base = personality.map_or(DIRECT_BASE_CONFIDENCE, |p| p.direct_base_confidence());
    let confidence = DIRECT_BASE_WEIGHT * base + DIRECT_SCORE_WEIGHT * score_confidence(score, threshold);
    Verdict { should_respond: true, confidence, threshold }
}

/// Everything else: the score has to clear the (possibly adjusted) threshold.
fn ambient_verdict(
    score: f64,
    personality: Option<&ResolvedPersonality>,
    cfg: &DecisionConfig,
    card: &mut ScoreCard,
) -> Verdict {
    let threshold = personality.map_or(cfg.ambient_threshold, |p| p.adjust_threshold(cfg.ambient_threshold));
    let should_respond = score >= threshold;

    let mut confidence = score_confidence(score, threshold);
    if should_respond && personality.is_some_and(|p| p.has_affinity()) {
        confidence = (confidence + AMBIENT_AFFINITY_BOOST).min(1.0);
    }
    if !should_respond {
        card.note(REASON_BELOW_THRESHOLD);
    }

    Verdict { should_respond, confidence, threshold }
}
