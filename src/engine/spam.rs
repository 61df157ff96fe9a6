// Paw Response Engine — Anti-Spam Penalties
//
// Cooldown since the last response, per-sender bursts, and channel
// busyness. Counters are snapshots owned by the caller's rate tracker;
// this module only reads them.

use super::config::DecisionConfig;
use super::score::ScoreCard;
use crate::atoms::constants::*;
use crate::atoms::types::Context;
use chrono::{DateTime, Utc};

pub(crate) fn apply_spam_penalties(
    context: &Context,
    config: &DecisionConfig,
    now: DateTime<Utc>,
    card: &mut ScoreCard,
) {
    if let Some(last) = context.last_response_at {
        let elapsed_ms = (now - last).num_milliseconds();
        if elapsed_ms < i64::try_from(config.cooldown_ms).unwrap_or(i64::MAX) {
            card.apply(PENALTY_COOLDOWN, REASON_COOLDOWN);
        }
    }

    let burst = config.burst_count_threshold;

    if context.recent_sender_burst_count.is_some_and(|n| n >= burst) {
        card.apply(PENALTY_USER_BURST, REASON_USER_BURST);
    }

    // Busy channels never suppress a conversation aimed at the bot.
    if context.is_engaged() {
        return;
    }
    if let Some(channel) = context.recent_channel_burst_count {
        if channel >= burst.saturating_mul(CHANNEL_BUSY_MULTIPLIER) {
            card.apply(PENALTY_CHANNEL_BUSY, REASON_CHANNEL_BUSY);
        } else if channel >= burst {
            card.apply(PENALTY_CHANNEL_ACTIVE, REASON_CHANNEL_ACTIVE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn run(context: &Context) -> ScoreCard {
        let mut card = ScoreCard::new();
        apply_spam_penalties(context, &DecisionConfig::default(), now(), &mut card);
        card
    }

    #[test]
    fn recent_response_triggers_cooldown() {
        let ctx = Context { last_response_at: Some(now() - Duration::seconds(5)), ..Context::opted_in() };
        let card = run(&ctx);
        assert_eq!(card.score(), -30.0);
        assert!(card.has(REASON_COOLDOWN));
    }

    #[test]
    fn cooldown_expires() {
        let ctx = Context { last_response_at: Some(now() - Duration::seconds(30)), ..Context::opted_in() };
        assert!(!run(&ctx).has(REASON_COOLDOWN));
    }

    #[test]
    fn sender_burst_at_threshold() {
        let ctx = Context { recent_sender_burst_count: Some(5), ..Context::opted_in() };
        assert_eq!(run(&ctx).score(), -15.0);
        let calm = Context { recent_sender_burst_count: Some(4), ..Context::opted_in() };
        assert_eq!(run(&calm).score(), 0.0);
    }

    #[test]
    fn channel_active_then_busy() {
        let active = Context { recent_channel_burst_count: Some(5), ..Context::opted_in() };
        let card = run(&active);
        assert_eq!(card.score(), -10.0);
        assert!(card.has(REASON_CHANNEL_ACTIVE));

        let busy = Context { recent_channel_burst_count: Some(10), ..Context::opted_in() };
        let card = run(&busy);
        assert_eq!(card.score(), -20.0);
        assert!(card.has(REASON_CHANNEL_BUSY));
        assert!(!card.has(REASON_CHANNEL_ACTIVE));
    }

    #[test]
    fn channel_busyness_skipped_when_engaged() {
        for ctx in [
            Context { is_direct_message: true, ..Context::opted_in() },
            Context { mentioned_engine: true, ..Context::opted_in() },
            Context { replied_to_engine: true, ..Context::opted_in() },
            Context { is_personal_thread: true, ..Context::opted_in() },
        ] {
            let ctx = Context { recent_channel_burst_count: Some(50), ..ctx };
            assert_eq!(run(&ctx).score(), 0.0);
        }
    }

    #[test]
    fn sender_burst_applies_even_when_addressed() {
        let ctx = Context {
            mentioned_engine: true,
            recent_sender_burst_count: Some(9),
            ..Context::opted_in()
        };
        assert!(run(&ctx).has(REASON_USER_BURST));
    }
}
