// Paw Response Engine — Anti-Abuse Pre-Check
//
// Detects mass-mention shapes before any other scoring, regardless of how
// the message addresses the bot. A directly addressed message that trips
// this check is blocked outright in final thresholding.

use super::config::DecisionConfig;
use super::score::ScoreCard;
use crate::atoms::constants::*;
use crate::atoms::types::Event;

/// Apply abuse penalties. Returns true when any abuse shape was found.
/// Missing mention data counts as "no mentions" and never fails the call.
pub(crate) fn apply_abuse_precheck(event: &Event, config: &DecisionConfig, card: &mut ScoreCard) -> bool {
    let mut flagged = false;

    if event.mentions_everyone.unwrap_or(false) {
        card.apply(PENALTY_MENTIONS_EVERYONE, REASON_MENTIONS_EVERYONE);
        flagged = true;
    }

    if let Some(total) = event.total_mentions() {
        if total > u64::from(config.max_mentions_allowed) {
            card.apply(PENALTY_TOO_MANY_MENTIONS, REASON_TOO_MANY_MENTIONS);
            flagged = true;
        }
    }

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(event: &Event) -> (bool, ScoreCard) {
        let mut card = ScoreCard::new();
        let flagged = apply_abuse_precheck(event, &DecisionConfig::default(), &mut card);
        (flagged, card)
    }

    #[test]
    fn clean_event_passes() {
        let (flagged, card) = run(&Event::text("hello"));
        assert!(!flagged);
        assert_eq!(card.score(), 0.0);
    }

    #[test]
    fn everyone_ping_penalized() {
        let ev = Event { mentions_everyone: Some(true), ..Event::text("@everyone look") };
        let (flagged, card) = run(&ev);
        assert!(flagged);
        assert_eq!(card.score(), -40.0);
        assert!(card.has(REASON_MENTIONS_EVERYONE));
    }

    #[test]
    fn mention_limit_is_exclusive() {
        let at_limit = Event {
            mentioned_user_count: Some(3),
            mentioned_role_count: Some(1),
            mentioned_channel_count: Some(1),
            ..Event::text("hi all")
        };
        assert!(!run(&at_limit).0);

        let over = Event { mentioned_channel_count: Some(2), ..at_limit };
        let (flagged, card) = run(&over);
        assert!(flagged);
        assert_eq!(card.score(), -25.0);
        assert!(card.has(REASON_TOO_MANY_MENTIONS));
    }

    #[test]
    fn both_shapes_stack() {
        let ev = Event {
            mentions_everyone: Some(true),
            mentioned_user_count: Some(10),
            ..Event::text("spam")
        };
        assert_eq!(run(&ev).1.score(), -65.0);
    }

    #[test]
    fn missing_mention_data_is_skipped() {
        let ev = Event { content: "hi".into(), ..Default::default() };
        let (flagged, card) = run(&ev);
        assert!(!flagged);
        assert!(card.into_reasons().is_empty());
    }
}
