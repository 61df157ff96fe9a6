// ── Paw Response Engine: Token Estimation ──────────────────────────────────
//
// Single source of truth for the decision engine's token estimate.
//
// Strategy:
//   1. Default heuristic: ceil(chars / 4) + 256 per attachment.
//   2. Callers may inject their own `TokenEstimator` (exact tokenizer,
//      provider-specific ratios, ...).
//   3. A custom estimator that errors or panics is replaced by the default
//      heuristic for that call. Estimator failures never reach the caller.

use crate::atoms::constants::{CHARS_PER_TOKEN, TOKENS_PER_ATTACHMENT};
use crate::atoms::error::EngineResult;
use crate::atoms::types::Event;
use log::warn;
use std::panic::{self, AssertUnwindSafe};

/// Pluggable token estimation strategy.
pub trait TokenEstimator: Send + Sync {
    /// Short label used in log lines when the estimator fails.
    fn name(&self) -> &str {
        "custom"
    }

    fn estimate(&self, event: &Event) -> EngineResult<u64>;
}

/// The built-in chars/4 heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEstimator;

impl TokenEstimator for HeuristicEstimator {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn estimate(&self, event: &Event) -> EngineResult<u64> {
        Ok(heuristic_tokens(event))
    }
}

/// Plain closures work as estimators.
impl<F> TokenEstimator for F
where
    F: Fn(&Event) -> EngineResult<u64> + Send + Sync,
{
    fn estimate(&self, event: &Event) -> EngineResult<u64> {
        self(event)
    }
}

/// Default estimate. Counts chars, not bytes, so CJK/emoji text is not
/// overcounted.
pub fn heuristic_tokens(event: &Event) -> u64 {
    let chars = event.content.chars().count() as u64;
    chars
        .div_ceil(CHARS_PER_TOKEN)
        .saturating_add(u64::from(event.attachment_count).saturating_mul(TOKENS_PER_ATTACHMENT))
}

/// Run the injected estimator, falling back to the heuristic on any failure.
pub(crate) fn estimate_or_fallback(custom: Option<&dyn TokenEstimator>, event: &Event) -> u64 {
    let Some(estimator) = custom else {
        return heuristic_tokens(event);
    };

    match panic::catch_unwind(AssertUnwindSafe(|| estimator.estimate(event))) {
        Ok(Ok(tokens)) => tokens,
        Ok(Err(e)) => {
            warn!("[respond] Token estimator '{}' failed: {} — using heuristic", estimator.name(), e);
            heuristic_tokens(event)
        }
        Err(_) => {
            warn!("[respond] Token estimator '{}' panicked — using heuristic", estimator.name());
            heuristic_tokens(event)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::error::EngineError;

    #[test]
    fn heuristic_rounds_up() {
        assert_eq!(heuristic_tokens(&Event::text("")), 0);
        assert_eq!(heuristic_tokens(&Event::text("a")), 1);
        assert_eq!(heuristic_tokens(&Event::text("abcd")), 1);
        assert_eq!(heuristic_tokens(&Event::text("abcde")), 2);
    }

    #[test]
    fn attachments_add_fixed_cost() {
        let ev = Event { attachment_count: 2, ..Event::text("abcdefgh") };
        assert_eq!(heuristic_tokens(&ev), 2 + 512);
    }

    #[test]
    fn unicode_counted_by_char() {
        // 4 chars, 12 bytes
        assert_eq!(heuristic_tokens(&Event::text("你好世界")), 1);
    }

    #[test]
    fn custom_estimator_is_used() {
        let fixed = |_: &Event| -> EngineResult<u64> { Ok(42) };
        assert_eq!(estimate_or_fallback(Some(&fixed), &Event::text("hello")), 42);
    }

    #[test]
    fn failing_estimator_falls_back() {
        let broken = |_: &Event| -> EngineResult<u64> { Err(EngineError::estimator("test", "no vocab")) };
        assert_eq!(estimate_or_fallback(Some(&broken), &Event::text("abcdefgh")), 2);
    }

    #[test]
    fn panicking_estimator_falls_back() {
        let panicky = |_: &Event| -> EngineResult<u64> { panic!("estimator exploded") };
        assert_eq!(estimate_or_fallback(Some(&panicky), &Event::text("abcdefgh")), 2);
    }

    #[test]
    fn no_estimator_uses_heuristic() {
        assert_eq!(estimate_or_fallback(None, &Event::text("abcdefghi")), 3);
        assert_eq!(HeuristicEstimator.estimate(&Event::text("abc")).unwrap(), 1);
    }
}
