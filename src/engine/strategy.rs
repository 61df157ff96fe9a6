// Paw Response Engine — Strategy Selection
//
// Token-bucket choice between quick-reply and deep-reason, and the hard
// defer cutoff that protects the generation pipeline from oversized inputs.

use super::config::DecisionConfig;
use crate::atoms::constants::*;
use crate::atoms::types::Strategy;

/// Base strategy from the token estimate alone.
/// Mid-sized messages land in the larger bucket (deep-reason).
pub(crate) fn base_strategy(token_estimate: u64, config: &DecisionConfig) -> Strategy {
    let limit = config.model_token_limit as f64;
    if token_estimate as f64 > limit * DEEP_REASON_LIMIT_FRACTION {
        Strategy::DeepReason
    } else if token_estimate < QUICK_REPLY_MAX_TOKENS {
        Strategy::QuickReply
    } else {
        Strategy::DeepReason
    }
}

/// True when the estimate exceeds 90% of the model limit.
pub(crate) fn exceeds_budget(token_estimate: u64, config: &DecisionConfig) -> bool {
    token_estimate as f64 > config.defer_token_cutoff()
}
