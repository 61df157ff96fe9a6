// ── OpenPawz Response Engine ───────────────────────────────────────────────
// Decides, for each inbound channel message, whether the agent should answer,
// how confident that call is, which processing strategy to use, and why.
//
// Layering follows the rest of OpenPawz:
//   atoms/   pure constants, errors, data types
//   engine/  the decision pipeline and its stages

pub mod atoms;
pub mod engine;

pub use atoms::error::{EngineError, EngineResult};
pub use atoms::types::{
    CommunicationStyle, Context, Decision, Event, InteractionPattern, Mood, Persona,
    PersonalitySignals, PreferredLength, Strategy,
};
pub use engine::config::DecisionConfig;
pub use engine::decision::DecisionEngine;
pub use engine::tokenizer::{HeuristicEstimator, TokenEstimator};
