// Paw Response Engine — module root
//
// Stage modules are crate-private; the public surface is the engine, its
// config, the estimator trait and the platform adapters.

pub mod config;
pub mod decision;
pub mod heuristics;
pub mod platform;
pub mod tokenizer;

mod abuse;
mod personality;
mod score;
mod spam;
mod strategy;
