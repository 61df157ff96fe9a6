// Paw Response Engine — Decision Config
//
// Engine-level knobs, fixed at construction. Stored by the host app as JSON
// (engine config table) or shipped as a TOML file next to the channel bridges.
// Every field has a default so partial configs load cleanly.

use crate::atoms::constants::*;
use crate::atoms::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionConfig {
    /// Minimum gap between two responses before the cooldown penalty lifts.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Combined user + role + channel mentions tolerated in one message.
    #[serde(default = "default_max_mentions")]
    pub max_mentions_allowed: u32,
    /// Context window of the generation model, in tokens.
    #[serde(default = "default_token_limit")]
    pub model_token_limit: u64,
    /// Score an ambient message must reach to get a response.
    #[serde(default = "default_ambient_threshold")]
    pub ambient_threshold: f64,
    /// Trimmed messages shorter than this (in chars) are penalized when ambient.
    #[serde(default = "default_short_len")]
    pub short_message_min_len: usize,
    /// Sender/channel message count at which burst penalties start.
    #[serde(default = "default_burst_threshold")]
    pub burst_count_threshold: u32,
}

fn default_cooldown_ms() -> u64 { DEFAULT_COOLDOWN_MS }
fn default_max_mentions() -> u32 { DEFAULT_MAX_MENTIONS_ALLOWED }
fn default_token_limit() -> u64 { DEFAULT_MODEL_TOKEN_LIMIT }
fn default_ambient_threshold() -> f64 { DEFAULT_AMBIENT_THRESHOLD }
fn default_short_len() -> usize { DEFAULT_SHORT_MESSAGE_MIN_LEN }
fn default_burst_threshold() -> u32 { DEFAULT_BURST_COUNT_THRESHOLD }

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            max_mentions_allowed: DEFAULT_MAX_MENTIONS_ALLOWED,
            model_token_limit: DEFAULT_MODEL_TOKEN_LIMIT,
            ambient_threshold: DEFAULT_AMBIENT_THRESHOLD,
            short_message_min_len: DEFAULT_SHORT_MESSAGE_MIN_LEN,
            burst_count_threshold: DEFAULT_BURST_COUNT_THRESHOLD,
        }
    }
}

// ── Parsing ────────────────────────────────────────────────────────────────

impl DecisionConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: DecisionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML config file body.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: DecisionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    // ── Validation ─────────────────────────────────────────────────────────

    /// Reject configs the scoring stages cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.model_token_limit == 0 {
            return Err(EngineError::config("model_token_limit must be greater than 0"));
        }
        if self.burst_count_threshold == 0 {
            return Err(EngineError::config(
                "burst_count_threshold must be greater than 0 (every message would count as a burst)",
            ));
        }
        if !self.ambient_threshold.is_finite() || self.ambient_threshold < 0.0 {
            return Err(EngineError::config(format!(
                "ambient_threshold must be a finite non-negative number, got {}",
                self.ambient_threshold
            )));
        }
        Ok(())
    }

    /// Token estimate above which a message is deferred.
    pub(crate) fn defer_token_cutoff(&self) -> f64 {
        self.model_token_limit as f64 * DEFER_LIMIT_FRACTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DecisionConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = DecisionConfig::from_json_str(r#"{"ambient_threshold": 30}"#).unwrap();
        assert_eq!(cfg.ambient_threshold, 30.0);
        assert_eq!(cfg.cooldown_ms, DEFAULT_COOLDOWN_MS);
        assert_eq!(cfg.model_token_limit, DEFAULT_MODEL_TOKEN_LIMIT);
    }

    #[test]
    fn toml_config_loads() {
        let cfg = DecisionConfig::from_toml_str(
            "cooldown_ms = 5000\nmax_mentions_allowed = 3\nmodel_token_limit = 4096\n",
        )
        .unwrap();
        assert_eq!(cfg.cooldown_ms, 5000);
        assert_eq!(cfg.max_mentions_allowed, 3);
        assert_eq!(cfg.model_token_limit, 4096);
        assert_eq!(cfg.burst_count_threshold, DEFAULT_BURST_COUNT_THRESHOLD);
    }

    #[test]
    fn zero_token_limit_rejected() {
        let err = DecisionConfig::from_json_str(r#"{"model_token_limit": 0}"#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn zero_burst_threshold_rejected() {
        let cfg = DecisionConfig { burst_count_threshold: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_threshold_rejected() {
        let cfg = DecisionConfig { ambient_threshold: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = DecisionConfig::from_toml_str("cooldown_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, EngineError::Toml(_)));
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let cfg = DecisionConfig { cooldown_ms: 1234, ..Default::default() };
        let back = DecisionConfig::from_json_str(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
