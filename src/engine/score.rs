// Paw Response Engine — Score Card
//
// Running score plus the ordered reason trail. Every stage that moves the
// score records why, so the final `Decision` can explain itself.

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ScoreCard {
    score: f64,
    reasons: Vec<String>,
}

impl ScoreCard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Apply a weight and record its reason.
    pub(crate) fn apply(&mut self, delta: f64, reason: impl Into<String>) {
        self.score += delta;
        self.reasons.push(reason.into());
    }

    /// Record a reason that does not move the score (strategy changes,
    /// blocks, threshold misses).
    pub(crate) fn note(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    pub(crate) fn score(&self) -> f64 {
        self.score
    }

    #[cfg(test)]
    pub(crate) fn has(&self, reason: &str) -> bool {
        self.reasons.iter().any(|r| r == reason)
    }

    pub(crate) fn into_reasons(self) -> Vec<String> {
        self.reasons
    }
}
