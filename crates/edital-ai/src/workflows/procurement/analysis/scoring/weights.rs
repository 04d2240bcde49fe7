use serde::{Deserialize, Serialize};

const SUM_TOLERANCE: f64 = 1e-9;

/// Relative importance of each viability dimension. The vector must sum to
/// exactly 1.0; a skewed vector is rejected at construction, never
/// renormalized, so a configuration typo cannot silently reshape scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub financial: f64,
    pub technical: f64,
    pub documentary: f64,
    pub timeline: f64,
    pub risk: f64,
    pub competition: f64,
}

impl ScoreWeights {
    pub fn new(
        financial: f64,
        technical: f64,
        documentary: f64,
        timeline: f64,
        risk: f64,
        competition: f64,
    ) -> Result<Self, WeightError> {
        let weights = Self {
            financial,
            technical,
            documentary,
            timeline,
            risk,
            competition,
        };

        if weights.as_array().iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(WeightError::OutOfRange);
        }

        let sum: f64 = weights.as_array().iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightError::BadSum { sum });
        }

        Ok(weights)
    }

    /// Weighted aggregate of the six sub-scores, rounded to the nearest
    /// integer. Canonical order: financial, technical, documentary,
    /// timeline, risk, competition.
    pub fn weigh(&self, scores: [u8; 6]) -> u8 {
        let total: f64 = self
            .as_array()
            .iter()
            .zip(scores)
            .map(|(weight, score)| weight * f64::from(score))
            .sum();

        total.round().clamp(0.0, 100.0) as u8
    }

    fn as_array(&self) -> [f64; 6] {
        [
            self.financial,
            self.technical,
            self.documentary,
            self.timeline,
            self.risk,
            self.competition,
        ]
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            financial: 0.25,
            technical: 0.20,
            documentary: 0.15,
            timeline: 0.15,
            risk: 0.15,
            competition: 0.10,
        }
    }
}

/// Raised when a weight vector cannot back an analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("score weights must sum to 1.0, got {sum}")]
    BadSum { sum: f64 },
    #[error("score weights must be finite and non-negative")]
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vector_sums_to_one() {
        let weights = ScoreWeights::default();
        let sum: f64 = [
            weights.financial,
            weights.technical,
            weights.documentary,
            weights.timeline,
            weights.risk,
            weights.competition,
        ]
        .iter()
        .sum();
        assert!((sum - 1.0).abs() <= SUM_TOLERANCE);
    }

    #[test]
    fn rejects_vector_that_does_not_sum_to_one() {
        let result = ScoreWeights::new(0.5, 0.2, 0.1, 0.1, 0.1, 0.1);
        assert!(matches!(result, Err(WeightError::BadSum { .. })));
    }

    #[test]
    fn rejects_negative_weight() {
        let result = ScoreWeights::new(0.5, 0.5, 0.2, -0.1, 0.0, -0.1);
        assert!(matches!(result, Err(WeightError::OutOfRange)));
    }

    #[test]
    fn weighs_with_default_vector() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.weigh([100, 100, 100, 100, 100, 100]), 100);
        assert_eq!(weights.weigh([0, 0, 0, 0, 0, 0]), 0);
        // 80*.25 + 70*.20 + 60*.15 + 50*.15 + 90*.15 + 40*.10 = 68.0
        assert_eq!(weights.weigh([80, 70, 60, 50, 90, 40]), 68);
    }
}
