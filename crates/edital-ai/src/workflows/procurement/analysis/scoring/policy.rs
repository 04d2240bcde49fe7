use super::{ScoreKind, ScoreSet};
use serde::{Deserialize, Serialize};

const PARTICIPATE_FLOOR: u8 = 75;
const REVIEW_FLOOR: u8 = 60;
const POSITIVE_FACTOR_FLOOR: u8 = 80;
const NEGATIVE_FACTOR_CEILING: u8 = 40;

/// Go / hold / no-go call for a scored notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationCall {
    Participate,
    AnalyzeFurther,
    Decline,
}

impl ParticipationCall {
    pub const fn label(self) -> &'static str {
        match self {
            ParticipationCall::Participate => "participate",
            ParticipationCall::AnalyzeFurther => "analyze_further",
            ParticipationCall::Decline => "decline",
        }
    }
}

/// Whether a dimension pushed the call up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorPolarity {
    Positive,
    Negative,
}

/// A dimension that dominated the call, kept for audit trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisiveFactor {
    pub kind: ScoreKind,
    pub polarity: FactorPolarity,
    pub score: u8,
}

/// Outcome of the decision policy: the call, how confident the engine is
/// in it, and the factors that drove it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidDecision {
    pub call: ParticipationCall,
    pub confidence: u8,
    pub justification: String,
    pub decisive_factors: Vec<DecisiveFactor>,
}

fn decisive_factors(scores: &ScoreSet) -> Vec<DecisiveFactor> {
    let mut positives: Vec<DecisiveFactor> = scores
        .by_kind()
        .into_iter()
        .filter(|(_, score)| *score >= POSITIVE_FACTOR_FLOOR)
        .map(|(kind, score)| DecisiveFactor {
            kind,
            polarity: FactorPolarity::Positive,
            score,
        })
        .collect();
    positives.sort_by(|a, b| b.score.cmp(&a.score));

    let mut negatives: Vec<DecisiveFactor> = scores
        .by_kind()
        .into_iter()
        .filter(|(_, score)| *score <= NEGATIVE_FACTOR_CEILING)
        .map(|(kind, score)| DecisiveFactor {
            kind,
            polarity: FactorPolarity::Negative,
            score,
        })
        .collect();
    negatives.sort_by(|a, b| a.score.cmp(&b.score));

    positives.extend(negatives);
    positives
}

fn factor_names(factors: &[DecisiveFactor], polarity: FactorPolarity) -> String {
    factors
        .iter()
        .filter(|factor| factor.polarity == polarity)
        .map(|factor| factor.kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map an aggregate score onto a terminal call with a confidence value.
pub(crate) fn decide(scores: &ScoreSet) -> BidDecision {
    let overall = scores.overall;
    let factors = decisive_factors(scores);

    let (call, raw_confidence) = if overall >= PARTICIPATE_FLOOR {
        let confidence = 60 + u32::from(overall - PARTICIPATE_FLOOR);
        (ParticipationCall::Participate, confidence.min(95))
    } else if overall >= REVIEW_FLOOR {
        (
            ParticipationCall::AnalyzeFurther,
            40 + u32::from(overall - REVIEW_FLOOR),
        )
    } else {
        (
            ParticipationCall::Decline,
            (60 + u32::from(REVIEW_FLOOR - overall)).min(100),
        )
    };

    let negative_count = factors
        .iter()
        .filter(|factor| factor.polarity == FactorPolarity::Negative)
        .count();
    let confidence = if negative_count > 2 {
        raw_confidence.saturating_sub(20).max(30) as u8
    } else {
        raw_confidence as u8
    };

    let strengths = factor_names(&factors, FactorPolarity::Positive);
    let weaknesses = factor_names(&factors, FactorPolarity::Negative);

    let justification = match call {
        ParticipationCall::Participate => {
            if strengths.is_empty() {
                format!("overall score {overall} clears the participation threshold")
            } else {
                format!(
                    "overall score {overall} clears the participation threshold; strongest factors: {strengths}"
                )
            }
        }
        ParticipationCall::AnalyzeFurther => {
            if weaknesses.is_empty() {
                format!("overall score {overall} sits in the review band; revisit before committing")
            } else {
                format!(
                    "overall score {overall} sits in the review band; weak factors to resolve: {weaknesses}"
                )
            }
        }
        ParticipationCall::Decline => {
            if weaknesses.is_empty() {
                format!("overall score {overall} falls below the viability floor")
            } else {
                format!(
                    "overall score {overall} falls below the viability floor; dragged down by: {weaknesses}"
                )
            }
        }
    };

    BidDecision {
        call,
        confidence,
        justification,
        decisive_factors: factors,
    }
}
