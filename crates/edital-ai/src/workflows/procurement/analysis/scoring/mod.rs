mod policy;
mod rules;
mod weights;

pub use policy::{BidDecision, DecisiveFactor, FactorPolarity, ParticipationCall};
pub use weights::{ScoreWeights, WeightError};

use super::domain::{BidNotice, CompanyProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The six viability dimensions, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Financial,
    Technical,
    Documentary,
    Timeline,
    Risk,
    Competition,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 6] = [
        ScoreKind::Financial,
        ScoreKind::Technical,
        ScoreKind::Documentary,
        ScoreKind::Timeline,
        ScoreKind::Risk,
        ScoreKind::Competition,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoreKind::Financial => "financial",
            ScoreKind::Technical => "technical",
            ScoreKind::Documentary => "documentary",
            ScoreKind::Timeline => "timeline",
            ScoreKind::Risk => "risk",
            ScoreKind::Competition => "competition",
        }
    }
}

/// Fixed-field score record. Every sub-score and the weighted aggregate
/// live in [0,100]; a misspelled dimension is a compile error, not a
/// silently missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub financial: u8,
    pub technical: u8,
    pub documentary: u8,
    pub timeline: u8,
    pub risk: u8,
    pub competition: u8,
    #[serde(rename = "final")]
    pub overall: u8,
}

impl ScoreSet {
    pub fn get(&self, kind: ScoreKind) -> u8 {
        match kind {
            ScoreKind::Financial => self.financial,
            ScoreKind::Technical => self.technical,
            ScoreKind::Documentary => self.documentary,
            ScoreKind::Timeline => self.timeline,
            ScoreKind::Risk => self.risk,
            ScoreKind::Competition => self.competition,
        }
    }

    pub fn by_kind(&self) -> [(ScoreKind, u8); 6] {
        ScoreKind::ALL.map(|kind| (kind, self.get(kind)))
    }
}

/// Score a notice against a company profile. Pure: same inputs, same
/// scores, no I/O.
pub(crate) fn score_notice(
    notice: &BidNotice,
    company: &CompanyProfile,
    today: NaiveDate,
    weights: &ScoreWeights,
) -> ScoreSet {
    let financial = rules::financial_score(notice, company);
    let technical = rules::technical_score(notice, company);
    let documentary = rules::documentary_score(notice, company);
    let timeline = rules::timeline_score(notice, today);
    let risk = rules::risk_score(notice, today);
    let competition = rules::competition_score(notice, company, today);

    let overall = weights.weigh([
        financial,
        technical,
        documentary,
        timeline,
        risk,
        competition,
    ]);

    ScoreSet {
        financial,
        technical,
        documentary,
        timeline,
        risk,
        competition,
        overall,
    }
}

pub(crate) use policy::decide;
