use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AnalysisId, BidId, CompanyId};
use super::recommendation::StrategicRecommendation;
use super::scoring::{BidDecision, ScoreSet};
use super::BidAnalysis;

/// Scores as they cross the persistence boundary. Records written by the
/// engine carry the weighted aggregate; records assembled from partial
/// sources (e.g. a narrative-only import) may omit it, in which case the
/// aggregate is derived as the rounded average of the non-zero sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScores {
    pub financial: u8,
    pub technical: u8,
    pub documentary: u8,
    pub timeline: u8,
    pub risk: u8,
    pub competition: u8,
    #[serde(rename = "final", default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<u8>,
}

impl StoredScores {
    pub fn resolve(&self) -> ScoreSet {
        let overall = self.overall.unwrap_or_else(|| {
            let non_zero: Vec<u32> = [
                self.financial,
                self.technical,
                self.documentary,
                self.timeline,
                self.risk,
                self.competition,
            ]
            .into_iter()
            .filter(|score| *score > 0)
            .map(u32::from)
            .collect();

            if non_zero.is_empty() {
                0
            } else {
                let sum: u32 = non_zero.iter().sum();
                ((sum as f64) / (non_zero.len() as f64)).round() as u8
            }
        });

        ScoreSet {
            financial: self.financial,
            technical: self.technical,
            documentary: self.documentary,
            timeline: self.timeline,
            risk: self.risk,
            competition: self.competition,
            overall,
        }
    }
}

impl From<ScoreSet> for StoredScores {
    fn from(scores: ScoreSet) -> Self {
        Self {
            financial: scores.financial,
            technical: scores.technical,
            documentary: scores.documentary,
            timeline: scores.timeline,
            risk: scores.risk,
            competition: scores.competition,
            overall: Some(scores.overall),
        }
    }
}

/// Persistence record for one completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub analysis_id: AnalysisId,
    pub bid_id: BidId,
    pub company_id: CompanyId,
    pub scores: StoredScores,
    pub decision: BidDecision,
    pub recommendation: StrategicRecommendation,
    pub analyzed_on: NaiveDate,
}

impl AnalysisRecord {
    pub fn from_analysis(
        analysis_id: AnalysisId,
        bid_id: BidId,
        company_id: CompanyId,
        analysis: BidAnalysis,
        analyzed_on: NaiveDate,
    ) -> Self {
        Self {
            analysis_id,
            bid_id,
            company_id,
            scores: StoredScores::from(analysis.scores),
            decision: analysis.decision,
            recommendation: analysis.recommendation,
            analyzed_on,
        }
    }

    pub fn overall_score(&self) -> u8 {
        self.scores.resolve().overall
    }

    pub fn status_view(&self) -> AnalysisStatusView {
        AnalysisStatusView {
            analysis_id: self.analysis_id.clone(),
            bid_id: self.bid_id.clone(),
            company_id: self.company_id.clone(),
            call: self.decision.call.label(),
            confidence: self.decision.confidence,
            overall_score: self.overall_score(),
            priority: self.recommendation.priority.label(),
            justification: self.decision.justification.clone(),
        }
    }
}

/// Compact representation of an analysis for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStatusView {
    pub analysis_id: AnalysisId,
    pub bid_id: BidId,
    pub company_id: CompanyId,
    pub call: &'static str,
    pub confidence: u8,
    pub overall_score: u8,
    pub priority: &'static str,
    pub justification: String,
}

/// Read-only access to notices and company profiles, owned by external
/// collaborators.
pub trait ProcurementDirectory: Send + Sync {
    fn fetch_bid(&self, id: &BidId) -> Result<Option<super::domain::BidNotice>, DirectoryError>;
    fn fetch_company(
        &self,
        id: &CompanyId,
    ) -> Result<Option<super::domain::CompanyProfile>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Write-side storage for analysis records. `insert` is idempotent per
/// analysis id: storing the same id again returns the record already held.
pub trait AnalysisStore: Send + Sync {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, StoreError>;
    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, StoreError>;
    fn recent(&self, limit: usize) -> Result<Vec<AnalysisRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("analysis store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook fired when an analysis lands on a participate call.
pub trait DecisionNotifier: Send + Sync {
    fn publish(&self, alert: AnalysisAlert) -> Result<(), NotifyError>;
}

/// Alert payload so routes and tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisAlert {
    pub template: String,
    pub analysis_id: AnalysisId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
