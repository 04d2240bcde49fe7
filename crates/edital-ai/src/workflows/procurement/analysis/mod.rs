//! Viability analysis for procurement notices: scoring, the
//! participation decision, and the strategic recommendation derived from
//! both, plus the intake, storage, and routing scaffolding around them.

pub mod domain;
pub mod intake;
pub(crate) mod recommendation;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use domain::{
    AnalysisId, BidId, BidNotice, CompanyId, CompanyProfile, CompanySize, ContractingAgency,
    DocumentCategory, GovernmentSphere, JudgingCriterion, Modality, QualificationRequirements,
    RequiredDocument, TaxRegime,
};
pub use intake::{
    AgencyDraft, BidNoticeDraft, CompanyProfileDraft, DocumentDraft, IntakeError, NoticeIntake,
};
pub use recommendation::{
    ActionPlan, CostBreakdown, Milestone, PartnerType, PartnershipPlan, PricingApproach,
    PricingStrategy, PriorityBand, ProposalActivity, RoiProjection, StrategicRecommendation,
    Strategy,
};
pub use repository::{
    AnalysisAlert, AnalysisRecord, AnalysisStatusView, AnalysisStore, DecisionNotifier,
    DirectoryError, NotifyError, ProcurementDirectory, StoreError, StoredScores,
};
pub use router::{analysis_router, AnalysisRequest};
pub use scoring::{
    BidDecision, DecisiveFactor, FactorPolarity, ParticipationCall, ScoreKind, ScoreSet,
    ScoreWeights, WeightError,
};
pub use service::{AnalysisServiceError, BidAnalysisService};

/// Stateless analyzer: scores a notice, decides on participation, and
/// derives the strategic recommendation. One call per evaluation; the
/// same inputs always produce the same analysis.
pub struct BidAnalyzer {
    weights: ScoreWeights,
}

impl BidAnalyzer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn analyze(
        &self,
        notice: &BidNotice,
        company: &CompanyProfile,
        today: NaiveDate,
    ) -> BidAnalysis {
        let scores = scoring::score_notice(notice, company, today, &self.weights);
        let decision = scoring::decide(&scores);
        let recommendation = recommendation::compose(notice, company, &scores, &decision, today);

        BidAnalysis {
            scores,
            decision,
            recommendation,
        }
    }
}

/// Complete output of one evaluation: the score record, the call, and
/// the strategy built on top of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidAnalysis {
    pub scores: ScoreSet,
    pub decision: BidDecision,
    pub recommendation: StrategicRecommendation,
}
