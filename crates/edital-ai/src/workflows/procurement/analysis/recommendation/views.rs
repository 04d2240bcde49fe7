use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Participation strategy picked from the dominant viability dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    PriceCompetitiveness,
    TechnicalDifferentiation,
    ExemplaryCompliance,
    DeliveryAgility,
    UniquePositioning,
    Balanced,
}

impl Strategy {
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::PriceCompetitiveness => "price competitiveness",
            Strategy::TechnicalDifferentiation => "technical differentiation",
            Strategy::ExemplaryCompliance => "exemplary compliance",
            Strategy::DeliveryAgility => "delivery agility",
            Strategy::UniquePositioning => "unique positioning",
            Strategy::Balanced => "balanced",
        }
    }
}

/// Actions grouped by when they should happen relative to the decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub immediate: Vec<String>,
    pub preparation: Vec<String>,
    pub post_decision: Vec<String>,
}

/// How hard to push on price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingApproach {
    Aggressive,
    Competitive,
    Conservative,
}

/// Margin and suggested bid price derived from the competitive picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingStrategy {
    pub approach: PricingApproach,
    pub margin_percent: f64,
    pub suggested_price: f64,
}

/// Partner profile worth lining up before the opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerType {
    Technical,
    Financial,
    LegalAdvisory,
    Consortium,
}

/// Whether and how to bring partners into the proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipPlan {
    pub required: bool,
    pub partner_types: Vec<PartnerType>,
    pub selection_criteria: Vec<String>,
}

/// The five proposal-preparation activities, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalActivity {
    EditalAnalysis,
    Documentation,
    TechnicalProposal,
    FinancialProposal,
    FinalReview,
}

impl ProposalActivity {
    pub const ALL: [ProposalActivity; 5] = [
        ProposalActivity::EditalAnalysis,
        ProposalActivity::Documentation,
        ProposalActivity::TechnicalProposal,
        ProposalActivity::FinancialProposal,
        ProposalActivity::FinalReview,
    ];

    /// Share of the runway until the opening assigned to this activity.
    pub const fn proportion(self) -> f64 {
        match self {
            ProposalActivity::EditalAnalysis => 0.10,
            ProposalActivity::Documentation => 0.30,
            ProposalActivity::TechnicalProposal => 0.40,
            ProposalActivity::FinancialProposal => 0.10,
            ProposalActivity::FinalReview => 0.10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProposalActivity::EditalAnalysis => "edital analysis",
            ProposalActivity::Documentation => "documentation",
            ProposalActivity::TechnicalProposal => "technical proposal",
            ProposalActivity::FinancialProposal => "financial proposal",
            ProposalActivity::FinalReview => "final review",
        }
    }
}

/// One scheduled slice of the preparation runway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub activity: ProposalActivity,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub duration_days: u32,
}

/// Return projection for the contract at the suggested cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiProjection {
    pub roi_percent: f64,
    pub absolute_return: f64,
    pub payback_months: u32,
    pub cost_breakdown: CostBreakdown,
}

/// Estimated cost split used for the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub direct: f64,
    pub overhead: f64,
    pub taxes: f64,
}

/// Where this notice should sit in the company's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }
}

/// Everything the strategy layer derives on top of the scores and the
/// participation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicRecommendation {
    pub strategy: Strategy,
    pub competitive_advantages: Vec<String>,
    pub action_plan: ActionPlan,
    pub pricing: PricingStrategy,
    pub partnership: PartnershipPlan,
    pub milestones: Vec<Milestone>,
    pub roi: RoiProjection,
    pub priority: PriorityBand,
}
