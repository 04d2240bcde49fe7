mod financials;
mod timeline;
mod views;

pub use views::{
    ActionPlan, CostBreakdown, Milestone, PartnerType, PartnershipPlan, PricingApproach,
    PricingStrategy, PriorityBand, ProposalActivity, RoiProjection, StrategicRecommendation,
    Strategy,
};

use super::domain::{BidNotice, CompanyProfile};
use super::scoring::{BidDecision, ParticipationCall, ScoreKind, ScoreSet};
use chrono::NaiveDate;

/// Derive the full strategic recommendation for a scored, decided notice.
pub(crate) fn compose(
    notice: &BidNotice,
    company: &CompanyProfile,
    scores: &ScoreSet,
    decision: &BidDecision,
    today: NaiveDate,
) -> StrategicRecommendation {
    let roi = financials::roi_projection(notice, scores);
    let priority = priority_band(scores, decision, roi.roi_percent);

    StrategicRecommendation {
        strategy: select_strategy(scores),
        competitive_advantages: competitive_advantages(scores, company),
        action_plan: action_plan(notice, scores, decision, today),
        pricing: financials::pricing_strategy(notice, scores),
        partnership: partnership_plan(notice, scores),
        milestones: timeline::proposal_milestones(notice, today),
        roi,
        priority,
    }
}

const fn strategy_for(kind: ScoreKind) -> Option<Strategy> {
    match kind {
        ScoreKind::Financial => Some(Strategy::PriceCompetitiveness),
        ScoreKind::Technical => Some(Strategy::TechnicalDifferentiation),
        ScoreKind::Documentary => Some(Strategy::ExemplaryCompliance),
        ScoreKind::Timeline => Some(Strategy::DeliveryAgility),
        ScoreKind::Competition => Some(Strategy::UniquePositioning),
        ScoreKind::Risk => None,
    }
}

/// The two highest dimensions pick the strategy through a fixed lookup;
/// risk carries no strategy of its own, and a tie falls back to balanced.
fn select_strategy(scores: &ScoreSet) -> Strategy {
    let mut ranked = scores.by_kind();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .iter()
        .take(2)
        .find_map(|(kind, _)| strategy_for(*kind))
        .unwrap_or(Strategy::Balanced)
}

fn competitive_advantages(scores: &ScoreSet, company: &CompanyProfile) -> Vec<String> {
    let mut advantages = Vec::new();

    if scores.financial >= 80 {
        advantages.push("contract value sits comfortably inside the company's capacity".to_string());
    }
    if scores.technical >= 80 {
        advantages.push("object matches the company's core technical expertise".to_string());
    }
    if scores.documentary >= 80 {
        advantages.push("documentation requirements are routine for the company".to_string());
    }
    if scores.timeline >= 80 {
        advantages.push("comfortable preparation and execution windows".to_string());
    }
    if scores.risk >= 80 {
        advantages.push("low execution-risk profile for this agency and object".to_string());
    }
    if scores.competition >= 80 {
        advantages.push(format!(
            "favorable competitive field for a {} company in {}",
            if company.size.is_small_business() {
                "small"
            } else {
                "mid-size"
            },
            company.state
        ));
    }

    advantages
}

fn action_plan(
    notice: &BidNotice,
    scores: &ScoreSet,
    decision: &BidDecision,
    today: NaiveDate,
) -> ActionPlan {
    let mut plan = ActionPlan::default();
    let days_until_opening = notice.days_until_opening(today);

    if decision.call != ParticipationCall::Decline {
        plan.immediate
            .push("read the full edital and its annexes".to_string());
        plan.immediate
            .push("confirm every required document is current".to_string());
        if let Some(days) = days_until_opening {
            if days <= 10 {
                plan.immediate.push(format!(
                    "urgent: opening in {days} day(s), start document collection today"
                ));
            }
        }
    }

    if decision.call == ParticipationCall::Participate {
        plan.preparation
            .push("draft the technical proposal against the object description".to_string());
        plan.preparation
            .push("model the cost spreadsheet and validate the margin".to_string());
        if scores.technical < 70 {
            plan.preparation
                .push("line up a technical partner for the weaker disciplines".to_string());
        }
        if scores.financial < 60 {
            plan.preparation
                .push("revisit the cost structure before committing to a price".to_string());
        }
    }

    match decision.call {
        ParticipationCall::Decline => {
            plan.post_decision
                .push("archive the edital with the decline rationale".to_string());
        }
        _ => {
            plan.post_decision
                .push("track the clarification and challenge deadlines".to_string());
            plan.post_decision
                .push("monitor the result publication and the appeal window".to_string());
        }
    }

    plan
}

fn partnership_plan(notice: &BidNotice, scores: &ScoreSet) -> PartnershipPlan {
    let mut plan = PartnershipPlan::default();
    let value = notice.estimated_value.unwrap_or(0.0);

    if scores.technical < 60 {
        plan.required = true;
        plan.partner_types.push(PartnerType::Technical);
    }
    if scores.financial < 50 && value > 300_000.0 {
        plan.required = true;
        plan.partner_types.push(PartnerType::Financial);
    }
    if scores.documentary < 60 {
        plan.partner_types.push(PartnerType::LegalAdvisory);
    }
    if notice.allows_consortium {
        plan.partner_types.push(PartnerType::Consortium);
    }

    if !plan.partner_types.is_empty() {
        plan.selection_criteria = vec![
            "proven delivery record on similar objects".to_string(),
            "clean fiscal and labor certificates".to_string(),
            "capacity to commit through the full execution term".to_string(),
        ];
    }

    plan
}

fn priority_band(scores: &ScoreSet, decision: &BidDecision, roi_percent: f64) -> PriorityBand {
    let mut priority = i32::from(scores.overall);

    if roi_percent > 25.0 {
        priority += 10;
    } else if roi_percent < 10.0 {
        priority -= 10;
    }

    if decision.call == ParticipationCall::Participate && decision.confidence > 80 {
        priority += 5;
    }

    if priority >= 80 {
        PriorityBand::High
    } else if priority >= 60 {
        PriorityBand::Medium
    } else {
        PriorityBand::Low
    }
}
