use super::super::domain::BidNotice;
use super::super::scoring::ScoreSet;
use super::views::{CostBreakdown, PricingApproach, PricingStrategy, RoiProjection};

// The proposal is priced off an assumed internal cost of 75% of the
// estimated contract value; the margin rides on top of that basis.
const COST_BASIS: f64 = 0.75;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn pricing_strategy(notice: &BidNotice, scores: &ScoreSet) -> PricingStrategy {
    let (approach, base_margin) = if scores.competition > 70 {
        (PricingApproach::Competitive, 10.0)
    } else if scores.competition < 50 {
        (PricingApproach::Aggressive, 8.0)
    } else {
        (PricingApproach::Conservative, 12.0)
    };

    let mut margin = base_margin;
    if scores.technical > 80 {
        margin += 3.0;
    }

    let value = notice.estimated_value.unwrap_or(0.0);
    if value > 500_000.0 {
        margin -= 2.0;
    }

    let suggested_price = (COST_BASIS * value * (1.0 + margin / 100.0)).round();

    PricingStrategy {
        approach,
        margin_percent: margin,
        suggested_price,
    }
}

pub(crate) fn roi_projection(notice: &BidNotice, scores: &ScoreSet) -> RoiProjection {
    let value = notice.estimated_value.unwrap_or(0.0);

    let mut cost = COST_BASIS * value;
    if scores.technical < 60 {
        cost *= 1.10;
    }
    if scores.timeline < 60 {
        cost *= 1.05;
    }

    let absolute_return = value - cost;
    let roi_percent = if cost > 0.0 {
        round2(absolute_return / cost * 100.0)
    } else {
        0.0
    };

    let payback_months = notice
        .execution_days
        .map(|days| days.div_ceil(30))
        .unwrap_or(0);

    RoiProjection {
        roi_percent,
        absolute_return: round2(absolute_return),
        payback_months,
        cost_breakdown: CostBreakdown {
            direct: round2(cost * 0.60),
            overhead: round2(cost * 0.25),
            taxes: round2(cost * 0.15),
        },
    }
}
