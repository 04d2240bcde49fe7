use super::common::*;
use crate::workflows::procurement::analysis::scoring::{score_notice, ScoreWeights};

#[test]
fn favorable_notice_scores_high_on_every_dimension() {
    let scores = score_notice(
        &favorable_notice(),
        &company(),
        today(),
        &ScoreWeights::default(),
    );

    assert_eq!(scores.financial, 100);
    assert_eq!(scores.technical, 100);
    assert_eq!(scores.documentary, 80);
    assert_eq!(scores.timeline, 90);
    assert_eq!(scores.risk, 80);
    assert_eq!(scores.competition, 100);
    assert_eq!(scores.overall, 93);
}

#[test]
fn risky_notice_is_penalized_across_the_board() {
    let scores = score_notice(
        &risky_notice(),
        &company(),
        today(),
        &ScoreWeights::default(),
    );

    assert_eq!(scores.financial, 40);
    assert_eq!(scores.documentary, 20);
    assert_eq!(scores.timeline, 15);
    // Municipal emergency, eight-figure value, consortium, three-day
    // runway, and four punitive keywords drive the raw score negative.
    assert_eq!(scores.risk, 0);
    assert_eq!(scores.competition, 45);
    assert_eq!(scores.overall, 38);
}

#[test]
fn sparse_notice_scores_from_documented_baselines() {
    let mut notice = favorable_notice();
    notice.object = String::new();
    notice.estimated_value = None;
    notice.opening_date = None;
    notice.question_deadline = None;
    notice.challenge_deadline = None;
    notice.execution_days = None;
    notice.validity_months = None;
    notice.expected_payment_days = None;
    notice.small_business_benefit = false;
    notice.required_documents = Vec::new();
    notice.required_technologies = Vec::new();
    notice.qualification = Default::default();
    notice.modality = crate::workflows::procurement::analysis::Modality::Other;

    let scores = score_notice(&notice, &company(), today(), &ScoreWeights::default());

    // Absent fields contribute no adjustment; only the expertise miss
    // (empty object), the zero-complexity bonus, and the no-required-tech
    // bonus move the technical score off its base.
    assert_eq!(scores.financial, 50);
    assert_eq!(scores.technical, 55);
    assert_eq!(scores.documentary, 70);
    assert_eq!(scores.timeline, 50);
    assert_eq!(scores.risk, 80);
    assert_eq!(scores.competition, 75);
    assert_eq!(scores.overall, 61);
}

#[test]
fn every_score_stays_within_bounds() {
    let weights = ScoreWeights::default();
    for notice in [favorable_notice(), risky_notice()] {
        let scores = score_notice(&notice, &company(), today(), &weights);
        for (_, score) in scores.by_kind() {
            assert!(score <= 100);
        }
        assert!(scores.overall <= 100);
    }
}

#[test]
fn overall_matches_the_weighted_sum_of_sub_scores() {
    let weights = ScoreWeights::default();
    for notice in [favorable_notice(), risky_notice()] {
        let scores = score_notice(&notice, &company(), today(), &weights);
        let expected = (f64::from(scores.financial) * 0.25
            + f64::from(scores.technical) * 0.20
            + f64::from(scores.documentary) * 0.15
            + f64::from(scores.timeline) * 0.15
            + f64::from(scores.risk) * 0.15
            + f64::from(scores.competition) * 0.10)
            .round() as u8;
        assert_eq!(scores.overall, expected);
    }
}

#[test]
fn identical_inputs_always_yield_identical_scores() {
    let notice = risky_notice();
    let profile = company();
    let weights = ScoreWeights::default();

    let first = score_notice(&notice, &profile, today(), &weights);
    let second = score_notice(&notice, &profile, today(), &weights);

    assert_eq!(first, second);
}

#[test]
fn custom_weights_reshape_the_aggregate() {
    let financial_only =
        ScoreWeights::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0).expect("vector sums to one");
    let scores = score_notice(&risky_notice(), &company(), today(), &financial_only);
    assert_eq!(scores.overall, scores.financial);
}

#[test]
fn value_inside_the_revenue_band_beats_the_outliers() {
    let company = company();
    let weights = ScoreWeights::default();

    let in_band = favorable_notice();

    let mut below_band = favorable_notice();
    below_band.estimated_value = Some(50_000.0);

    let mut far_above_band = favorable_notice();
    far_above_band.estimated_value = Some(10_000_000.0);

    let in_band_score = score_notice(&in_band, &company, today(), &weights).financial;
    let below_score = score_notice(&below_band, &company, today(), &weights).financial;
    let far_above_score = score_notice(&far_above_band, &company, today(), &weights).financial;

    assert!(in_band_score >= below_score);
    assert!(below_score > far_above_score);
    assert_eq!(far_above_score, 80);
}

#[test]
fn unmatched_required_technologies_lower_the_technical_score() {
    let weights = ScoreWeights::default();

    let mut mismatched = favorable_notice();
    mismatched.required_technologies = vec!["cobol".to_string(), "mainframe".to_string()];

    let matched_score =
        score_notice(&favorable_notice(), &company(), today(), &weights).technical;
    let mismatched_score = score_notice(&mismatched, &company(), today(), &weights).technical;

    assert_eq!(matched_score, 100);
    assert_eq!(mismatched_score, 90);
}

#[test]
fn short_runway_thins_the_field_but_hurts_the_timeline() {
    let weights = ScoreWeights::default();
    let baseline = score_notice(&favorable_notice(), &company(), today(), &weights);

    let mut rushed = favorable_notice();
    rushed.opening_date = chrono::NaiveDate::from_ymd_opt(2025, 3, 13);
    rushed.question_deadline = None;
    rushed.challenge_deadline = None;
    let scores = score_notice(&rushed, &company(), today(), &weights);

    assert!(scores.timeline < baseline.timeline);
    assert!(scores.risk < baseline.risk);
    // competition was already clamped at the ceiling for this notice, so
    // the under-a-week bonus cannot push it further
    assert_eq!(scores.competition, 100);
}
