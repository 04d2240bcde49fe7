use super::super::domain::BidNotice;
use super::views::{Milestone, ProposalActivity};
use chrono::{Duration, NaiveDate};

/// Lay the five preparation activities out back to back starting today.
/// Each slice takes its fixed share of the runway until the opening, with
/// a one-day minimum so a tight (or unknown) runway still yields a
/// workable sequence.
pub(crate) fn proposal_milestones(notice: &BidNotice, today: NaiveDate) -> Vec<Milestone> {
    let runway_days = notice
        .days_until_opening(today)
        .unwrap_or(0)
        .max(0) as f64;

    let mut cursor = today;
    ProposalActivity::ALL
        .into_iter()
        .map(|activity| {
            let duration = ((activity.proportion() * runway_days).floor() as i64).max(1);
            let starts_on = cursor;
            let ends_on = starts_on + Duration::days(duration);
            cursor = ends_on;
            Milestone {
                activity,
                starts_on,
                ends_on,
                duration_days: duration as u32,
            }
        })
        .collect()
}
