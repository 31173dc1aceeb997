//! Debug-time verification helpers for materialized plans.
//!
//! Intended for tests and debug builds; they panic with a descriptive message
//! on the first violation.

use chrono::NaiveDate;

use crate::schedule::SimulationPlan;

/// Check that `(day, sequence_index)` pairs follow plan order: days ascending,
/// indices `0..commits_today` ascending within each day, no gaps.
pub fn assert_day_order(plan: &SimulationPlan, events: &[(NaiveDate, u32)]) {
    let mut expected = plan
        .days()
        .flat_map(|p| (0..p.commits).map(move |i| (p.day, i)));
    for (pos, &(day, idx)) in events.iter().enumerate() {
        let want = expected.next();
        assert!(
            want == Some((day, idx)),
            "event {pos} is {day}#{idx}, expected {want:?}"
        );
    }
    assert!(
        expected.next().is_none(),
        "only {} events for a plan of {}",
        events.len(),
        plan.totals().total
    );
}

/// Check that a run created exactly the planned number of commits.
pub fn assert_total_matches(plan: &SimulationPlan, created: u64) {
    let total = plan.totals().total;
    assert_eq!(created, total, "created {created} commits, plan total is {total}");
}
