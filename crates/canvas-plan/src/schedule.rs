//! Range scheduling: calendar range × weekday table → totals and a day plan.
//!
//! Inputs:
//! - A closed `DateRange` (already validated, `start <= end`).
//! - A `WeekdayDistribution`.
//!
//! Output:
//! - `PlanTotals` computed once up front (the progress denominator).
//! - A lazy `(day, commits_today)` sequence in ascending day order.
//!
//! Everything here is pure and re-derivable from the same inputs.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use canvas_core::calendar::{DateRange, Days, WeekdayDistribution, WEEK};

/// Totals for a whole plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanTotals {
    /// Sum of `commits_today` over every day of the range.
    pub total: u64,
    /// Days in the range (>= 1).
    pub day_count: u64,
}

/// One entry of the day-by-day plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    pub day: NaiveDate,
    pub commits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationPlan {
    range: DateRange,
    distribution: WeekdayDistribution,
}

impl SimulationPlan {
    pub fn new(range: DateRange, distribution: WeekdayDistribution) -> Self {
        Self {
            range,
            distribution,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn distribution(&self) -> WeekdayDistribution {
        self.distribution
    }

    /// Walk the range once, one calendar day at a time.
    pub fn totals(&self) -> PlanTotals {
        let mut totals = PlanTotals::default();
        for plan in self.days() {
            totals.total += u64::from(plan.commits);
            totals.day_count += 1;
        }
        totals
    }

    /// Lazy day plan from `start` to `end` inclusive.
    pub fn days(&self) -> PlanDays {
        PlanDays {
            days: self.range.days(),
            distribution: self.distribution,
        }
    }

    /// Days and commits grouped by weekday.
    pub fn breakdown(&self) -> WeekdayBreakdown {
        let mut out = WeekdayBreakdown::default();
        for plan in self.days() {
            let idx = weekday_index(plan.day);
            out.days[idx] += 1;
            out.commits[idx] += u64::from(plan.commits);
        }
        out
    }

    /// Serializable description of the plan, used for the manifest hash.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            start: self.range.start(),
            end: self.range.end(),
            per_weekday: self.distribution.as_array(),
            totals: self.totals(),
        }
    }
}

fn weekday_index(day: NaiveDate) -> usize {
    use chrono::Datelike;
    day.weekday().num_days_from_monday() as usize
}

/// Iterator returned by [`SimulationPlan::days`].
#[derive(Debug, Clone)]
pub struct PlanDays {
    days: Days,
    distribution: WeekdayDistribution,
}

impl Iterator for PlanDays {
    type Item = DayPlan;

    fn next(&mut self) -> Option<DayPlan> {
        let day = self.days.next()?;
        Some(DayPlan {
            day,
            commits: self.distribution.for_date(day),
        })
    }
}

/// Per-weekday day and commit counts over a range, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekdayBreakdown {
    pub days: [u64; 7],
    pub commits: [u64; 7],
}

impl WeekdayBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u64, u64)> + '_ {
        WEEK.iter()
            .enumerate()
            .map(move |(i, &d)| (d, self.days[i], self.commits[i]))
    }

    pub fn total_commits(&self) -> u64 {
        self.commits.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub per_weekday: [u32; 7],
    pub totals: PlanTotals,
}
