#![forbid(unsafe_code)]
//! canvas-plan: range scheduling and timestamp simulation (calendar → plan).
//!
//! Responsibilities:
//! - Walk a `DateRange` against a `WeekdayDistribution` into totals and a lazy
//!   day-by-day plan.
//! - Draw per-commit timestamps uniformly over a day.
//! - Provide debug-time verification helpers.
//!
//! **No I/O, no git** here. The exec crate drives this plan.

pub mod schedule;
pub mod timestamp;
pub mod verify;

pub use schedule::{DayPlan, PlanSummary, PlanTotals, SimulationPlan, WeekdayBreakdown};
pub use timestamp::{TimestampGenerator, SECONDS_PER_DAY};
