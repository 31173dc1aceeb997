//! Banner shown before the confirmation gate.

use std::fmt::Write as _;

use crossterm::style::Stylize;

use canvas_core::config::CanvasConfig;
use canvas_plan::{PlanTotals, SimulationPlan};

pub const TITLE: &str = "GitHub Commit Canvas";
pub const PROMPT: &str = "Press ENTER to start, any other key to exit";
const LABEL_WIDTH: usize = 14;

/// `NAME          : value` with the padded name in yellow.
pub fn field(name: &str, value: &str, color: bool) -> String {
    let label = format!("{name:<width$}:", width = LABEL_WIDTH);
    if color {
        format!("{} {value}", label.yellow())
    } else {
        format!("{label} {value}")
    }
}

pub fn banner(
    cfg: &CanvasConfig,
    plan: &SimulationPlan,
    totals: PlanTotals,
    color: bool,
) -> String {
    let range = plan.range();
    let mut out = String::from("\n");
    if color {
        let _ = writeln!(out, "{}", TITLE.bold());
    } else {
        let _ = writeln!(out, "{TITLE}");
    }
    let rows = [
        ("USER", format!("{} <{}>", cfg.user_name, cfg.user_email)),
        ("RANGE", format!("{range} ({} days)", totals.day_count)),
        ("PATTERN", plan.distribution().to_string()),
        ("TOTAL COMMITS", totals.total.to_string()),
    ];
    for (name, value) in rows {
        let _ = writeln!(out, "{}", field(name, &value, color));
    }
    out.push('\n');
    out
}

/// Per-weekday table for `plan`.
pub fn breakdown(plan: &SimulationPlan) -> String {
    let b = plan.breakdown();
    let mut out = String::from("weekday  days  commits\n");
    for (day, days, commits) in b.iter() {
        let _ = writeln!(out, "{:<7}{days:>6}{commits:>9}", day.to_string());
    }
    let _ = writeln!(
        out,
        "{:<7}{:>6}{:>9}",
        "total",
        plan.range().day_count(),
        b.total_commits()
    );
    out
}
