use canvas_core::calendar::{DateRange, WeekdayDistribution};
use canvas_plan::{SimulationPlan, TimestampGenerator};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn decades_plan() -> SimulationPlan {
    SimulationPlan::new(
        DateRange::from_years(1990, 2030).unwrap(),
        WeekdayDistribution::STANDARD,
    )
}

fn bench_plan_totals(c: &mut Criterion) {
    let plan = decades_plan();
    c.bench_function("plan_totals_41y", |b| {
        b.iter(|| black_box(plan.totals()))
    });
    c.bench_function("plan_breakdown_41y", |b| {
        b.iter(|| black_box(plan.breakdown()))
    });
}

fn bench_timestamp_draws(c: &mut Criterion) {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let mut gen = TimestampGenerator::from_seed(Some(42));
    c.bench_function("timestamp_draw", |b| b.iter(|| black_box(gen.draw(day))));
}

criterion_group!(planning, bench_plan_totals, bench_timestamp_draws);
criterion_main!(planning);
