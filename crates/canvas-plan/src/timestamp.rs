//! Per-commit timestamp draws.
//!
//! Each draw is the day's UTC midnight plus a uniform whole-second offset in
//! `[0, 86400)`. Draws are independent: successive timestamps for the same day
//! come out in any order and are never sorted.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SECONDS_PER_DAY: u32 = 86_400;

#[derive(Debug, Clone)]
pub struct TimestampGenerator<R = StdRng> {
    rng: R,
}

impl TimestampGenerator<StdRng> {
    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> TimestampGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform offset in whole seconds, `0..86400`.
    pub fn offset_seconds(&mut self) -> u32 {
        self.rng.gen_range(0..SECONDS_PER_DAY)
    }

    /// A random instant on `day`, with an explicit `+00:00` offset.
    pub fn draw(&mut self, day: NaiveDate) -> DateTime<FixedOffset> {
        at_offset(day, self.offset_seconds())
    }
}

/// `day` at `seconds` past UTC midnight.
pub fn at_offset(day: NaiveDate, seconds: u32) -> DateTime<FixedOffset> {
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds % SECONDS_PER_DAY, 0)
        .unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&day.and_time(time)).fixed_offset()
}
