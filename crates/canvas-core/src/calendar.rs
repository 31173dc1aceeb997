//! Calendar model: the per-weekday commit table and the inclusive day range.
//!
//! Both types are plain values. The scheduler in `canvas-plan` walks a
//! `DateRange` and looks each day up in a `WeekdayDistribution`.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weekdays in table order (Monday first).
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Commits to create on each day of the week, indexed Monday = 0.
///
/// Counts are unsigned, so the "non-negative, all seven present" invariant
/// holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayDistribution([u32; 7]);

impl WeekdayDistribution {
    /// The shipped pattern: a mid-week peak with light weekends.
    pub const STANDARD: Self = Self([7, 14, 21, 14, 7, 2, 2]);

    pub const fn new(per_weekday: [u32; 7]) -> Self {
        Self(per_weekday)
    }

    pub fn get(&self, day: Weekday) -> u32 {
        self.0[day.num_days_from_monday() as usize]
    }

    /// Commits planned for a specific calendar day.
    pub fn for_date(&self, date: NaiveDate) -> u32 {
        self.get(date.weekday())
    }

    /// Sum over one full week.
    pub fn weekly_total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u32)> + '_ {
        WEEK.iter().map(move |&d| (d, self.get(d)))
    }

    pub fn as_array(&self) -> [u32; 7] {
        self.0
    }
}

impl Default for WeekdayDistribution {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for WeekdayDistribution {
    /// Renders `Mon 7 | Tue 14 | ... | Sun 2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (day, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{day} {count}")?;
        }
        Ok(())
    }
}

/// Closed interval of calendar days, `start <= end` (UTC, day granularity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Range(format!("start {start} is after end {end}")));
        }
        Ok(Self { start, end })
    }

    /// `<start_year>-01-01 ..= <end_year>-12-31`.
    pub fn from_years(start_year: i32, end_year: i32) -> Result<Self> {
        if start_year < 1 || end_year < 1 {
            return Err(Error::Range(format!(
                "years must be positive (got {start_year}..{end_year})"
            )));
        }
        if end_year < start_year {
            return Err(Error::Range(format!(
                "end year {end_year} is before start year {start_year}"
            )));
        }
        let start = NaiveDate::from_ymd_opt(start_year, 1, 1)
            .ok_or_else(|| Error::Range(format!("year {start_year} is out of range")))?;
        let end = NaiveDate::from_ymd_opt(end_year, 12, 31)
            .ok_or_else(|| Error::Range(format!("year {end_year} is out of range")))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range; always at least 1.
    pub fn day_count(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Every day from `start` to `end`, stepping one calendar day at a time.
    pub fn days(&self) -> Days {
        Days {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Iterator over the days of a `DateRange`.
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.next.filter(|d| *d <= self.end)?;
        self.next = day.succ_opt();
        Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_pattern_lookup() {
        let dist = WeekdayDistribution::STANDARD;
        assert_eq!(dist.get(Weekday::Mon), 7);
        assert_eq!(dist.get(Weekday::Wed), 21);
        assert_eq!(dist.get(Weekday::Sun), 2);
        assert_eq!(dist.weekly_total(), 67);
        // 2024-01-06 is a Saturday
        assert_eq!(dist.for_date(ymd(2024, 1, 6)), 2);
    }

    #[test]
    fn pattern_label() {
        assert_eq!(
            WeekdayDistribution::STANDARD.to_string(),
            "Mon 7 | Tue 14 | Wed 21 | Thu 14 | Fri 7 | Sat 2 | Sun 2"
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(ymd(2024, 1, 2), ymd(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::Range(_)));
    }

    #[test]
    fn years_are_validated() {
        assert!(DateRange::from_years(0, 2020).is_err());
        assert!(DateRange::from_years(2021, 2020).is_err());
        let r = DateRange::from_years(2020, 2021).unwrap();
        assert_eq!(r.start(), ymd(2020, 1, 1));
        assert_eq!(r.end(), ymd(2021, 12, 31));
        // 2020 is a leap year
        assert_eq!(r.day_count(), 366 + 365);
    }

    #[test]
    fn days_are_inclusive_and_consecutive() {
        let r = DateRange::new(ymd(2023, 12, 30), ymd(2024, 1, 2)).unwrap();
        let days: Vec<_> = r.days().collect();
        assert_eq!(
            days,
            vec![ymd(2023, 12, 30), ymd(2023, 12, 31), ymd(2024, 1, 1), ymd(2024, 1, 2)]
        );
        assert_eq!(days.len() as u64, r.day_count());
    }

    #[test]
    fn single_day_range() {
        let d = ymd(2024, 1, 6);
        let r = DateRange::new(d, d).unwrap();
        assert_eq!(r.days().collect::<Vec<_>>(), vec![d]);
        assert_eq!(r.day_count(), 1);
    }
}
