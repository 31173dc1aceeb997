//! Throttled single-line progress bar with elapsed time, ETA, and rate.
//!
//! The reporter is fed once per created commit. It redraws at most every
//! [`RENDER_INTERVAL`], except that the final event always draws. Each frame
//! starts with `\r` so it overwrites the previous one; the caller ends the line.

use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

pub const BAR_WIDTH: usize = 30;
pub const RENDER_INTERVAL: Duration = Duration::from_millis(200);

/// `0s`, `5m 03s`, `1h 02m 03s`. Fractions are truncated, negatives clamp to 0.
pub fn format_seconds(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

/// `floor(done / total * BAR_WIDTH)`, clamped to the bar.
pub fn filled_cells(done: u64, total: u64) -> usize {
    if total == 0 {
        return BAR_WIDTH;
    }
    let cells = (done.min(total) as u128 * BAR_WIDTH as u128) / total as u128;
    cells as usize
}

/// Everything one rendered line shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressFrame {
    pub done: u64,
    pub total: u64,
    pub elapsed: f64,
    pub rate: f64,
    pub remaining: f64,
}

impl ProgressFrame {
    pub fn compute(done: u64, total: u64, elapsed: f64) -> Self {
        let rate = if elapsed > 0.0 {
            done as f64 / elapsed
        } else {
            0.0
        };
        let remaining = if rate > 0.0 {
            total.saturating_sub(done) as f64 / rate
        } else {
            0.0
        };
        Self {
            done,
            total,
            elapsed,
            rate,
            remaining,
        }
    }

    pub fn filled(&self) -> usize {
        filled_cells(self.done, self.total)
    }
}

impl fmt::Display for ProgressFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = self.filled();
        write!(
            f,
            "[{}{}] {}/{} {} elapsed {} left {:5.1} c/s",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.done,
            self.total,
            format_seconds(self.elapsed),
            format_seconds(self.remaining),
            self.rate
        )
    }
}

pub struct ProgressReporter<W: Write> {
    out: W,
    total: u64,
    done: u64,
    started_at: Instant,
    last_render_at: Option<Instant>,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W, total: u64) -> Self {
        Self::started_at(out, total, Instant::now())
    }

    pub fn started_at(out: W, total: u64, started_at: Instant) -> Self {
        Self {
            out,
            total,
            done: 0,
            started_at,
            last_render_at: None,
        }
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count one commit now. Returns whether a frame was drawn.
    pub fn record(&mut self) -> io::Result<bool> {
        self.record_at(Instant::now())
    }

    /// Count one commit at `now`. Returns whether a frame was drawn.
    pub fn record_at(&mut self, now: Instant) -> io::Result<bool> {
        self.done += 1;
        let due = match self.last_render_at {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= RENDER_INTERVAL,
        };
        if !due && self.done != self.total {
            return Ok(false);
        }
        self.last_render_at = Some(now);
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f64();
        let frame = ProgressFrame::compute(self.done, self.total, elapsed);
        write!(self.out, "\r{frame}")?;
        self.out.flush()?;
        Ok(true)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
