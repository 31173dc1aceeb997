//! The tracked artifact: one file that grows by a line per commit.
//!
//! Every line carries a fresh random token so no two commits have identical
//! content.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rand::rngs::OsRng;
use rand::RngCore;

/// Content written by [`TrackedArtifact::reset`].
pub const SEED_LINE: &str = "seed";

#[derive(Debug, Clone)]
pub struct TrackedArtifact {
    path: PathBuf,
    rel: String,
}

impl TrackedArtifact {
    /// `rel` is relative to `workdir` and is what gets staged.
    pub fn new(workdir: &Path, rel: &str) -> Self {
        Self {
            path: workdir.join(rel),
            rel: rel.to_string(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub fn rel_path(&self) -> &str {
        &self.rel
    }

    /// Truncate to the single seed line.
    pub fn reset(&self) -> io::Result<()> {
        fs::write(&self.path, format!("{SEED_LINE}\n"))
    }

    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut f = OpenOptions::new().append(true).create(true).open(&self.path)?;
        writeln!(f, "{line}")
    }

    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        Ok(fs::read_to_string(&self.path)?
            .lines()
            .map(str::to_string)
            .collect())
    }
}

/// `<YYYY-MM-DD>-<index:02> <token>`, index 0-based within the day.
pub fn event_line(day: NaiveDate, index: u32, token: &str) -> String {
    format!("{day}-{index:02} {token}")
}

/// 128 bits from the OS CSPRNG as 32 lowercase hex chars.
pub fn random_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
