//! The `Repository` trait: the only surface the materializer talks to.

use chrono::{DateTime, FixedOffset};

use crate::error::Result;

/// Forced author and committer instants for one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitTimes {
    pub author: DateTime<FixedOffset>,
    pub committer: DateTime<FixedOffset>,
}

impl CommitTimes {
    /// Author and committer both set to `at`.
    pub fn both(at: DateTime<FixedOffset>) -> Self {
        Self {
            author: at,
            committer: at,
        }
    }
}

/// `YYYY-MM-DDTHH:MM:SS±HHMM`, the form passed as a git author/committer date.
pub fn git_date(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%z").to_string()
}

/// Version-control operations, each blocking until complete.
///
/// Any `Err` is fatal to the caller's run; implementations do not retry.
pub trait Repository {
    /// Create the repository if absent. No-op when one already exists.
    fn init(&self) -> Result<()>;

    /// Set a repository-local configuration value.
    fn configure(&self, key: &str, value: &str) -> Result<()>;

    /// Stage `paths` (relative to the working directory).
    fn stage(&self, paths: &[&str]) -> Result<()>;

    /// Commit the index with hooks bypassed. `times` overrides the clock.
    fn commit(&self, message: &str, times: Option<&CommitTimes>) -> Result<()>;

    /// Replace the tip commit with the index and `message`, hooks bypassed.
    fn amend(&self, message: &str) -> Result<()>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn init(&self) -> Result<()> {
        (**self).init()
    }
    fn configure(&self, key: &str, value: &str) -> Result<()> {
        (**self).configure(key, value)
    }
    fn stage(&self, paths: &[&str]) -> Result<()> {
        (**self).stage(paths)
    }
    fn commit(&self, message: &str, times: Option<&CommitTimes>) -> Result<()> {
        (**self).commit(message, times)
    }
    fn amend(&self, message: &str) -> Result<()> {
        (**self).amend(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn git_date_has_numeric_offset() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let at = utc.with_ymd_and_hms(2024, 1, 6, 9, 5, 3).unwrap();
        assert_eq!(git_date(&at), "2024-01-06T09:05:03+0000");

        let cet = FixedOffset::east_opt(3600).unwrap();
        let at = cet.with_ymd_and_hms(2024, 1, 6, 23, 59, 59).unwrap();
        assert_eq!(git_date(&at), "2024-01-06T23:59:59+0100");
    }

    #[test]
    fn both_sets_author_and_committer() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2020, 5, 1, 0, 0, 0)
            .unwrap();
        let t = CommitTimes::both(at);
        assert_eq!(t.author, t.committer);
    }
}
