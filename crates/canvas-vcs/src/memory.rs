//! In-memory repository for tests.
//!
//! Records every operation so tests can assert on commit order, messages, and
//! forced times without spawning git. Clones share state, so a test can hand
//! one clone to the materializer and inspect another afterwards.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, VcsError};
use crate::repository::{CommitTimes, Repository};

/// One commit as seen by the in-memory repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub message: String,
    pub times: Option<CommitTimes>,
    /// Paths staged since the previous commit.
    pub staged: Vec<String>,
    /// True when this commit replaced the previous tip via amend.
    pub amended: bool,
}

#[derive(Debug, Default)]
struct State {
    initialized: bool,
    init_calls: usize,
    config: BTreeMap<String, String>,
    index: Vec<String>,
    commits: Vec<RecordedCommit>,
    commit_calls: usize,
    fail_on_commit: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepo {
    state: Arc<Mutex<State>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a repository already exists with `commits` earlier commits.
    pub fn existing(commits: usize) -> Self {
        let repo = Self::new();
        {
            let mut st = repo.lock();
            st.initialized = true;
            st.commits = (0..commits)
                .map(|i| RecordedCommit {
                    message: format!("earlier commit {i}"),
                    times: None,
                    staged: Vec::new(),
                    amended: false,
                })
                .collect();
        }
        repo
    }

    /// Make the `n`-th commit call (1-based, amend included) fail.
    pub fn fail_on_commit(self, n: usize) -> Self {
        self.lock().fail_on_commit = Some(n);
        self
    }

    pub fn init_calls(&self) -> usize {
        self.lock().init_calls
    }

    pub fn config_value(&self, key: &str) -> Option<String> {
        self.lock().config.get(key).cloned()
    }

    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.lock().commits.clone()
    }

    pub fn commit_count(&self) -> usize {
        self.lock().commits.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, message: &str, times: Option<&CommitTimes>, amend: bool) -> Result<()> {
        let mut st = self.lock();
        if !st.initialized {
            return Err(VcsError::Injected("not a repository".into()));
        }
        st.commit_calls += 1;
        let call = st.commit_calls;
        if st.fail_on_commit == Some(call) {
            return Err(VcsError::Injected(format!("commit #{call} rejected")));
        }
        let staged = std::mem::take(&mut st.index);
        if amend {
            let Some(tip) = st.commits.last_mut() else {
                return Err(VcsError::Injected("nothing to amend".into()));
            };
            tip.message = message.to_string();
            tip.staged.extend(staged);
            tip.amended = true;
        } else {
            st.commits.push(RecordedCommit {
                message: message.to_string(),
                times: times.copied(),
                staged,
                amended: false,
            });
        }
        Ok(())
    }
}

impl Repository for MemoryRepo {
    fn init(&self) -> Result<()> {
        let mut st = self.lock();
        st.init_calls += 1;
        st.initialized = true;
        Ok(())
    }

    fn configure(&self, key: &str, value: &str) -> Result<()> {
        self.lock().config.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn stage(&self, paths: &[&str]) -> Result<()> {
        let mut st = self.lock();
        if !st.initialized {
            return Err(VcsError::Injected("not a repository".into()));
        }
        st.index.extend(paths.iter().map(|p| p.to_string()));
        Ok(())
    }

    fn commit(&self, message: &str, times: Option<&CommitTimes>) -> Result<()> {
        self.record(message, times, false)
    }

    fn amend(&self, message: &str) -> Result<()> {
        self.record(message, None, true)
    }
}
