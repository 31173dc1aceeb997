#![forbid(unsafe_code)]
//! canvas-vcs: the version-control collaborator behind a narrow trait.
//!
//! - `git`: spawns the `git` CLI, one blocking process per operation.
//! - `memory`: records operations in memory (tests, dry runs).
//!
//! Callers only see [`Repository`]; forced commit times travel as an explicit
//! [`CommitTimes`] argument, never through the caller's environment.

pub mod error;
pub mod git;
pub mod memory;
pub mod repository;

pub use error::{Result, VcsError};
pub use git::GitCli;
pub use memory::{MemoryRepo, RecordedCommit};
pub use repository::{git_date, CommitTimes, Repository};
