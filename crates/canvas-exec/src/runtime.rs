//! Runtime: materialize a `SimulationPlan` as commits and emit a `RunManifest`.
//!
//! State machine:
//! - `Uninitialized → RepoReady` via [`Materializer::prepare`]: init the
//!   repository (no-op if present), set identity and `core.fsync=none`, reset
//!   the artifact, and create the baseline commit.
//! - Day loop via [`Materializer::materialize`]: for each day in order, one
//!   commit per planned event, each fully finished before the next begins.
//! - `→ Finalized` via [`Materializer::finalize`]: stage auxiliary files and
//!   amend the tip into the final commit.
//!
//! Any repository or artifact failure aborts the run. Nothing is rolled back.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use canvas_core::config::CanvasConfig;
use canvas_core::manifest::RunManifest;
use canvas_plan::{PlanTotals, SimulationPlan, TimestampGenerator};
use canvas_vcs::{CommitTimes, Repository, VcsError};

use crate::artifact::{event_line, random_token, TrackedArtifact};
use crate::digest::hash_plan;
use crate::metrics::emit_span;
use crate::progress::ProgressReporter;

pub const BASELINE_MESSAGE: &str = "Reset data file";
pub const FINAL_MESSAGE: &str = "Final commit";

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("version control: {0}")]
    Vcs(#[from] VcsError),
    #[error("tracked artifact: {0}")]
    Artifact(String),
    #[error("progress output: {0}")]
    Progress(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("invalid run state: {0}")]
    Invalid(String),
}

impl ExecError {
    /// Process exit code for a fatal run failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::Vcs(e) => e.exit_code(),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Uninitialized,
    RepoReady,
    Finalized,
}

/// Commit message for the `index`-th (0-based) commit of `day`.
pub fn commit_message(day: chrono::NaiveDate, index: u32) -> String {
    format!("Commit {day} #{}", index + 1)
}

/// Owns the repository handle, the artifact, and the timestamp source.
pub struct Materializer<R: Repository, W: Write> {
    cfg: CanvasConfig,
    repo: R,
    workdir: PathBuf,
    artifact: TrackedArtifact,
    stamps: TimestampGenerator,
    progress_out: W,
    state: RunState,
    commits: u64,
    days: u64,
}

impl<R: Repository, W: Write> Materializer<R, W> {
    pub fn new(cfg: CanvasConfig, repo: R, workdir: impl Into<PathBuf>, progress_out: W) -> Self {
        let workdir = workdir.into();
        let artifact = TrackedArtifact::new(&workdir, &cfg.artifact_path);
        let stamps = TimestampGenerator::from_seed(cfg.seed);
        Self {
            cfg,
            repo,
            workdir,
            artifact,
            stamps,
            progress_out,
            state: RunState::Uninitialized,
            commits: 0,
            days: 0,
        }
    }

    /// Replace the timestamp source chosen from `cfg.seed`.
    pub fn with_timestamps(mut self, stamps: TimestampGenerator) -> Self {
        self.stamps = stamps;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn artifact(&self) -> &TrackedArtifact {
        &self.artifact
    }

    pub fn into_output(self) -> W {
        self.progress_out
    }

    /// Prepare, materialize the whole plan, and finalize.
    pub fn run(&mut self, plan: &SimulationPlan) -> Result<RunManifest, ExecError> {
        let plan_hash = hash_plan(plan)?;
        // Fixed denominator for the whole run.
        let totals = plan.totals();
        let manifest = RunManifest::new(plan_hash, now_millis());

        self.prepare()?;
        self.materialize(plan, totals)?;
        self.finalize()?;

        let manifest = manifest.finish(now_millis(), self.commits, self.days);
        emit_span(
            "run_finished",
            &[
                ("commits", manifest.commits.to_string()),
                ("days", manifest.days.to_string()),
                ("duration_ms", manifest.duration_ms().to_string()),
                ("plan_hash", manifest.plan_hash.short()),
            ],
        );
        Ok(manifest)
    }

    /// `Uninitialized → RepoReady`.
    pub fn prepare(&mut self) -> Result<(), ExecError> {
        if self.state != RunState::Uninitialized {
            return Err(ExecError::Invalid(format!(
                "prepare called in state {:?}",
                self.state
            )));
        }
        self.repo.init()?;
        self.repo.configure("user.name", &self.cfg.user_name)?;
        self.repo.configure("user.email", &self.cfg.user_email)?;
        self.repo.configure("core.fsync", "none")?;

        self.artifact.reset().map_err(|e| artifact_error(&self.artifact, e))?;
        self.repo.stage(&[self.artifact.rel_path()])?;
        self.repo.commit(BASELINE_MESSAGE, None)?;

        #[cfg(feature = "tracing")]
        tracing::info!(workdir = %self.workdir.display(), artifact = self.artifact.rel_path(), "repository ready");
        self.state = RunState::RepoReady;
        Ok(())
    }

    /// Day loop. `totals` must be the plan's totals, computed before the run.
    pub fn materialize(
        &mut self,
        plan: &SimulationPlan,
        totals: PlanTotals,
    ) -> Result<u64, ExecError> {
        if self.state != RunState::RepoReady {
            return Err(ExecError::Invalid(format!(
                "materialize called in state {:?}",
                self.state
            )));
        }

        let mut progress = ProgressReporter::new(&mut self.progress_out, totals.total);
        let rel = self.artifact.rel_path().to_string();

        for day_plan in plan.days() {
            self.days += 1;
            if day_plan.commits == 0 {
                continue;
            }
            for index in 0..day_plan.commits {
                let at = self.stamps.draw(day_plan.day);
                let line = event_line(day_plan.day, index, &random_token());
                self.artifact
                    .append(&line)
                    .map_err(|e| artifact_error(&self.artifact, e))?;
                self.repo.stage(&[rel.as_str()])?;
                self.repo.commit(
                    &commit_message(day_plan.day, index),
                    Some(&CommitTimes::both(at)),
                )?;
                self.commits += 1;

                #[cfg(feature = "tracing")]
                tracing::trace!(day = %day_plan.day, index, at = %at, "committed");

                progress
                    .record()
                    .map_err(|e| ExecError::Progress(e.to_string()))?;
            }
        }
        Ok(self.commits)
    }

    /// Stage auxiliary files that exist and amend the tip into the final commit.
    pub fn finalize(&mut self) -> Result<(), ExecError> {
        if self.state != RunState::RepoReady {
            return Err(ExecError::Invalid(format!(
                "finalize called in state {:?}",
                self.state
            )));
        }
        let present = existing_paths(&self.workdir, &self.cfg.aux_paths);
        if !present.is_empty() {
            let refs: Vec<&str> = present.iter().map(String::as_str).collect();
            self.repo.stage(&refs)?;
        }
        self.repo.amend(FINAL_MESSAGE)?;
        self.state = RunState::Finalized;
        Ok(())
    }
}

/// The subset of `paths` present under `workdir`, in input order.
fn existing_paths(workdir: &Path, paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .filter(|p| {
            let found = workdir.join(p.as_str()).exists();
            #[cfg(feature = "tracing")]
            {
                if !found {
                    tracing::debug!(path = %p, "auxiliary path missing, not staged");
                }
            }
            found
        })
        .cloned()
        .collect()
}

fn artifact_error(artifact: &TrackedArtifact, e: std::io::Error) -> ExecError {
    ExecError::Artifact(format!("{}: {e}", artifact.path().display()))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
