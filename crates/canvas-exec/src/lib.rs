#![forbid(unsafe_code)]
//! canvas-exec: commit materializer, progress reporting, and metrics.
//!
//! The runtime walks a `SimulationPlan` strictly in order, one blocking
//! repository call at a time, and emits a `RunManifest` when finished.

pub mod artifact;
pub mod digest;
pub mod metrics;
pub mod progress;
pub mod runtime;

pub use artifact::TrackedArtifact;
pub use progress::{format_seconds, ProgressFrame, ProgressReporter};
pub use runtime::{ExecError, Materializer, RunState};
