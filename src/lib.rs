#![forbid(unsafe_code)]
//! commit-canvas: synthetic contribution history for git repositories.
//!
//! Facade over the workspace crates, used by the integration tests and benches.

pub use canvas_core;
pub use canvas_exec;
pub use canvas_plan;
pub use canvas_vcs;
