#![forbid(unsafe_code)]
//! canvas-core: shared types for the commit-canvas workspace.
//!
//! Responsibilities:
//! - Calendar model (`WeekdayDistribution`, `DateRange`).
//! - Immutable run configuration resolved from a `KEY=VALUE` env file.
//! - Canonical error type, stable hashing, and the run manifest.
//!
//! **No process spawning, no terminal IO** here. Higher crates drive git and
//! the console.

pub mod calendar;
pub mod config;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod prelude;

/// Tool version recorded in run manifests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
