//! Convenient re-exports for downstream crates.

pub use crate::calendar::{DateRange, WeekdayDistribution};
pub use crate::config::{CanvasConfig, EnvFile};
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::manifest::{ManifestId, RunManifest};
