//! Validation and resource consumption of a skill invocation.
//!
//! ## Stages
//!
//! ```text
//! Idle → Validating → ResourceConsumption → TargetResolution → Applying → Broadcasting → Idle
//! ```
//!
//! [`prepare`] covers the first two stages and is the only all-or-nothing
//! boundary: once it returns `Ok` the cost has been paid and the invocation
//! is committed, even if no target is found.

mod pipeline;
mod validation;

pub use pipeline::{PreparedInvocation, prepare, target_request};
pub use validation::validate;

/// Stage of the skill action pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PipelineStage {
    Idle,
    Validating,
    ResourceConsumption,
    TargetResolution,
    Applying,
    Broadcasting,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
