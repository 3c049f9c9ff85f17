//! Skill invocations.
//!
//! The synchronous half of the skill action pipeline lives here: validating
//! an invocation against the invoking actor and paying its cost. Target
//! resolution, per-target application and the broadcast are orchestrated by
//! the runtime, which owns the locks and the observer channels.

mod error;
mod execute;
mod invocation;

pub use error::InvocationError;
pub use execute::{PipelineStage, PreparedInvocation, prepare, target_request, validate};
pub use invocation::{InvocationOutcome, SkillInvocation};
