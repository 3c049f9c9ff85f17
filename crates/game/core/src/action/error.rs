//! Invocation rejection errors.

use crate::attributes::AttributeId;
use crate::combat::ResourceShortfall;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::SkillId;
use crate::state::EntityId;

use super::PipelineStage;

/// Why an invocation was rejected before any effect was applied.
///
/// A rejected invocation mutates nothing and is never broadcast.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvocationError {
    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("{0} is not in the skill catalog")]
    UnknownSkill(SkillId),

    #[error("{0} has not been learned")]
    SkillNotLearned(SkillId),

    #[error("{0} is a passive skill and cannot be used")]
    PassiveSkill(SkillId),

    #[error("actor is not in the world")]
    NotInWorld,

    #[error("actor is dead")]
    ActorDead,

    #[error("insufficient {attribute}: requires {required}, has {available}")]
    InsufficientResources {
        attribute: AttributeId,
        required: f64,
        available: f64,
    },
}

impl InvocationError {
    /// Stage the invocation was rejected in.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::InsufficientResources { .. } => PipelineStage::ResourceConsumption,
            _ => PipelineStage::Validating,
        }
    }
}

impl From<ResourceShortfall> for InvocationError {
    fn from(shortfall: ResourceShortfall) -> Self {
        Self::InsufficientResources {
            attribute: shortfall.attribute,
            required: shortfall.required,
            available: shortfall.available,
        }
    }
}

impl GameError for InvocationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResources { .. } | Self::ActorDead | Self::NotInWorld => {
                ErrorSeverity::Recoverable
            }
            Self::ActorNotFound(_)
            | Self::UnknownSkill(_)
            | Self::SkillNotLearned(_)
            | Self::PassiveSkill(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "INVOCATION_ACTOR_NOT_FOUND",
            Self::UnknownSkill(_) => "INVOCATION_UNKNOWN_SKILL",
            Self::SkillNotLearned(_) => "INVOCATION_SKILL_NOT_LEARNED",
            Self::PassiveSkill(_) => "INVOCATION_PASSIVE_SKILL",
            Self::NotInWorld => "INVOCATION_NOT_IN_WORLD",
            Self::ActorDead => "INVOCATION_ACTOR_DEAD",
            Self::InsufficientResources { .. } => "INVOCATION_INSUFFICIENT_RESOURCES",
        }
    }
}
