use crate::attributes::AttributeId;
use crate::error::{ErrorSeverity, GameError};

use super::SkillId;

/// Why an actor could not learn a skill.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LearnError {
    #[error("actor is not in the world")]
    NotInWorld,

    #[error("{0} is not in the skill catalog")]
    UnknownSkill(SkillId),

    #[error("{0} is already learned")]
    AlreadyLearned(SkillId),

    #[error("requirement not met: {attribute} must be at least {minimum}, is {actual}")]
    RequirementNotMet {
        attribute: AttributeId,
        minimum: f64,
        actual: f64,
    },
}

impl GameError for LearnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInWorld => "LEARN_NOT_IN_WORLD",
            Self::UnknownSkill(_) => "LEARN_UNKNOWN_SKILL",
            Self::AlreadyLearned(_) => "LEARN_ALREADY_LEARNED",
            Self::RequirementNotMet { .. } => "LEARN_REQUIREMENT_NOT_MET",
        }
    }
}
