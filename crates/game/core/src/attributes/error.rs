//! Attribute registry and graph errors.

use crate::error::{ErrorSeverity, GameError};

use super::{AttributeId, ModifierKey};

/// Errors raised while building the attribute catalog or mutating a
/// composed attribute graph.
///
/// Duplicate definitions and cycles are content defects: they are expected
/// only while loading the hand-authored tables at startup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("attribute definition {0} is already registered")]
    DuplicateDefinition(AttributeId),

    #[error("attribute definition {0} is not registered")]
    UnknownDefinition(AttributeId),

    #[error("modifier on {target} referencing {dependency} would create a dependency cycle")]
    CyclicDependency {
        target: AttributeId,
        dependency: AttributeId,
    },

    #[error("modifier {0:?} is not attached to this attribute set")]
    UnknownModifier(ModifierKey),
}

impl GameError for AttributeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateDefinition(_) | Self::CyclicDependency { .. } => ErrorSeverity::Fatal,
            Self::UnknownDefinition(_) => ErrorSeverity::Validation,
            Self::UnknownModifier(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateDefinition(_) => "ATTRIBUTE_DUPLICATE_DEFINITION",
            Self::UnknownDefinition(_) => "ATTRIBUTE_UNKNOWN_DEFINITION",
            Self::CyclicDependency { .. } => "ATTRIBUTE_CYCLIC_DEPENDENCY",
            Self::UnknownModifier(_) => "ATTRIBUTE_UNKNOWN_MODIFIER",
        }
    }
}
