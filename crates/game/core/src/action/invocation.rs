use crate::skill::SkillId;
use crate::state::{EntityId, Position, Rotation};

use super::InvocationError;

/// One request to use a skill, as decoded from a client packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillInvocation {
    pub actor: EntityId,
    pub skill: SkillId,
    /// Center of the target area.
    pub center: Position,
    pub rotation: Rotation,
    pub extra_target: Option<EntityId>,
}

impl SkillInvocation {
    pub fn new(actor: EntityId, skill: SkillId, center: Position) -> Self {
        Self {
            actor,
            skill,
            center,
            rotation: Rotation::default(),
            extra_target: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the explicit extra target; the `0xFFFF` sentinel clears it.
    pub fn with_extra_target(mut self, target: EntityId) -> Self {
        self.extra_target = target.non_sentinel();
        self
    }
}

/// What an invocation did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvocationOutcome {
    /// The cost was paid and the invocation was carried through.
    pub resources_consumed: bool,
    /// Targets an application was attempted on, failed ones included.
    pub targets_attempted: usize,
    pub targets_hit: usize,
    pub rejection: Option<InvocationError>,
}

impl InvocationOutcome {
    pub fn rejected(error: InvocationError) -> Self {
        Self {
            rejection: Some(error),
            ..Self::default()
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}
