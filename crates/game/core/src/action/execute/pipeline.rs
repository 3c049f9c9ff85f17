use crate::action::{InvocationError, SkillInvocation};
use crate::attributes::AttributeSnapshot;
use crate::combat::{self, TargetArea, TargetRequest};
use crate::config::GameConfig;
use crate::skill::{Skill, SkillCatalog};
use crate::state::{Actor, MapId};

use super::validate;

/// An invocation whose cost has been paid.
#[derive(Clone, Debug)]
pub struct PreparedInvocation<'a> {
    pub skill: &'a Skill,
    /// Attacker values right after payment; used for every hit.
    pub attacker: AttributeSnapshot,
    /// Map the attacker was on when paying.
    pub map: MapId,
}

/// Validates the invocation and pays the skill's cost.
///
/// Must run while the caller holds exclusive access to `actor`. On error the
/// actor is untouched.
pub fn prepare<'a>(
    actor: &mut Actor,
    catalog: &'a SkillCatalog,
    invocation: &SkillInvocation,
) -> Result<PreparedInvocation<'a>, InvocationError> {
    let skill = validate(actor, catalog, invocation)?;
    combat::consume(&mut actor.attributes, &skill.costs)?;

    Ok(PreparedInvocation {
        skill,
        attacker: actor.attributes.snapshot(),
        map: actor.map,
    })
}

/// Area resolution parameters, or `None` for skills whose hits are not
/// resolved by the server.
pub fn target_request(
    invocation: &SkillInvocation,
    skill: &Skill,
    config: &GameConfig,
) -> Option<TargetRequest> {
    if !skill.kind.resolves_area_targets() {
        return None;
    }

    Some(TargetRequest {
        attacker: invocation.actor,
        area: TargetArea::new(invocation.center, skill.range.min(GameConfig::MAX_SKILL_RANGE)),
        extra_target: invocation.extra_target,
        hits_players: config.area_skill_hits_players,
    })
}
