//! Pre-consumption checks.

use crate::action::{InvocationError, SkillInvocation};
use crate::skill::{Skill, SkillCatalog};
use crate::state::Actor;

/// Checks that `actor` may use the invoked skill right now.
///
/// Mutates nothing.
pub fn validate<'a>(
    actor: &Actor,
    catalog: &'a SkillCatalog,
    invocation: &SkillInvocation,
) -> Result<&'a Skill, InvocationError> {
    let skill = catalog
        .get(invocation.skill)
        .ok_or(InvocationError::UnknownSkill(invocation.skill))?;

    if !actor.skills.contains(skill.id) {
        return Err(InvocationError::SkillNotLearned(skill.id));
    }
    if skill.kind.is_passive() {
        return Err(InvocationError::PassiveSkill(skill.id));
    }
    if !actor.is_alive() {
        return Err(InvocationError::ActorDead);
    }
    if !actor.is_in_world() {
        return Err(InvocationError::NotInWorld);
    }

    Ok(skill)
}
