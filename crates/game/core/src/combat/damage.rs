//! Damage computation seam.

use crate::attributes::{AttributeView, stats};
use crate::skill::Skill;

/// Damage about to be applied to a single defender.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub damage: f64,
}

impl Hit {
    pub const MISS: Self = Self { damage: 0.0 };

    pub fn new(damage: f64) -> Self {
        Self {
            damage: damage.max(0.0),
        }
    }
}

/// Computes the damage of one skill hit from attacker and defender values.
///
/// The attacker view is the snapshot taken right after the skill was paid
/// for; the defender view is read under the defender's lock.
pub trait DamageFormula: Send + Sync {
    fn compute(&self, skill: &Skill, attacker: &dyn AttributeView, defender: &dyn AttributeView) -> Hit;
}

/// Deterministic formula using the standard damage channels.
///
/// ```text
/// base    = (min_phys + max_phys) / 2 + attack_damage_increase
/// raw     = base × skill.damage_multiplier × (1 + skill_multiplier)
/// reduced = (raw - defense) × (1 - damage_receive_decrement)
/// damage  = floor(max(reduced, 0))
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SkillDamageFormula;

impl DamageFormula for SkillDamageFormula {
    fn compute(&self, skill: &Skill, attacker: &dyn AttributeView, defender: &dyn AttributeView) -> Hit {
        let base = (attacker.value(stats::MINIMUM_PHYS_BASE_DMG)
            + attacker.value(stats::MAXIMUM_PHYS_BASE_DMG))
            / 2.0
            + attacker.value(stats::ATTACK_DAMAGE_INCREASE);
        let raw = base * skill.damage_multiplier * (1.0 + attacker.value(stats::SKILL_MULTIPLIER));

        let decrement = defender.value(stats::DAMAGE_RECEIVE_DECREMENT).clamp(0.0, 1.0);
        let reduced = (raw - defender.value(stats::DEFENSE_BASE)) * (1.0 - decrement);

        Hit::new(reduced.max(0.0).floor())
    }
}
