//! Live actor state.
//!
//! An [`Actor`] owns its composed attributes and learned skills. The runtime
//! keeps each actor behind its own lock, so everything here is plain `&mut`
//! mutation.

use std::fmt;

use crate::attributes::{AttributeSet, RegenerationRule, stats};
use crate::skill::{LearnError, Skill, SkillList};

use super::{EntityId, MapId, Position};

/// Player-type or monster-type entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player,
    Monster,
}

impl ActorKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}

/// Connection state of an actor relative to its map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Presence {
    Offline,
    /// Loaded but the client has not finished entering the map.
    EnteringWorld,
    #[default]
    InWorld,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// A player or monster with its live numeric state.
#[derive(Clone, Debug)]
pub struct Actor {
    pub id: EntityId,
    pub kind: ActorKind,
    pub name: String,
    pub map: MapId,
    pub position: Position,
    pub attributes: AttributeSet,
    pub skills: SkillList,
    pub presence: Presence,
    pub life: LifeState,
}

impl Actor {
    pub fn new(id: EntityId, kind: ActorKind, name: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            map: MapId(0),
            position: Position::ORIGIN,
            attributes,
            skills: SkillList::new(),
            presence: Presence::default(),
            life: LifeState::default(),
        }
    }

    pub fn at(mut self, map: MapId, position: Position) -> Self {
        self.map = map;
        self.position = position;
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_skills(mut self, skills: SkillList) -> Self {
        self.skills = skills;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_in_world(&self) -> bool {
        self.presence == Presence::InWorld
    }

    /// Alive and fully entered into its map.
    pub fn can_use_skills(&self) -> bool {
        self.is_alive() && self.is_in_world()
    }

    pub fn health(&self) -> f64 {
        self.attributes.value(stats::CURRENT_HEALTH)
    }

    /// Applies one step of every rule. Dead actors are skipped.
    ///
    /// Returns how many values were written.
    pub fn regenerate(&mut self, rules: &[RegenerationRule]) -> usize {
        if !self.is_alive() {
            return 0;
        }
        rules
            .iter()
            .filter(|rule| rule.apply(&mut self.attributes).wrote())
            .count()
    }

    /// Recovery granted to the attacker after it killed a monster.
    pub fn recover_after_kill(&mut self) -> usize {
        self.regenerate(stats::after_kill_regeneration_rules())
    }

    /// Adds `skill` to the learned skills, returning its slot.
    ///
    /// # Errors
    ///
    /// - `NotInWorld` if the actor has not entered its map
    /// - `RequirementNotMet` for the first requirement the actor does not meet
    /// - `AlreadyLearned` if the skill is already in the list
    pub fn learn_skill(&mut self, skill: &Skill) -> Result<usize, LearnError> {
        if !self.is_in_world() {
            return Err(LearnError::NotInWorld);
        }
        if let Some(requirement) = skill.unmet_requirement(&self.attributes) {
            return Err(LearnError::RequirementNotMet {
                attribute: requirement.attribute,
                minimum: requirement.minimum,
                actual: self.attributes.value(requirement.attribute),
            });
        }
        self.skills
            .add(skill.id)
            .ok_or(LearnError::AlreadyLearned(skill.id))
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} '{}'", self.kind.as_str(), self.id, self.name)
    }
}
