use std::fmt;

use crate::attributes::{AttributeId, AttributeView};

/// Numeric skill number as sent by clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u16);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

/// How a skill is resolved when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillKind {
    /// Single target hit.
    DirectHit,
    /// Area skill; the server finds and hits every target in range.
    AreaSkillAutomaticHits,
    /// Area skill; the client reports each hit separately.
    AreaSkillExplicitHits,
    Buff,
    /// Permanent bonus that is never cast.
    PassiveBoost,
}

impl SkillKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn is_passive(self) -> bool {
        matches!(self, Self::PassiveBoost)
    }

    /// Whether the pipeline resolves area targets for this kind.
    pub fn resolves_area_targets(self) -> bool {
        matches!(self, Self::AreaSkillAutomaticHits)
    }
}

/// Amount of an attribute (typically current mana or ability) paid per use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub attribute: AttributeId,
    pub amount: f64,
}

/// Minimum attribute value needed to learn a skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirement {
    pub attribute: AttributeId,
    pub minimum: f64,
}

impl Requirement {
    pub fn is_met(&self, attributes: &impl AttributeView) -> bool {
        attributes.value(self.attribute) >= self.minimum
    }
}

/// Immutable skill definition shared by every actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    pub costs: Vec<ResourceCost>,
    /// Radius of the target area in tiles.
    pub range: u8,
    pub damage_multiplier: f64,
    pub requirements: Vec<Requirement>,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            costs: Vec::new(),
            range: 0,
            damage_multiplier: 1.0,
            requirements: Vec::new(),
        }
    }

    pub fn with_cost(mut self, attribute: AttributeId, amount: f64) -> Self {
        self.costs.push(ResourceCost { attribute, amount });
        self
    }

    pub fn with_range(mut self, range: u8) -> Self {
        self.range = range;
        self
    }

    pub fn with_damage_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_multiplier = multiplier;
        self
    }

    pub fn with_requirement(mut self, attribute: AttributeId, minimum: f64) -> Self {
        self.requirements.push(Requirement { attribute, minimum });
        self
    }

    /// First requirement `attributes` does not satisfy.
    pub fn unmet_requirement(&self, attributes: &impl AttributeView) -> Option<&Requirement> {
        self.requirements.iter().find(|r| !r.is_met(attributes))
    }
}
