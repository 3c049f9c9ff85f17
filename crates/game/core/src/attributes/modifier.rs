//! Modifiers (power-ups) contributing to composed attributes.

use super::{AttributeId, stats};

/// How a modifier contributes to its target.
///
/// Evaluation order is fixed: every additive term is summed onto the base
/// before any multiplicative term is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierOp {
    /// Added to the base (e.g. +20 strength from an item option).
    Additive,
    /// Applied as `× (1 + value)` (e.g. 0.5 = +50%).
    Multiplicative,
}

/// Where the modifier's value comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    Constant(f64),
    /// Current value of another attribute of the same actor, scaled by `factor`.
    ///
    /// Creates a dependency edge `attribute -> target`.
    Attribute { attribute: AttributeId, factor: f64 },
}

/// Minimum value another attribute must reach before the modifier applies.
///
/// Used for level-dependent item options and skill boosts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierGate {
    pub attribute: AttributeId,
    pub minimum: f64,
}

/// A single contribution to a composed attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub target: AttributeId,
    pub op: ModifierOp,
    pub source: ModifierSource,
    pub gate: Option<ModifierGate>,
}

impl Modifier {
    /// Constant additive bonus.
    pub fn additive(target: AttributeId, value: f64) -> Self {
        Self {
            target,
            op: ModifierOp::Additive,
            source: ModifierSource::Constant(value),
            gate: None,
        }
    }

    /// Constant multiplicative bonus (`0.5` = +50%).
    pub fn multiplicative(target: AttributeId, value: f64) -> Self {
        Self {
            target,
            op: ModifierOp::Multiplicative,
            source: ModifierSource::Constant(value),
            gate: None,
        }
    }

    /// Bonus equal to `factor × value(attribute)`.
    pub fn derived(target: AttributeId, op: ModifierOp, attribute: AttributeId, factor: f64) -> Self {
        Self {
            target,
            op,
            source: ModifierSource::Attribute { attribute, factor },
            gate: None,
        }
    }

    /// Only applies while the actor's level is at least `minimum`.
    pub fn with_minimum_level(self, minimum: u32) -> Self {
        self.requires(stats::LEVEL, f64::from(minimum))
    }

    /// Only applies while `attribute` is at least `minimum`.
    pub fn requires(mut self, attribute: AttributeId, minimum: f64) -> Self {
        self.gate = Some(ModifierGate { attribute, minimum });
        self
    }

    /// Attributes whose values this modifier reads.
    pub fn references(&self) -> impl Iterator<Item = AttributeId> {
        let source = match self.source {
            ModifierSource::Constant(_) => None,
            ModifierSource::Attribute { attribute, .. } => Some(attribute),
        };
        source
            .into_iter()
            .chain(self.gate.map(|gate| gate.attribute))
    }
}

/// Handle identifying one attached modifier inside an attribute set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierKey(pub(crate) u64);
