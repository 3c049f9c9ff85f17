//! Restoration of "current" pools toward their maximum.

use super::{AttributeId, AttributeSet};

/// A (rate, current, maximum) triple.
///
/// One step moves `current` to `min(maximum, current + rate × maximum)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenerationRule {
    pub rate: AttributeId,
    pub current: AttributeId,
    pub maximum: AttributeId,
}

/// What a single regeneration step did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegenerationStep {
    /// Nothing was written.
    Skipped,
    Restored { from: f64, to: f64 },
}

impl RegenerationStep {
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

impl RegenerationRule {
    pub const fn new(rate: AttributeId, current: AttributeId, maximum: AttributeId) -> Self {
        Self {
            rate,
            current,
            maximum,
        }
    }

    /// Applies one step to `attributes`.
    ///
    /// Skipped when the maximum is missing or not positive, or when the step
    /// would not change the current value. A current value above maximum is
    /// clamped down.
    pub fn apply(&self, attributes: &mut AttributeSet) -> RegenerationStep {
        let maximum = attributes.value(self.maximum);
        if maximum <= 0.0 {
            return RegenerationStep::Skipped;
        }

        let current = attributes.value(self.current);
        if current == maximum {
            return RegenerationStep::Skipped;
        }

        let rate = attributes.value(self.rate);
        let next = (current + rate * maximum).min(maximum);
        if next == current {
            return RegenerationStep::Skipped;
        }

        if !attributes.set_value(self.current, next) {
            return RegenerationStep::Skipped;
        }
        RegenerationStep::Restored {
            from: current,
            to: next,
        }
    }
}
