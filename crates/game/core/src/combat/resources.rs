//! All-or-nothing payment of skill costs.

use std::fmt;

use crate::attributes::{AttributeId, AttributeSet};
use crate::skill::ResourceCost;

/// First cost that could not be paid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceShortfall {
    pub attribute: AttributeId,
    pub required: f64,
    pub available: f64,
}

impl fmt::Display for ResourceShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requires {} but only {} is available",
            self.attribute, self.required, self.available
        )
    }
}

/// Deducts every cost from `attributes`.
///
/// All costs are checked before anything is deducted, so on error the set is
/// untouched.
pub fn consume(attributes: &mut AttributeSet, costs: &[ResourceCost]) -> Result<(), ResourceShortfall> {
    for (i, cost) in costs.iter().enumerate() {
        let available = attributes.value(cost.attribute);
        // Earlier costs on the same pool count against it too.
        let required: f64 = costs[..=i]
            .iter()
            .filter(|c| c.attribute == cost.attribute)
            .map(|c| c.amount)
            .sum();
        if available < required {
            return Err(ResourceShortfall {
                attribute: cost.attribute,
                required,
                available,
            });
        }
    }

    for cost in costs {
        let remaining = attributes.value(cost.attribute) - cost.amount;
        attributes.set_value(cost.attribute, remaining);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Modifier, stats};

    fn pools(mana: f64, ability: f64) -> AttributeSet {
        let mut set = AttributeSet::new();
        set.set_base(stats::CURRENT_MANA, mana);
        set.set_base(stats::CURRENT_ABILITY, ability);
        set
    }

    fn cost(attribute: AttributeId, amount: f64) -> ResourceCost {
        ResourceCost { attribute, amount }
    }

    #[test]
    fn deducts_every_cost() {
        let mut set = pools(100.0, 20.0);
        consume(
            &mut set,
            &[cost(stats::CURRENT_MANA, 30.0), cost(stats::CURRENT_ABILITY, 5.0)],
        )
        .unwrap();

        assert_eq!(set.value(stats::CURRENT_MANA), 70.0);
        assert_eq!(set.value(stats::CURRENT_ABILITY), 15.0);
    }

    #[test]
    fn shortfall_leaves_every_pool_untouched() {
        let mut set = pools(100.0, 2.0);
        let err = consume(
            &mut set,
            &[cost(stats::CURRENT_MANA, 30.0), cost(stats::CURRENT_ABILITY, 5.0)],
        )
        .unwrap_err();

        assert_eq!(err.attribute, stats::CURRENT_ABILITY);
        assert_eq!(set.value(stats::CURRENT_MANA), 100.0);
        assert_eq!(set.value(stats::CURRENT_ABILITY), 2.0);
    }

    #[test]
    fn repeated_costs_on_one_pool_are_summed() {
        let mut set = pools(50.0, 0.0);
        let err = consume(
            &mut set,
            &[cost(stats::CURRENT_MANA, 30.0), cost(stats::CURRENT_MANA, 30.0)],
        )
        .unwrap_err();

        assert_eq!(err.required, 60.0);
        assert_eq!(set.value(stats::CURRENT_MANA), 50.0);
    }

    #[test]
    fn modified_pool_pays_exactly_the_cost() {
        let mut set = pools(100.0, 0.0);
        set.add_modifier(Modifier::additive(stats::CURRENT_MANA, 20.0))
            .unwrap();
        set.add_modifier(Modifier::multiplicative(stats::CURRENT_MANA, 0.5))
            .unwrap();
        assert_eq!(set.value(stats::CURRENT_MANA), 180.0);

        consume(&mut set, &[cost(stats::CURRENT_MANA, 60.0)]).unwrap();

        assert_eq!(set.value(stats::CURRENT_MANA), 120.0);
    }

    #[test]
    fn exact_amount_can_be_paid() {
        let mut set = pools(30.0, 0.0);
        consume(&mut set, &[cost(stats::CURRENT_MANA, 30.0)]).unwrap();
        assert_eq!(set.value(stats::CURRENT_MANA), 0.0);
    }
}
