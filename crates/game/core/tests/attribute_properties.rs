//! Property tests for the composed attribute graph and regeneration.

use proptest::prelude::*;
use realm_core::attributes::{AttributeId, AttributeSet, Modifier, ModifierOp, stats};

const CHAIN: [AttributeId; 4] = [
    stats::BASE_ENERGY,
    stats::TOTAL_ENERGY,
    stats::MAXIMUM_MANA,
    stats::MANA_RECOVERY,
];

fn op_strategy() -> impl Strategy<Value = ModifierOp> {
    prop_oneof![Just(ModifierOp::Additive), Just(ModifierOp::Multiplicative)]
}

fn constant_strategy() -> impl Strategy<Value = (ModifierOp, f64)> {
    (op_strategy(), -2.0f64..2.0).prop_map(|(op, value)| match op {
        ModifierOp::Additive => (op, value * 100.0),
        ModifierOp::Multiplicative => (op, value),
    })
}

fn constant(target: AttributeId, (op, value): (ModifierOp, f64)) -> Modifier {
    match op {
        ModifierOp::Additive => Modifier::additive(target, value),
        ModifierOp::Multiplicative => Modifier::multiplicative(target, value),
    }
}

/// BASE_ENERGY -> TOTAL_ENERGY -> MAXIMUM_MANA -> MANA_RECOVERY
fn chained_set(base: f64) -> AttributeSet {
    let mut set = AttributeSet::new();
    set.set_base(CHAIN[0], base);
    for pair in CHAIN.windows(2) {
        set.add_modifier(Modifier::derived(pair[1], ModifierOp::Additive, pair[0], 1.5))
            .unwrap();
    }
    set
}

proptest! {
    #[test]
    fn add_then_remove_restores_every_value(
        base in -500.0f64..500.0,
        existing in prop::collection::vec((0usize..4, constant_strategy()), 0..8),
        target in 0usize..4,
        extra in constant_strategy(),
    ) {
        let mut set = chained_set(base);
        for (slot, term) in existing {
            set.add_modifier(constant(CHAIN[slot], term)).unwrap();
        }
        let before: Vec<_> = set.iter().collect();

        let key = set.add_modifier(constant(CHAIN[target], extra)).unwrap();
        set.remove_modifier(key).unwrap();

        prop_assert_eq!(set.iter().collect::<Vec<_>>(), before);
    }

    #[test]
    fn closing_the_chain_is_always_rejected(
        from in 1usize..4,
        factor in -3.0f64..3.0,
    ) {
        let mut set = chained_set(10.0);
        let before: Vec<_> = set.iter().collect();

        // Every later link transitively reads the first one.
        let result = set.add_modifier(Modifier::derived(
            CHAIN[0],
            ModifierOp::Additive,
            CHAIN[from],
            factor,
        ));

        prop_assert!(result.is_err());
        prop_assert_eq!(set.iter().collect::<Vec<_>>(), before);
    }

    #[test]
    fn regeneration_never_exceeds_maximum(
        rate in 0.0f64..2.0,
        maximum in 0.0f64..10_000.0,
        fill in 0.0f64..2.0,
        ticks in 1usize..5,
    ) {
        let mut set = AttributeSet::new();
        set.set_base(stats::HEALTH_RECOVERY, rate);
        set.set_base(stats::MAXIMUM_HEALTH, maximum);
        set.set_base(stats::CURRENT_HEALTH, maximum * fill);

        for _ in 0..ticks {
            for rule in stats::interval_regeneration_rules() {
                rule.apply(&mut set);
            }
            prop_assert!(set.value(stats::CURRENT_HEALTH) <= set.value(stats::MAXIMUM_HEALTH));
        }
    }

    #[test]
    fn regeneration_of_modified_pool_never_exceeds_maximum(
        rate in 0.0f64..2.0,
        maximum in 1.0f64..10_000.0,
        base in 0.0f64..10_000.0,
        additive in -500.0f64..500.0,
        multiplicative in -0.9f64..2.0,
        ticks in 1usize..5,
    ) {
        let mut set = AttributeSet::new();
        set.set_base(stats::MANA_RECOVERY, rate);
        set.set_base(stats::MAXIMUM_MANA, maximum);
        set.set_base(stats::CURRENT_MANA, base);
        set.add_modifier(Modifier::additive(stats::CURRENT_MANA, additive)).unwrap();
        set.add_modifier(Modifier::multiplicative(stats::CURRENT_MANA, multiplicative)).unwrap();

        for _ in 0..ticks {
            for rule in stats::interval_regeneration_rules() {
                rule.apply(&mut set);
            }
        }

        let current = set.value(stats::CURRENT_MANA);
        let maximum = set.value(stats::MAXIMUM_MANA);
        prop_assert!(current <= maximum + maximum * 1e-9, "{current} > {maximum}");
    }
}

#[test]
fn composition_example() {
    let mut set = AttributeSet::new();
    set.set_base(stats::TOTAL_STRENGTH, 100.0);
    set.add_modifier(Modifier::additive(stats::TOTAL_STRENGTH, 20.0))
        .unwrap();
    set.add_modifier(Modifier::multiplicative(stats::TOTAL_STRENGTH, 0.5))
        .unwrap();

    assert_eq!(set.value(stats::TOTAL_STRENGTH), 180.0);
}
