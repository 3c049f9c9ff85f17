//! Composed attribute graph of a single actor.
//!
//! Every attribute is a node in an arena addressed by a stable index. A node
//! holds its base value, its ordered modifiers and the cached result of
//!
//! ```text
//! value = (base + Σ additive) × Π (1 + multiplicative)
//! ```
//!
//! Modifiers that read other attributes add an edge `dependency -> target`
//! to the dependency's adjacency list. Edges are only inserted after a
//! reachability check, so the graph stays acyclic and every mutation can
//! recompute the affected nodes eagerly in topological order. Reads are a
//! single lookup and never compute anything.

use std::collections::HashMap;

use super::{
    AttributeError, AttributeId, AttributeRegistry, ClassTemplate, Modifier, ModifierKey,
    ModifierOp, ModifierSource,
};

/// Read access to attribute values, implemented by live sets and snapshots.
pub trait AttributeView {
    /// Current value, `0.0` for attributes the actor does not have.
    fn value(&self, id: AttributeId) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeIndex(usize);

#[derive(Clone, Debug)]
struct AttributeNode {
    definition: AttributeId,
    base: f64,
    modifiers: Vec<(ModifierKey, Modifier)>,
    value: f64,
    /// Nodes reading this node's value, one entry per referencing modifier.
    dependents: Vec<NodeIndex>,
}

impl AttributeNode {
    fn new(definition: AttributeId) -> Self {
        Self {
            definition,
            base: 0.0,
            modifiers: Vec::new(),
            value: 0.0,
            dependents: Vec::new(),
        }
    }
}

/// All composed attributes of one actor.
#[derive(Clone, Debug, Default)]
pub struct AttributeSet {
    nodes: Vec<AttributeNode>,
    index: HashMap<AttributeId, NodeIndex>,
    owners: HashMap<ModifierKey, NodeIndex>,
    next_key: u64,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates the attributes described by a class template.
    ///
    /// # Errors
    ///
    /// - `UnknownDefinition` if the template references an unregistered attribute
    /// - `CyclicDependency` if the template's relationships form a cycle
    pub fn from_template(
        registry: &AttributeRegistry,
        template: &ClassTemplate,
    ) -> Result<Self, AttributeError> {
        template.validate(registry)?;

        let mut set = Self::new();
        for &(id, base) in &template.base_values {
            set.set_base(id, base);
        }
        for modifier in &template.relationships {
            set.add_modifier(*modifier)?;
        }
        Ok(set)
    }

    /// Cached value of `id`; `0.0` for attributes the actor does not have.
    pub fn value(&self, id: AttributeId) -> f64 {
        self.try_value(id).unwrap_or(0.0)
    }

    /// Cached value of `id`, or `None` if the actor has no such attribute.
    pub fn try_value(&self, id: AttributeId) -> Option<f64> {
        self.index.get(&id).map(|idx| self.nodes[idx.0].value)
    }

    pub fn base(&self, id: AttributeId) -> Option<f64> {
        self.index.get(&id).map(|idx| self.nodes[idx.0].base)
    }

    pub fn contains(&self, id: AttributeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Modifiers attached to `id`, in insertion order.
    pub fn modifiers(&self, id: AttributeId) -> impl Iterator<Item = (ModifierKey, &Modifier)> {
        self.index
            .get(&id)
            .into_iter()
            .flat_map(|idx| self.nodes[idx.0].modifiers.iter())
            .map(|(key, modifier)| (*key, modifier))
    }

    /// Iterates `(attribute, value)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, f64)> + '_ {
        self.nodes.iter().map(|node| (node.definition, node.value))
    }

    /// Replaces the base value and recomputes every dependent attribute.
    pub fn set_base(&mut self, id: AttributeId, base: f64) {
        let idx = self.ensure_node(id);
        self.nodes[idx.0].base = base;
        self.propagate(idx);
    }

    /// Moves the composed value of `id` to `value` by solving for the base
    /// under the modifiers currently attached to it.
    ///
    /// Used for pools (current health, mana, ...) that are read through their
    /// modifiers but changed by absolute amounts. Returns `false` and leaves
    /// the set untouched if the modifiers pin the value (a `-100%` term).
    pub fn set_value(&mut self, id: AttributeId, value: f64) -> bool {
        let idx = self.ensure_node(id);
        let (additive, factor) = self.terms(idx);
        if factor == 0.0 {
            return false;
        }
        self.nodes[idx.0].base = value / factor - additive;
        self.propagate(idx);
        true
    }

    /// Attaches a modifier to its target attribute.
    ///
    /// Attributes referenced by the modifier that do not exist yet are
    /// created with a base of zero.
    ///
    /// # Errors
    ///
    /// `CyclicDependency` if the target is (transitively) read by one of the
    /// modifier's references. Nothing is mutated in that case.
    pub fn add_modifier(&mut self, modifier: Modifier) -> Result<ModifierKey, AttributeError> {
        for dependency in modifier.references() {
            if self.would_cycle(modifier.target, dependency) {
                return Err(AttributeError::CyclicDependency {
                    target: modifier.target,
                    dependency,
                });
            }
        }

        let target = self.ensure_node(modifier.target);
        for dependency in modifier.references() {
            let source = self.ensure_node(dependency);
            self.nodes[source.0].dependents.push(target);
        }

        let key = ModifierKey(self.next_key);
        self.next_key += 1;
        self.nodes[target.0].modifiers.push((key, modifier));
        self.owners.insert(key, target);

        self.propagate(target);
        Ok(key)
    }

    /// Detaches a previously added modifier and returns it.
    ///
    /// # Errors
    ///
    /// `UnknownModifier` if the key does not belong to this set.
    /// Like [`add_modifier`](Self::add_modifier), but first checks every
    /// attribute the modifier touches against `registry`.
    ///
    /// # Errors
    ///
    /// `UnknownDefinition` for an unregistered attribute, otherwise as
    /// `add_modifier`.
    pub fn add_registered_modifier(
        &mut self,
        registry: &AttributeRegistry,
        modifier: Modifier,
    ) -> Result<ModifierKey, AttributeError> {
        registry.validate_modifier(&modifier)?;
        self.add_modifier(modifier)
    }

    pub fn remove_modifier(&mut self, key: ModifierKey) -> Result<Modifier, AttributeError> {
        let target = *self
            .owners
            .get(&key)
            .ok_or(AttributeError::UnknownModifier(key))?;
        let position = self.nodes[target.0]
            .modifiers
            .iter()
            .position(|(k, _)| *k == key)
            .ok_or(AttributeError::UnknownModifier(key))?;

        self.owners.remove(&key);
        let (_, modifier) = self.nodes[target.0].modifiers.remove(position);

        for dependency in modifier.references() {
            if let Some(&source) = self.index.get(&dependency) {
                let dependents = &mut self.nodes[source.0].dependents;
                if let Some(edge) = dependents.iter().position(|d| *d == target) {
                    dependents.swap_remove(edge);
                }
            }
        }

        self.propagate(target);
        Ok(modifier)
    }

    /// Copies every current value.
    pub fn snapshot(&self) -> AttributeSnapshot {
        AttributeSnapshot {
            values: self.iter().collect(),
        }
    }

    fn ensure_node(&mut self, id: AttributeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(AttributeNode::new(id));
        self.index.insert(id, idx);
        idx
    }

    /// True if making `target` read `dependency` would close a cycle, i.e.
    /// `dependency` already (transitively) reads `target`.
    fn would_cycle(&self, target: AttributeId, dependency: AttributeId) -> bool {
        if target == dependency {
            return true;
        }
        match (self.index.get(&target), self.index.get(&dependency)) {
            (Some(&from), Some(&to)) => self.reaches(from, to),
            _ => false,
        }
    }

    fn reaches(&self, from: NodeIndex, to: NodeIndex) -> bool {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![from];
        visited[from.0] = true;

        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            for &next in &self.nodes[node.0].dependents {
                if !visited[next.0] {
                    visited[next.0] = true;
                    stack.push(next);
                }
            }
        }
        false
    }

    /// `start` and everything reading it, dependencies before dependents.
    fn topological_from(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![(start, 0usize)];
        visited[start.0] = true;

        while let Some(&(node, next)) = stack.last() {
            let dependents = &self.nodes[node.0].dependents;
            if let Some(&child) = dependents.get(next) {
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                if !visited[child.0] {
                    visited[child.0] = true;
                    stack.push((child, 0));
                }
            } else {
                stack.pop();
                order.push(node);
            }
        }

        order.reverse();
        order
    }

    fn propagate(&mut self, start: NodeIndex) {
        for idx in self.topological_from(start) {
            let value = self.evaluate(idx);
            self.nodes[idx.0].value = value;
        }
    }

    fn evaluate(&self, idx: NodeIndex) -> f64 {
        let (additive, factor) = self.terms(idx);
        (self.nodes[idx.0].base + additive) * factor
    }

    /// Open modifier terms of a node: `(Σ additive, Π (1 + multiplicative))`.
    fn terms(&self, idx: NodeIndex) -> (f64, f64) {
        let node = &self.nodes[idx.0];
        let mut sum = 0.0;
        let mut factor = 1.0;

        for (_, modifier) in &node.modifiers {
            if !self.gate_open(modifier) {
                continue;
            }
            let value = self.source_value(modifier);
            match modifier.op {
                ModifierOp::Additive => sum += value,
                ModifierOp::Multiplicative => factor *= 1.0 + value,
            }
        }

        (sum, factor)
    }

    fn source_value(&self, modifier: &Modifier) -> f64 {
        match modifier.source {
            ModifierSource::Constant(value) => value,
            ModifierSource::Attribute { attribute, factor } => {
                self.value(attribute) * factor
            }
        }
    }

    fn gate_open(&self, modifier: &Modifier) -> bool {
        modifier
            .gate
            .is_none_or(|gate| self.value(gate.attribute) >= gate.minimum)
    }
}

impl AttributeView for AttributeSet {
    fn value(&self, id: AttributeId) -> f64 {
        AttributeSet::value(self, id)
    }
}

/// Frozen copy of an actor's values, e.g. the attacker's state at the moment
/// a skill was paid for.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSnapshot {
    values: HashMap<AttributeId, f64>,
}

impl AttributeSnapshot {
    pub fn get(&self, id: AttributeId) -> Option<f64> {
        self.values.get(&id).copied()
    }
}

impl AttributeView for AttributeSnapshot {
    fn value(&self, id: AttributeId) -> f64 {
        self.get(id).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::stats;

    #[test]
    fn additive_terms_are_summed_before_multiplicative() {
        let mut set = AttributeSet::new();
        set.set_base(stats::TOTAL_STRENGTH, 100.0);
        // Inserted multiplicative first on purpose: order of insertion must not matter.
        set.add_modifier(Modifier::multiplicative(stats::TOTAL_STRENGTH, 0.5))
            .unwrap();
        set.add_modifier(Modifier::additive(stats::TOTAL_STRENGTH, 20.0))
            .unwrap();

        assert_eq!(set.value(stats::TOTAL_STRENGTH), 180.0);
    }

    #[test]
    fn set_value_solves_for_base_under_modifiers() {
        let mut set = AttributeSet::new();
        set.set_base(stats::CURRENT_MANA, 100.0);
        set.add_modifier(Modifier::additive(stats::CURRENT_MANA, 20.0))
            .unwrap();
        set.add_modifier(Modifier::multiplicative(stats::CURRENT_MANA, 0.5))
            .unwrap();
        assert_eq!(set.value(stats::CURRENT_MANA), 180.0);

        assert!(set.set_value(stats::CURRENT_MANA, 120.0));

        assert_eq!(set.value(stats::CURRENT_MANA), 120.0);
        assert_eq!(set.base(stats::CURRENT_MANA), Some(60.0));
    }

    #[test]
    fn set_value_refuses_pinned_attribute() {
        let mut set = AttributeSet::new();
        set.set_base(stats::CURRENT_SHIELD, 40.0);
        set.add_modifier(Modifier::multiplicative(stats::CURRENT_SHIELD, -1.0))
            .unwrap();

        assert!(!set.set_value(stats::CURRENT_SHIELD, 10.0));
        assert_eq!(set.base(stats::CURRENT_SHIELD), Some(40.0));
        assert_eq!(set.value(stats::CURRENT_SHIELD), 0.0);
    }

    #[test]
    fn multiplicative_terms_compound() {
        let mut set = AttributeSet::new();
        set.set_base(stats::MAXIMUM_HEALTH, 200.0);
        set.add_modifier(Modifier::multiplicative(stats::MAXIMUM_HEALTH, 0.5))
            .unwrap();
        set.add_modifier(Modifier::multiplicative(stats::MAXIMUM_HEALTH, -0.5))
            .unwrap();

        assert_eq!(set.value(stats::MAXIMUM_HEALTH), 150.0);
    }

    #[test]
    fn add_then_remove_restores_value() {
        let mut set = AttributeSet::new();
        set.set_base(stats::DEFENSE_BASE, 37.0);
        set.add_modifier(Modifier::multiplicative(stats::DEFENSE_BASE, 0.1))
            .unwrap();
        let before = set.value(stats::DEFENSE_BASE);

        let key = set
            .add_modifier(Modifier::additive(stats::DEFENSE_BASE, 13.0))
            .unwrap();
        assert_ne!(set.value(stats::DEFENSE_BASE), before);

        let removed = set.remove_modifier(key).unwrap();
        assert_eq!(removed, Modifier::additive(stats::DEFENSE_BASE, 13.0));
        assert_eq!(set.value(stats::DEFENSE_BASE), before);
    }

    #[test]
    fn removing_twice_fails() {
        let mut set = AttributeSet::new();
        let key = set
            .add_modifier(Modifier::additive(stats::LEVEL, 1.0))
            .unwrap();
        set.remove_modifier(key).unwrap();

        assert_eq!(
            set.remove_modifier(key).unwrap_err(),
            AttributeError::UnknownModifier(key)
        );
    }

    #[test]
    fn dependency_changes_propagate_transitively() {
        let mut set = AttributeSet::new();
        set.set_base(stats::BASE_VITALITY, 20.0);
        set.add_modifier(Modifier::derived(
            stats::TOTAL_VITALITY,
            ModifierOp::Additive,
            stats::BASE_VITALITY,
            1.0,
        ))
        .unwrap();
        set.set_base(stats::MAXIMUM_HEALTH, 35.0);
        set.add_modifier(Modifier::derived(
            stats::MAXIMUM_HEALTH,
            ModifierOp::Additive,
            stats::TOTAL_VITALITY,
            3.0,
        ))
        .unwrap();
        assert_eq!(set.value(stats::MAXIMUM_HEALTH), 95.0);

        // An item bonus on total vitality reaches maximum health immediately.
        let item = set
            .add_modifier(Modifier::additive(stats::TOTAL_VITALITY, 10.0))
            .unwrap();
        assert_eq!(set.value(stats::TOTAL_VITALITY), 30.0);
        assert_eq!(set.value(stats::MAXIMUM_HEALTH), 125.0);

        // Level up raises base vitality; both downstream values follow.
        set.set_base(stats::BASE_VITALITY, 25.0);
        assert_eq!(set.value(stats::MAXIMUM_HEALTH), 140.0);

        set.remove_modifier(item).unwrap();
        assert_eq!(set.value(stats::MAXIMUM_HEALTH), 110.0);
    }

    #[test]
    fn diamond_dependencies_see_final_values() {
        // level -> a, level -> b, a + b -> c
        let mut set = AttributeSet::new();
        set.set_base(stats::LEVEL, 1.0);
        for target in [stats::MINIMUM_PHYS_BASE_DMG, stats::MAXIMUM_PHYS_BASE_DMG] {
            set.add_modifier(Modifier::derived(target, ModifierOp::Additive, stats::LEVEL, 2.0))
                .unwrap();
        }
        for dependency in [stats::MINIMUM_PHYS_BASE_DMG, stats::MAXIMUM_PHYS_BASE_DMG] {
            set.add_modifier(Modifier::derived(
                stats::ATTACK_DAMAGE_INCREASE,
                ModifierOp::Additive,
                dependency,
                1.0,
            ))
            .unwrap();
        }

        set.set_base(stats::LEVEL, 10.0);
        assert_eq!(set.value(stats::ATTACK_DAMAGE_INCREASE), 40.0);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let mut set = AttributeSet::new();
        let result = set.add_modifier(Modifier::derived(
            stats::TOTAL_ENERGY,
            ModifierOp::Multiplicative,
            stats::TOTAL_ENERGY,
            0.1,
        ));

        assert!(matches!(result, Err(AttributeError::CyclicDependency { .. })));
        assert!(set.is_empty());
    }

    #[test]
    fn transitive_cycle_is_rejected_without_mutation() {
        let mut set = AttributeSet::new();
        set.set_base(stats::BASE_ENERGY, 15.0);
        set.add_modifier(Modifier::derived(
            stats::TOTAL_ENERGY,
            ModifierOp::Additive,
            stats::BASE_ENERGY,
            1.0,
        ))
        .unwrap();
        set.add_modifier(Modifier::derived(
            stats::MAXIMUM_MANA,
            ModifierOp::Additive,
            stats::TOTAL_ENERGY,
            2.0,
        ))
        .unwrap();
        let before: Vec<_> = set.iter().collect();

        let result = set.add_modifier(Modifier::derived(
            stats::BASE_ENERGY,
            ModifierOp::Additive,
            stats::MAXIMUM_MANA,
            0.01,
        ));

        assert_eq!(
            result.unwrap_err(),
            AttributeError::CyclicDependency {
                target: stats::BASE_ENERGY,
                dependency: stats::MAXIMUM_MANA,
            }
        );
        assert_eq!(set.iter().collect::<Vec<_>>(), before);
        assert_eq!(set.modifiers(stats::BASE_ENERGY).count(), 0);

        // The graph is still usable and edges were not left behind.
        set.set_base(stats::BASE_ENERGY, 20.0);
        assert_eq!(set.value(stats::MAXIMUM_MANA), 40.0);
    }

    #[test]
    fn gate_on_level_switches_modifier() {
        let mut set = AttributeSet::new();
        set.set_base(stats::LEVEL, 9.0);
        set.set_base(stats::DEFENSE_BASE, 10.0);
        set.add_modifier(Modifier::additive(stats::DEFENSE_BASE, 4.0).with_minimum_level(10))
            .unwrap();
        assert_eq!(set.value(stats::DEFENSE_BASE), 10.0);

        set.set_base(stats::LEVEL, 10.0);
        assert_eq!(set.value(stats::DEFENSE_BASE), 14.0);
    }

    #[test]
    fn missing_attribute_reads_as_zero() {
        let set = AttributeSet::new();
        assert_eq!(set.try_value(stats::CURRENT_MANA), None);
        assert_eq!(AttributeView::value(&set, stats::CURRENT_MANA), 0.0);
    }

    #[test]
    fn snapshot_is_detached_from_later_changes() {
        let mut set = AttributeSet::new();
        set.set_base(stats::CURRENT_HEALTH, 50.0);
        let snapshot = set.snapshot();
        set.set_base(stats::CURRENT_HEALTH, 10.0);

        assert_eq!(snapshot.value(stats::CURRENT_HEALTH), 50.0);
        assert_eq!(AttributeView::value(&set, stats::CURRENT_HEALTH), 10.0);
    }
}
