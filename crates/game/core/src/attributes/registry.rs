//! Process-wide catalog of attribute definitions.

use std::collections::HashMap;

use super::{AttributeDefinition, AttributeError, AttributeId, Modifier};

/// Catalog of every attribute channel known to the server.
///
/// The registry is built once during startup and then shared read-only
/// (typically behind an `Arc`). It has no interior mutability, so once it
/// has been handed out nothing can register further definitions.
#[derive(Clone, Debug, Default)]
pub struct AttributeRegistry {
    definitions: Vec<AttributeDefinition>,
    index: HashMap<AttributeId, usize>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new definition.
    ///
    /// # Errors
    ///
    /// `AttributeError::DuplicateDefinition` if `id` is already registered.
    pub fn register(
        &mut self,
        id: AttributeId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&AttributeDefinition, AttributeError> {
        if self.index.contains_key(&id) {
            return Err(AttributeError::DuplicateDefinition(id));
        }

        let slot = self.definitions.len();
        self.definitions
            .push(AttributeDefinition::new(id, name, description));
        self.index.insert(id, slot);
        Ok(&self.definitions[slot])
    }

    /// Looks up a definition by id.
    ///
    /// # Errors
    ///
    /// `AttributeError::UnknownDefinition` if `id` was never registered.
    pub fn lookup(&self, id: AttributeId) -> Result<&AttributeDefinition, AttributeError> {
        self.index
            .get(&id)
            .map(|&slot| &self.definitions[slot])
            .ok_or(AttributeError::UnknownDefinition(id))
    }

    /// Checks that the modifier's target and every attribute it reads are
    /// registered.
    pub fn validate_modifier(&self, modifier: &Modifier) -> Result<(), AttributeError> {
        self.lookup(modifier.target)?;
        for id in modifier.references() {
            self.lookup(id)?;
        }
        Ok(())
    }

    pub fn contains(&self, id: AttributeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Human readable name for logs; falls back to the raw id.
    pub fn name_of(&self, id: AttributeId) -> String {
        self.lookup(id)
            .map(|definition| definition.name().to_owned())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Iterates definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ModifierOp;
    use uuid::Uuid;

    fn id(n: u128) -> AttributeId {
        AttributeId(Uuid::from_u128(n))
    }

    #[test]
    fn registers_and_looks_up() {
        let mut registry = AttributeRegistry::new();
        registry
            .register(id(1), "Base Strength", "The base strength of the character.")
            .unwrap();

        let definition = registry.lookup(id(1)).unwrap();
        assert_eq!(definition.name(), "Base Strength");
        assert_eq!(definition.id(), id(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rejects_duplicate_id() {
        let mut registry = AttributeRegistry::new();
        registry.register(id(7), "level", "").unwrap();

        let result = registry.register(id(7), "level again", "");
        assert_eq!(result.unwrap_err(), AttributeError::DuplicateDefinition(id(7)));
        assert_eq!(registry.lookup(id(7)).unwrap().name(), "level");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_lookup_fails() {
        let registry = AttributeRegistry::new();
        assert_eq!(
            registry.lookup(id(3)).unwrap_err(),
            AttributeError::UnknownDefinition(id(3))
        );
        assert_eq!(registry.name_of(id(3)), id(3).to_string());
    }

    #[test]
    fn modifiers_must_only_touch_registered_attributes() {
        let mut registry = AttributeRegistry::new();
        registry.register(id(1), "total strength", "").unwrap();
        registry.register(id(2), "base strength", "").unwrap();

        let derived = Modifier::derived(id(1), ModifierOp::Additive, id(2), 1.0);
        assert_eq!(registry.validate_modifier(&derived), Ok(()));

        let gated = Modifier::additive(id(1), 5.0).requires(id(9), 10.0);
        assert_eq!(
            registry.validate_modifier(&gated),
            Err(AttributeError::UnknownDefinition(id(9)))
        );
        assert_eq!(
            registry.validate_modifier(&Modifier::additive(id(3), 1.0)),
            Err(AttributeError::UnknownDefinition(id(3)))
        );
    }

    #[test]
    fn iterates_in_registration_order() {
        let mut registry = AttributeRegistry::new();
        registry.register(id(3), "c", "").unwrap();
        registry.register(id(1), "a", "").unwrap();
        registry.register(id(2), "b", "").unwrap();

        let names: Vec<_> = registry.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
