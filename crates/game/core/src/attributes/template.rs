use super::{AttributeError, AttributeId, AttributeRegistry, Modifier};

/// Base values and relationships an actor's attributes are created from.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassTemplate {
    pub name: String,
    pub base_values: Vec<(AttributeId, f64)>,
    pub relationships: Vec<Modifier>,
}

impl ClassTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_base(mut self, attribute: AttributeId, value: f64) -> Self {
        self.base_values.push((attribute, value));
        self
    }

    pub fn with_relationship(mut self, modifier: Modifier) -> Self {
        self.relationships.push(modifier);
        self
    }

    pub fn with_relationships(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.relationships.extend(modifiers);
        self
    }

    /// Checks that every attribute the template touches is registered.
    pub fn validate(&self, registry: &AttributeRegistry) -> Result<(), AttributeError> {
        for &(id, _) in &self.base_values {
            registry.lookup(id)?;
        }
        for modifier in &self.relationships {
            registry.validate_modifier(modifier)?;
        }
        Ok(())
    }
}
