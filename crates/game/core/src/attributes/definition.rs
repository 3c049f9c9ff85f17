//! Attribute identities and their descriptive metadata.

use std::fmt;

use uuid::Uuid;

/// Stable, globally unique identity of a numeric attribute channel.
///
/// Identities are fixed UUIDs so that persisted values, content tables and
/// other server builds agree on what a channel means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeId(pub Uuid);

impl AttributeId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Named numeric channel (e.g. "maximumHealth") with its metadata.
///
/// Definitions are immutable once registered in an
/// [`AttributeRegistry`](super::AttributeRegistry).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDefinition {
    id: AttributeId,
    name: String,
    description: String,
}

impl AttributeDefinition {
    pub fn new(id: AttributeId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for AttributeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
