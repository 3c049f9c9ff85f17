use std::collections::HashMap;

use super::{Skill, SkillId};

/// Every skill definition known to the server, keyed by number.
///
/// Like the attribute registry this is built once and shared read-only.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, Skill>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, returning the one it replaced, if any.
    pub fn insert(&mut self, skill: Skill) -> Option<Skill> {
        self.skills.insert(skill.id, skill)
    }

    pub fn with(mut self, skill: Skill) -> Self {
        self.insert(skill);
        self
    }

    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(&id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<Skill> for SkillCatalog {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        Self {
            skills: iter.into_iter().map(|skill| (skill.id, skill)).collect(),
        }
    }
}
