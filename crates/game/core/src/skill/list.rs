use super::SkillId;

/// Skills an actor has learned, in the order they were learned.
///
/// The index of a skill is the slot reported to the client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillList {
    learned: Vec<SkillId>,
}

impl SkillList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: SkillId) -> bool {
        self.learned.contains(&id)
    }

    /// Appends `id` and returns its slot, or `None` if already learned.
    pub fn add(&mut self, id: SkillId) -> Option<usize> {
        if self.contains(id) {
            return None;
        }
        self.learned.push(id);
        Some(self.learned.len() - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.learned.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.learned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.learned.is_empty()
    }
}

impl FromIterator<SkillId> for SkillList {
    fn from_iter<I: IntoIterator<Item = SkillId>>(iter: I) -> Self {
        let mut list = Self::new();
        for id in iter {
            list.add(id);
        }
        list
    }
}
