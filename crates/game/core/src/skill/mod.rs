//! Skill definitions, the shared catalog and per-actor learned skills.

mod catalog;
mod definition;
mod error;
mod list;

pub use catalog::SkillCatalog;
pub use definition::{Requirement, ResourceCost, Skill, SkillId, SkillKind};
pub use error::LearnError;
pub use list::SkillList;
