//! Attribute definitions and per-actor composed attribute graphs.
//!
//! [`AttributeRegistry`] is the process-wide catalog, built once from
//! [`stats::standard_registry`]. Every actor owns an [`AttributeSet`]
//! instantiated from a [`ClassTemplate`]; equipment, buffs and level-ups
//! attach [`Modifier`]s to it.

mod definition;
mod error;
mod modifier;
mod registry;
mod regeneration;
mod set;
mod template;

pub mod stats;

pub use definition::{AttributeDefinition, AttributeId};
pub use error::AttributeError;
pub use modifier::{Modifier, ModifierGate, ModifierKey, ModifierOp, ModifierSource};
pub use registry::AttributeRegistry;
pub use regeneration::{RegenerationRule, RegenerationStep};
pub use set::{AttributeSet, AttributeSnapshot, AttributeView};
pub use template::ClassTemplate;
