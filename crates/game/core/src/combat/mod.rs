//! Combat resolution.
//!
//! # Architecture
//!
//! - **Targeting**: finds attackable entities through a [`SpatialIndex`]
//! - **Resources**: all-or-nothing payment of skill costs
//! - **Damage**: the [`DamageFormula`] seam, fed with attacker/defender views
//! - **Hit**: applies a computed [`Hit`] to a defender
//!
//! Everything here is synchronous and lock-free; the runtime decides which
//! actor lock is held while these functions run.

pub mod damage;
pub mod hit;
pub mod resources;
pub mod targeting;

pub use damage::{DamageFormula, Hit, SkillDamageFormula};
pub use hit::{HitError, HitOutcome};
pub use resources::{ResourceShortfall, consume};
pub use targeting::{SpatialIndex, TargetArea, TargetRequest, Targetable, resolve_targets};
