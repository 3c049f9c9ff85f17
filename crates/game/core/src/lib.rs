//! Live-state rules of the world server.
//!
//! `realm-core` is pure and synchronous. It defines the attribute registry
//! and per-actor composed attribute graphs, actors and their skills, target
//! resolution, hit application and the validation/payment half of the skill
//! action pipeline. Locking, timers and event delivery belong to
//! `realm-runtime`.
pub mod action;
pub mod attributes;
pub mod combat;
pub mod config;
pub mod error;
pub mod skill;
pub mod state;

pub use action::{
    InvocationError, InvocationOutcome, PipelineStage, PreparedInvocation, SkillInvocation,
};
pub use attributes::{
    AttributeDefinition, AttributeError, AttributeId, AttributeRegistry, AttributeSet,
    AttributeSnapshot, AttributeView, ClassTemplate, Modifier, ModifierKey, ModifierOp,
    RegenerationRule, stats,
};
pub use combat::{
    DamageFormula, Hit, HitError, HitOutcome, SkillDamageFormula, SpatialIndex, TargetArea,
    TargetRequest, Targetable,
};
pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use skill::{LearnError, Skill, SkillCatalog, SkillId, SkillKind, SkillList};
pub use state::{Actor, ActorKind, EntityId, LifeState, MapId, Position, Presence, Rotation};
