//! Actor state and the value types shared by every layer.

pub mod types;

pub use types::{Actor, ActorKind, EntityId, LifeState, MapId, Position, Presence, Rotation};
