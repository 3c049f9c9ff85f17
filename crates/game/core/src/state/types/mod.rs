pub mod actor;
pub mod common;

pub use actor::{Actor, ActorKind, LifeState, Presence};
pub use common::{EntityId, MapId, Position, Rotation};
