//! Maps, their spatial index and the registry of live actors.
//!
//! Each actor lives behind its own async mutex ([`ActorHandle`]); that lock
//! is the only thing serializing combat, regeneration and skill learning on
//! one actor. Map indexes use short synchronous critical sections that never
//! span an `.await`.

mod grid;
mod map;
mod registry;

pub use map::{GameMap, MapEntity};
pub use registry::World;

use std::sync::Arc;

use realm_core::Actor;
use tokio::sync::Mutex;

/// Shared, individually locked actor.
pub type ActorHandle = Arc<Mutex<Actor>>;
