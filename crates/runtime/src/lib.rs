//! Concurrent runtime around the live-state rules of `realm-core`.
//!
//! This crate owns everything that touches more than one actor at a time:
//! the per-map actor registry and spatial index, the skill action pipeline,
//! the regeneration worker, per-session workers and the observer event bus.
//! Consumers embed [`Realm`] and talk to it directly or through
//! [`SessionHandle`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides per-map observer channels
//! - [`world`] holds maps, the spatial grid and actor handles
//! - [`pipeline`] runs skill invocations against the world
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod pipeline;
pub mod runtime;
pub mod world;

mod workers;

pub use api::{Result, RuntimeError, SessionHandle};
pub use events::{ObserverRegistry, SkillAnimation};
pub use pipeline::SkillPipeline;
pub use runtime::{Realm, RealmBuilder, RuntimeConfig};
pub use workers::{MetricsSnapshot, RealmMetrics};
pub use world::{ActorHandle, GameMap, MapEntity, World};
