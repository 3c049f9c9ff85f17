//! Per-map observer channels.
//!
//! Every loaded map has its own broadcast channel; sessions watching a map
//! subscribe to it and receive one [`SkillAnimation`] per skill invocation
//! on that map.

mod bus;

pub use bus::{ObserverRegistry, SkillAnimation};
