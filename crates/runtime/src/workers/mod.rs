//! Background tasks backing the realm.
//!
//! The regeneration worker ticks every live actor on an interval, while one
//! session worker per connected client processes that client's commands in
//! arrival order.

mod metrics;
mod regeneration;
mod session;

pub use metrics::{MetricsSnapshot, RealmMetrics};
pub(crate) use regeneration::RegenerationWorker;
pub(crate) use session::{SessionCommand, SessionWorker};
