//! Unified error types surfaced by the runtime API.
//!
//! Validation failures of skill invocations are not errors at this level;
//! they come back inside [`realm_core::InvocationOutcome`].
use thiserror::Error;
use tokio::sync::oneshot;

use realm_core::{AttributeError, EntityId, LearnError, MapId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session command channel closed")]
    CommandChannelClosed,

    #[error("session reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("actor {0} is not registered")]
    UnknownActor(EntityId),

    #[error("actor {0} is already registered")]
    DuplicateActor(EntityId),

    #[error("{0} is not loaded")]
    UnknownMap(MapId),

    #[error(transparent)]
    Attributes(#[from] AttributeError),

    #[error(transparent)]
    Learn(#[from] LearnError),
}
