//! Cloneable façade over one session's command channel.
//!
//! Commands sent through the same [`SessionHandle`] are processed strictly in
//! the order they were sent; each call resolves once its command has run to
//! completion.
use tokio::sync::{mpsc, oneshot};

use realm_core::{EntityId, InvocationOutcome, Position, Rotation, SkillId, SkillInvocation};

use super::errors::{Result, RuntimeError};
use crate::workers::SessionCommand;

/// Client-facing handle bound to one acting actor.
#[derive(Clone)]
pub struct SessionHandle {
    actor: EntityId,
    command_tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(actor: EntityId, command_tx: mpsc::Sender<SessionCommand>) -> Self {
        Self { actor, command_tx }
    }

    /// Actor every command of this session acts as.
    pub fn actor(&self) -> EntityId {
        self.actor
    }

    /// Invokes an area skill centered on `center`.
    ///
    /// Passing [`EntityId::NONE`] as extra target is the same as `None`.
    pub async fn invoke_skill(
        &self,
        skill: SkillId,
        center: Position,
        rotation: Rotation,
        extra_target: Option<EntityId>,
    ) -> Result<InvocationOutcome> {
        let mut invocation = SkillInvocation::new(self.actor, skill, center).with_rotation(rotation);
        if let Some(target) = extra_target {
            invocation = invocation.with_extra_target(target);
        }

        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(SessionCommand::InvokeSkill {
                invocation,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Learns `skill`, returning the slot it was stored in.
    pub async fn learn_skill(&self, skill: SkillId) -> Result<usize> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(SessionCommand::LearnSkill {
                skill,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }
}
