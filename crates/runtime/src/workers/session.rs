//! Per-session sequential command processing.
//!
//! A session worker owns the receiving end of one client's command channel.
//! Commands are handled one at a time, to completion, in arrival order.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use realm_core::{EntityId, InvocationOutcome, LearnError, SkillId, SkillInvocation};

use crate::api::{Result, RuntimeError};
use crate::pipeline::SkillPipeline;
use crate::world::World;

/// Commands that can be sent to a session worker
pub(crate) enum SessionCommand {
    InvokeSkill {
        invocation: SkillInvocation,
        reply: oneshot::Sender<InvocationOutcome>,
    },
    LearnSkill {
        skill: SkillId,
        reply: oneshot::Sender<Result<usize>>,
    },
}

/// Background task that processes one session's commands.
pub(crate) struct SessionWorker {
    actor: EntityId,
    world: Arc<World>,
    pipeline: Arc<SkillPipeline>,
    command_rx: mpsc::Receiver<SessionCommand>,
    shutdown: watch::Receiver<bool>,
}

impl SessionWorker {
    pub(crate) fn new(
        actor: EntityId,
        world: Arc<World>,
        pipeline: Arc<SkillPipeline>,
        command_rx: mpsc::Receiver<SessionCommand>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            actor,
            world,
            pipeline,
            command_rx,
            shutdown,
        }
    }

    /// Main worker loop. Ends when every handle is dropped or on shutdown.
    pub(crate) async fn run(mut self) {
        info!(target: "realm::session", actor = %self.actor, "session opened");

        loop {
            tokio::select! {
                biased;
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
            }
        }

        info!(target: "realm::session", actor = %self.actor, "session closed");
    }

    async fn handle_command(&self, command: SessionCommand) {
        match command {
            SessionCommand::InvokeSkill { invocation, reply } => {
                let outcome = self.pipeline.invoke(invocation).await;
                let _ = reply.send(outcome);
            }
            SessionCommand::LearnSkill { skill, reply } => {
                let result = self.learn_skill(skill).await;
                let _ = reply.send(result);
            }
        }
    }

    async fn learn_skill(&self, id: SkillId) -> Result<usize> {
        let skill = self
            .pipeline
            .catalog()
            .get(id)
            .ok_or(LearnError::UnknownSkill(id))?;
        let handle = self
            .world
            .actor(self.actor)
            .ok_or(RuntimeError::UnknownActor(self.actor))?;

        let slot = handle.lock().await.learn_skill(skill)?;
        debug!(target: "realm::session", actor = %self.actor, skill = %id, slot, "skill learned");
        Ok(slot)
    }
}
