//! Skill action pipeline.
//!
//! ```text
//! Idle → Validating → ResourceConsumption → TargetResolution → Applying → Broadcasting → Idle
//! ```
//!
//! Validation and payment happen under the invoker's lock and are the only
//! all-or-nothing step. After that the invocation is committed: targets are
//! resolved from the map's spatial index, each hit is applied under that
//! target's lock on its own, and exactly one animation is broadcast no matter
//! how many targets were found or hit. At most one actor lock is held at a
//! time.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use realm_core::action::{self, PipelineStage, PreparedInvocation};
use realm_core::combat::resolve_targets;
use realm_core::{
    ActorKind, DamageFormula, GameConfig, GameError, InvocationError, InvocationOutcome,
    SkillCatalog, SkillInvocation,
};

use crate::events::{ObserverRegistry, SkillAnimation};
use crate::workers::RealmMetrics;
use crate::world::{MapEntity, World};

/// Runs skill invocations against the shared world.
pub struct SkillPipeline {
    world: Arc<World>,
    catalog: Arc<SkillCatalog>,
    observers: ObserverRegistry,
    formula: Arc<dyn DamageFormula>,
    config: GameConfig,
    metrics: Arc<RealmMetrics>,
}

#[derive(Default)]
struct Application {
    attempted: usize,
    hit: usize,
    failed: usize,
    kills: usize,
}

impl SkillPipeline {
    pub fn new(
        world: Arc<World>,
        catalog: Arc<SkillCatalog>,
        observers: ObserverRegistry,
        formula: Arc<dyn DamageFormula>,
        config: GameConfig,
        metrics: Arc<RealmMetrics>,
    ) -> Self {
        Self {
            world,
            catalog,
            observers,
            formula,
            config,
            metrics,
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Runs one invocation to completion.
    ///
    /// Rejections are reported in the outcome, never as an error.
    pub async fn invoke(&self, invocation: SkillInvocation) -> InvocationOutcome {
        let prepared = match self.prepare(&invocation).await {
            Ok(prepared) => prepared,
            Err(error) => {
                debug!(
                    target: "realm::pipeline",
                    actor = %invocation.actor,
                    skill = %invocation.skill,
                    stage = error.stage().as_str(),
                    severity = error.severity().as_str(),
                    code = error.error_code(),
                    %error,
                    "invocation rejected"
                );
                self.metrics.record_rejection();
                return InvocationOutcome::rejected(error);
            }
        };

        trace!(target: "realm::pipeline", stage = PipelineStage::TargetResolution.as_str());
        let targets = self.resolve(&invocation, &prepared);

        trace!(target: "realm::pipeline", stage = PipelineStage::Applying.as_str(), targets = targets.len());
        let applied = self.apply(&invocation, &prepared, targets).await;

        trace!(target: "realm::pipeline", stage = PipelineStage::Broadcasting.as_str());
        self.observers.publish(
            prepared.map,
            SkillAnimation {
                actor: invocation.actor,
                skill: invocation.skill,
                origin: invocation.center,
                rotation: invocation.rotation,
            },
        );

        self.metrics
            .record_invocation(applied.attempted, applied.failed, applied.kills);
        debug!(
            target: "realm::pipeline",
            actor = %invocation.actor,
            skill = %invocation.skill,
            attempted = applied.attempted,
            hit = applied.hit,
            "invocation completed"
        );

        InvocationOutcome {
            resources_consumed: true,
            targets_attempted: applied.attempted,
            targets_hit: applied.hit,
            rejection: None,
        }
    }

    /// Validating and ResourceConsumption, under the invoker's lock.
    async fn prepare(
        &self,
        invocation: &SkillInvocation,
    ) -> Result<PreparedInvocation<'_>, InvocationError> {
        let handle = self
            .world
            .actor(invocation.actor)
            .ok_or(InvocationError::ActorNotFound(invocation.actor))?;
        let mut actor = handle.lock().await;
        action::prepare(&mut actor, &self.catalog, invocation)
    }

    fn resolve(&self, invocation: &SkillInvocation, prepared: &PreparedInvocation<'_>) -> Vec<MapEntity> {
        let Some(request) = action::target_request(invocation, prepared.skill, &self.config) else {
            return Vec::new();
        };
        match self.world.map(prepared.map) {
            Some(map) => resolve_targets(map.as_ref(), &request),
            None => {
                warn!(target: "realm::pipeline", map = %prepared.map, "invoker's map is not loaded");
                Vec::new()
            }
        }
    }

    async fn apply(
        &self,
        invocation: &SkillInvocation,
        prepared: &PreparedInvocation<'_>,
        targets: Vec<MapEntity>,
    ) -> Application {
        let mut applied = Application::default();

        for target in targets {
            applied.attempted += 1;

            let result = {
                let mut defender = target.actor.lock().await;
                let hit = self
                    .formula
                    .compute(prepared.skill, &prepared.attacker, &defender.attributes);
                defender.receive_hit(prepared.map, &hit)
            };

            match result {
                Ok(outcome) => {
                    applied.hit += 1;
                    trace!(
                        target: "realm::pipeline",
                        target_id = %target.id,
                        damage = outcome.damage_dealt,
                        remaining = outcome.remaining_health,
                        "hit applied"
                    );
                    if outcome.killed {
                        self.remove_corpse(prepared, &target);
                        if target.kind == ActorKind::Monster {
                            applied.kills += 1;
                            self.recover_after_kill(invocation).await;
                        }
                    }
                }
                Err(error) => {
                    applied.failed += 1;
                    warn!(
                        target: "realm::pipeline",
                        actor = %invocation.actor,
                        target_id = %target.id,
                        severity = error.severity().as_str(),
                        code = error.error_code(),
                        %error,
                        "hit failed"
                    );
                }
            }
        }

        applied
    }

    /// Killed monsters leave the map index; killed players stay indexed as
    /// dead until they respawn or log out.
    fn remove_corpse(&self, prepared: &PreparedInvocation<'_>, target: &MapEntity) {
        let Some(map) = self.world.map(prepared.map) else {
            return;
        };
        match target.kind {
            ActorKind::Monster => {
                map.remove(target.id);
            }
            ActorKind::Player => {
                map.mark_dead(target.id);
            }
        }
        debug!(target: "realm::pipeline", target_id = %target.id, kind = target.kind.as_str(), "target died");
    }

    async fn recover_after_kill(&self, invocation: &SkillInvocation) {
        if let Some(handle) = self.world.actor(invocation.actor) {
            handle.lock().await.recover_after_kill();
        }
    }
}
