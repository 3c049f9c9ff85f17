//! High-level realm orchestrator.
//!
//! [`Realm`] owns the shared world, the skill pipeline and the background
//! workers, and exposes a builder-based API for hosts to drive it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use realm_core::attributes::stats;
use realm_core::{
    Actor, ActorKind, AttributeId, AttributeRegistry, AttributeSet, ClassTemplate,
    DamageFormula, EntityId, GameConfig, InvocationOutcome, MapId, Modifier, ModifierKey,
    Position, RegenerationRule, SkillCatalog, SkillDamageFormula, SkillInvocation,
};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::events::{ObserverRegistry, SkillAnimation};
use crate::pipeline::SkillPipeline;
use crate::workers::{RealmMetrics, RegenerationWorker, SessionWorker};
use crate::world::{ActorHandle, GameMap, World};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Period between two regeneration passes over every actor.
    pub regeneration_interval: Duration,
    pub session_buffer_size: usize,
    pub observer_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_REGENERATION_INTERVAL: Duration = Duration::from_secs(3);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            regeneration_interval: Self::DEFAULT_REGENERATION_INTERVAL,
            session_buffer_size: 32,
            observer_buffer_size: 100,
        }
    }
}

/// Live world state plus the workers operating on it.
///
/// Design: the realm owns workers and the world; [`SessionHandle`]s are the
/// cloneable façade handed to connections.
pub struct Realm {
    world: Arc<World>,
    registry: Arc<AttributeRegistry>,
    pipeline: Arc<SkillPipeline>,
    observers: ObserverRegistry,
    metrics: Arc<RealmMetrics>,
    config: RuntimeConfig,

    shutdown_tx: watch::Sender<bool>,
    regeneration_handle: JoinHandle<()>,
    session_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Realm {
    /// Create a new realm builder
    pub fn builder() -> RealmBuilder {
        RealmBuilder::new()
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn metrics(&self) -> &RealmMetrics {
        &self.metrics
    }

    /// Loads an empty map.
    pub fn add_map(&self, id: MapId) -> Arc<GameMap> {
        self.world.add_map(id)
    }

    /// Builds an actor whose attributes are instantiated from `template`.
    ///
    /// The actor is not part of the world until it is [spawned](Self::spawn).
    pub fn create_actor(
        &self,
        id: EntityId,
        kind: ActorKind,
        name: impl Into<String>,
        template: &ClassTemplate,
    ) -> Result<Actor> {
        let attributes = AttributeSet::from_template(&self.registry, template)?;
        Ok(Actor::new(id, kind, name, attributes))
    }

    pub fn spawn(&self, actor: Actor) -> Result<ActorHandle> {
        self.world.spawn(actor)
    }

    pub async fn despawn(&self, id: EntityId) -> Result<()> {
        self.world.despawn(id).await
    }

    pub async fn relocate(&self, id: EntityId, position: Position) -> Result<()> {
        self.world.relocate(id, position).await
    }

    /// Reads the current composed value of one attribute of one actor.
    ///
    /// # Errors
    ///
    /// `UnknownDefinition` if `attribute` is not registered, `UnknownActor`
    /// if the actor is not spawned.
    pub async fn attribute_value(&self, actor: EntityId, attribute: AttributeId) -> Result<f64> {
        self.registry.lookup(attribute)?;
        let handle = self.actor_handle(actor)?;
        let value = handle.lock().await.attributes.value(attribute);
        Ok(value)
    }

    /// Attaches a modifier (equipment, buff, ...) to a spawned actor.
    ///
    /// The target and every attribute the modifier reads must be registered.
    pub async fn add_modifier(&self, actor: EntityId, modifier: Modifier) -> Result<ModifierKey> {
        let handle = self.actor_handle(actor)?;
        let key = handle
            .lock()
            .await
            .attributes
            .add_registered_modifier(&self.registry, modifier)?;
        Ok(key)
    }

    pub async fn remove_modifier(&self, actor: EntityId, key: ModifierKey) -> Result<Modifier> {
        let handle = self.actor_handle(actor)?;
        let modifier = handle.lock().await.attributes.remove_modifier(key)?;
        Ok(modifier)
    }

    fn actor_handle(&self, actor: EntityId) -> Result<ActorHandle> {
        self.world
            .actor(actor)
            .ok_or(RuntimeError::UnknownActor(actor))
    }

    /// Runs one invocation directly, outside of any session.
    pub async fn invoke(&self, invocation: SkillInvocation) -> InvocationOutcome {
        self.pipeline.invoke(invocation).await
    }

    /// Opens a sequential command session acting as `actor`.
    ///
    /// # Errors
    ///
    /// `UnknownActor` if the actor is not spawned.
    pub fn open_session(&self, actor: EntityId) -> Result<SessionHandle> {
        if self.world.actor(actor).is_none() {
            return Err(RuntimeError::UnknownActor(actor));
        }

        let (command_tx, command_rx) = mpsc::channel(self.config.session_buffer_size);
        let worker = SessionWorker::new(
            actor,
            Arc::clone(&self.world),
            Arc::clone(&self.pipeline),
            command_rx,
            self.shutdown_tx.subscribe(),
        );
        let join = tokio::spawn(async move {
            worker.run().await;
        });

        let mut sessions = self
            .session_handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|handle| !handle.is_finished());
        sessions.push(join);

        Ok(SessionHandle::new(actor, command_tx))
    }

    /// Subscribes to skill animations broadcast on `map`.
    pub fn subscribe(&self, map: MapId) -> broadcast::Receiver<SkillAnimation> {
        self.observers.subscribe(map)
    }

    /// Stops every worker and waits for them to finish.
    ///
    /// Commands already being processed run to completion; queued ones are
    /// dropped and their callers see `ReplyChannelClosed`.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown_tx.send(true);

        self.regeneration_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        let sessions = std::mem::take(
            &mut *self
                .session_handles
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for session in sessions {
            session.await.map_err(RuntimeError::WorkerJoin)?;
        }

        info!(target: "realm::runtime", "realm stopped");
        Ok(())
    }
}

/// Builder for [`Realm`] with flexible configuration.
pub struct RealmBuilder {
    config: RuntimeConfig,
    registry: Option<AttributeRegistry>,
    catalog: SkillCatalog,
    formula: Option<Arc<dyn DamageFormula>>,
    regeneration_rules: Option<Vec<RegenerationRule>>,
}

impl RealmBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            registry: None,
            catalog: SkillCatalog::new(),
            formula: None,
            regeneration_rules: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Attribute catalog; defaults to [`stats::standard_registry`].
    pub fn registry(mut self, registry: AttributeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn catalog(mut self, catalog: SkillCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Damage formula used for every hit; defaults to [`SkillDamageFormula`].
    pub fn damage_formula(mut self, formula: impl DamageFormula + 'static) -> Self {
        self.formula = Some(Arc::new(formula));
        self
    }

    /// Rules applied on every regeneration tick; defaults to
    /// [`stats::interval_regeneration_rules`].
    pub fn regeneration_rules(mut self, rules: impl IntoIterator<Item = RegenerationRule>) -> Self {
        self.regeneration_rules = Some(rules.into_iter().collect());
        self
    }

    /// Build the realm and start its background workers.
    pub async fn build(self) -> Result<Realm> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => stats::standard_registry()?,
        };
        let rules = self
            .regeneration_rules
            .unwrap_or_else(|| stats::interval_regeneration_rules().to_vec());
        let formula: Arc<dyn DamageFormula> = match self.formula {
            Some(formula) => formula,
            None => Arc::new(SkillDamageFormula),
        };

        let world = Arc::new(World::new());
        let observers = ObserverRegistry::with_capacity(self.config.observer_buffer_size);
        let metrics = Arc::new(RealmMetrics::new());
        let pipeline = Arc::new(SkillPipeline::new(
            Arc::clone(&world),
            Arc::new(self.catalog),
            observers.clone(),
            formula,
            self.config.game.clone(),
            Arc::clone(&metrics),
        ));

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let regeneration = RegenerationWorker::new(
            Arc::clone(&world),
            rules,
            self.config.regeneration_interval,
            Arc::clone(&metrics),
            shutdown_rx,
        );
        let regeneration_handle = tokio::spawn(async move {
            regeneration.run().await;
        });

        info!(
            target: "realm::runtime",
            attributes = registry.len(),
            skills = pipeline.catalog().len(),
            area_skill_hits_players = self.config.game.area_skill_hits_players,
            "realm started"
        );

        Ok(Realm {
            world,
            registry: Arc::new(registry),
            pipeline,
            observers,
            metrics,
            config: self.config,
            shutdown_tx,
            regeneration_handle,
            session_handles: Mutex::new(Vec::new()),
        })
    }
}
