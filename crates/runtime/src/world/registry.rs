use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use realm_core::{Actor, EntityId, MapId, Position, Presence};
use tokio::sync::Mutex;
use tracing::debug;

use super::{ActorHandle, GameMap, MapEntity};
use crate::api::{Result, RuntimeError};

/// Every loaded map plus a directory of live actors.
#[derive(Debug, Default)]
pub struct World {
    maps: RwLock<HashMap<MapId, Arc<GameMap>>>,
    actors: RwLock<HashMap<EntityId, ActorHandle>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an empty map, or returns the one already loaded under `id`.
    pub fn add_map(&self, id: MapId) -> Arc<GameMap> {
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(maps.entry(id).or_insert_with(|| Arc::new(GameMap::new(id))))
    }

    pub fn map(&self, id: MapId) -> Option<Arc<GameMap>> {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn actor(&self, id: EntityId) -> Option<ActorHandle> {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Handles of every live actor at the time of the call.
    pub fn actors(&self) -> Vec<ActorHandle> {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn actor_count(&self) -> usize {
        self.actors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Registers `actor` and places it on its map.
    ///
    /// # Errors
    ///
    /// - `UnknownMap` if the actor's map is not loaded
    /// - `DuplicateActor` if the id is already taken
    pub fn spawn(&self, actor: Actor) -> Result<ActorHandle> {
        let map = self.map(actor.map).ok_or(RuntimeError::UnknownMap(actor.map))?;
        let (id, kind, position, life) = (actor.id, actor.kind, actor.position, actor.life);
        let handle = Arc::new(Mutex::new(actor));

        {
            let mut actors = self.actors.write().unwrap_or_else(PoisonError::into_inner);
            if actors.contains_key(&id) {
                return Err(RuntimeError::DuplicateActor(id));
            }
            actors.insert(id, Arc::clone(&handle));
        }

        map.insert(MapEntity {
            id,
            kind,
            position,
            life,
            actor: Arc::clone(&handle),
        });
        debug!(target: "realm::world", actor = %id, map = %map.id(), %position, "actor spawned");
        Ok(handle)
    }

    /// Removes an actor from the world and marks it offline.
    ///
    /// Hits already resolved against it fail with "left map".
    pub async fn despawn(&self, id: EntityId) -> Result<()> {
        let handle = self
            .actors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .ok_or(RuntimeError::UnknownActor(id))?;

        let mut actor = handle.lock().await;
        actor.presence = Presence::Offline;
        if let Some(map) = self.map(actor.map) {
            map.remove(id);
        }
        debug!(target: "realm::world", actor = %id, "actor despawned");
        Ok(())
    }

    /// Moves an actor to another tile of its current map.
    pub async fn relocate(&self, id: EntityId, position: Position) -> Result<()> {
        let handle = self.actor(id).ok_or(RuntimeError::UnknownActor(id))?;
        let mut actor = handle.lock().await;
        let map = self.map(actor.map).ok_or(RuntimeError::UnknownMap(actor.map))?;
        map.relocate(id, position);
        actor.position = position;
        Ok(())
    }
}
