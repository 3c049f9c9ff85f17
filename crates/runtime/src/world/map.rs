use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use realm_core::{
    ActorKind, EntityId, LifeState, MapId, Position, SpatialIndex, TargetArea, Targetable,
};

use super::ActorHandle;
use super::grid::SparseGrid;

/// Entry of a map's spatial index.
#[derive(Clone, Debug)]
pub struct MapEntity {
    pub id: EntityId,
    pub kind: ActorKind,
    pub position: Position,
    /// Mirror of the actor's life state, kept current by the pipeline.
    pub life: LifeState,
    pub actor: ActorHandle,
}

impl Targetable for MapEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        self.kind
    }

    fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }
}

#[derive(Debug)]
struct MapIndex {
    grid: SparseGrid,
    entities: HashMap<EntityId, MapEntity>,
}

/// One loaded map and the entities currently on it.
#[derive(Debug)]
pub struct GameMap {
    id: MapId,
    index: RwLock<MapIndex>,
}

impl GameMap {
    pub const DEFAULT_CELL_SIZE: u8 = 8;

    pub fn new(id: MapId) -> Self {
        Self::with_cell_size(id, Self::DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(id: MapId, cell_size: u8) -> Self {
        Self {
            id,
            index: RwLock::new(MapIndex {
                grid: SparseGrid::new(cell_size),
                entities: HashMap::new(),
            }),
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    /// Adds or re-places an entity.
    pub fn insert(&self, entity: MapEntity) {
        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = index.entities.remove(&entity.id) {
            index.grid.remove(previous.id, previous.position);
        }
        index.grid.insert(entity.id, entity.position);
        index.entities.insert(entity.id, entity);
    }

    pub fn remove(&self, id: EntityId) -> Option<MapEntity> {
        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
        let entity = index.entities.remove(&id)?;
        index.grid.remove(entity.id, entity.position);
        Some(entity)
    }

    /// Moves an entity to a new tile; returns false if it is not on this map.
    pub fn relocate(&self, id: EntityId, position: Position) -> bool {
        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
        let MapIndex { grid, entities } = &mut *index;
        let Some(entity) = entities.get_mut(&id) else {
            return false;
        };
        grid.remove(id, entity.position);
        grid.insert(id, position);
        entity.position = position;
        true
    }

    /// Records that an indexed entity died; returns false if it is not on
    /// this map.
    pub fn mark_dead(&self, id: EntityId) -> bool {
        let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
        match index.entities.get_mut(&id) {
            Some(entity) => {
                entity.life = LifeState::Dead;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entities
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpatialIndex for GameMap {
    type Entity = MapEntity;

    /// Entities inside `area`, in grid order: cell rows top to bottom, then
    /// insertion order within a cell.
    fn entities_in_range(&self, area: TargetArea) -> Vec<MapEntity> {
        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        index
            .grid
            .candidates(area)
            .filter_map(|id| index.entities.get(&id))
            .filter(|entity| area.contains(entity.position))
            .cloned()
            .collect()
    }

    fn entity_by_id(&self, id: EntityId) -> Option<MapEntity> {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entities
            .get(&id)
            .cloned()
    }
}
