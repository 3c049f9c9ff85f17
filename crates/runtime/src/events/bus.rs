//! Map-keyed broadcast bus.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use realm_core::{EntityId, MapId, Position, Rotation, SkillId};

/// Visual event sent to observers when a skill is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillAnimation {
    pub actor: EntityId,
    pub skill: SkillId,
    pub origin: Position,
    pub rotation: Rotation,
}

/// Broadcast channels keyed by map.
///
/// Channels are created lazily on first subscription. Publishing to a map
/// nobody watches is a no-op.
pub struct ObserverRegistry {
    capacity: usize,
    channels: Arc<RwLock<HashMap<MapId, broadcast::Sender<SkillAnimation>>>>,
}

impl ObserverRegistry {
    /// Creates a registry with default capacity per map
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribes to every skill animation shown on `map`.
    pub fn subscribe(&self, map: MapId) -> broadcast::Receiver<SkillAnimation> {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(map)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Sends `event` to the observers of `map`, returning how many received it.
    pub fn publish(&self, map: MapId, event: SkillAnimation) -> usize {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        match channels.get(&map).map(|tx| tx.send(event)) {
            Some(Ok(receivers)) => receivers,
            // No observers on this map - normal, not an error
            Some(Err(_)) | None => {
                tracing::trace!(target: "realm::events", %map, "no observers for skill animation");
                0
            }
        }
    }

    pub fn observer_count(&self, map: MapId) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&map)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Clone for ObserverRegistry {
    fn clone(&self) -> Self {
        Self {
            capacity: self.capacity,
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
