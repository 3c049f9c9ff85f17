//! Applying a computed hit to a defender.

use crate::attributes::stats;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Actor, EntityId, LifeState, MapId};

use super::Hit;

/// Why a resolved target could not be hit.
///
/// These are isolated per target: the invocation carries on with the rest.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HitError {
    #[error("target {0} is already dead")]
    TargetDead(EntityId),

    #[error("target {target} left {map}")]
    TargetLeftMap { target: EntityId, map: MapId },
}

impl GameError for HitError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TargetDead(_) => "HIT_TARGET_DEAD",
            Self::TargetLeftMap { .. } => "HIT_TARGET_LEFT_MAP",
        }
    }
}

/// Result of a successful hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitOutcome {
    pub damage_dealt: f64,
    pub remaining_health: f64,
    pub killed: bool,
}

impl Actor {
    /// Applies `hit` to this actor, which is expected to be in the world on
    /// `map`.
    ///
    /// Health never drops below zero; reaching zero kills the actor.
    pub fn receive_hit(&mut self, map: MapId, hit: &Hit) -> Result<HitOutcome, HitError> {
        if !self.is_alive() {
            return Err(HitError::TargetDead(self.id));
        }
        if self.map != map || !self.is_in_world() {
            return Err(HitError::TargetLeftMap {
                target: self.id,
                map,
            });
        }

        let health = self.health();
        let damage_dealt = hit.damage.min(health);
        let remaining_health = health - damage_dealt;
        if damage_dealt > 0.0 {
            self.attributes.set_value(stats::CURRENT_HEALTH, remaining_health);
        }

        let killed = remaining_health <= 0.0;
        if killed {
            self.life = LifeState::Dead;
        }

        Ok(HitOutcome {
            damage_dealt,
            remaining_health,
            killed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeSet, Modifier};
    use crate::state::{ActorKind, Position};

    fn monster(health: f64) -> Actor {
        let mut attributes = AttributeSet::new();
        attributes.set_base(stats::MAXIMUM_HEALTH, 100.0);
        attributes.set_base(stats::CURRENT_HEALTH, health);
        Actor::new(EntityId(500), ActorKind::Monster, "Spider", attributes)
            .at(MapId(0), Position::new(5, 5))
    }

    #[test]
    fn damage_reduces_health() {
        let mut target = monster(100.0);
        let outcome = target.receive_hit(MapId(0), &Hit::new(30.0)).unwrap();

        assert_eq!(outcome.remaining_health, 70.0);
        assert!(!outcome.killed);
        assert_eq!(target.health(), 70.0);
    }

    #[test]
    fn lethal_hit_kills_and_clamps() {
        let mut target = monster(20.0);
        let outcome = target.receive_hit(MapId(0), &Hit::new(30.0)).unwrap();

        assert_eq!(outcome.damage_dealt, 20.0);
        assert!(outcome.killed);
        assert_eq!(target.health(), 0.0);
        assert_eq!(
            target.receive_hit(MapId(0), &Hit::new(1.0)),
            Err(HitError::TargetDead(EntityId(500)))
        );
    }

    #[test]
    fn lethal_hit_on_modified_pool_leaves_no_health() {
        let mut target = monster(40.0);
        target
            .attributes
            .add_modifier(Modifier::additive(stats::CURRENT_HEALTH, 10.0))
            .unwrap();
        target
            .attributes
            .add_modifier(Modifier::multiplicative(stats::CURRENT_HEALTH, 1.0))
            .unwrap();
        assert_eq!(target.health(), 100.0);

        let outcome = target.receive_hit(MapId(0), &Hit::new(60.0)).unwrap();
        assert_eq!(target.health(), 40.0);
        assert!(!outcome.killed);

        let outcome = target.receive_hit(MapId(0), &Hit::new(60.0)).unwrap();
        assert!(outcome.killed);
        assert_eq!(target.health(), 0.0);
    }

    #[test]
    fn target_that_went_offline_is_rejected() {
        let mut target = monster(100.0).with_presence(crate::state::Presence::Offline);
        assert_eq!(
            target.receive_hit(MapId(0), &Hit::new(1.0)),
            Err(HitError::TargetLeftMap {
                target: EntityId(500),
                map: MapId(0),
            })
        );
    }

    #[test]
    fn target_on_other_map_is_rejected() {
        let mut target = monster(100.0).at(MapId(3), Position::ORIGIN);
        assert!(matches!(
            target.receive_hit(MapId(0), &Hit::new(1.0)),
            Err(HitError::TargetLeftMap { .. })
        ));
        assert_eq!(target.health(), 100.0);
    }
}
