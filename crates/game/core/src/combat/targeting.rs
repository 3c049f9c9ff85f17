//! Area target resolution.
//!
//! Results are unordered beyond the spatial index's own iteration order; the
//! pipeline applies hits in exactly the order returned here.

use crate::state::{ActorKind, EntityId, Position};

/// Square area of Chebyshev radius `radius` around `center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetArea {
    pub center: Position,
    pub radius: u8,
}

impl TargetArea {
    pub fn new(center: Position, radius: u8) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.center.distance(position) <= u32::from(self.radius)
    }
}

/// Something the resolver can select.
pub trait Targetable {
    fn id(&self) -> EntityId;
    fn kind(&self) -> ActorKind;
    /// Dead entities are never resolved.
    fn is_alive(&self) -> bool;
}

/// Spatial lookup over the entities of one map.
pub trait SpatialIndex {
    type Entity: Targetable;

    /// Every entity located inside `area`.
    fn entities_in_range(&self, area: TargetArea) -> Vec<Self::Entity>;

    fn entity_by_id(&self, id: EntityId) -> Option<Self::Entity>;
}

/// Parameters of a single resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRequest {
    /// The invoking actor; never one of its own targets.
    pub attacker: EntityId,
    pub area: TargetArea,
    pub extra_target: Option<EntityId>,
    pub hits_players: bool,
}

impl TargetRequest {
    fn admits(&self, entity: &impl Targetable) -> bool {
        entity.id() != self.attacker
            && entity.is_alive()
            && (self.hits_players || !entity.kind().is_player())
    }
}

/// Resolves the targets of one invocation.
///
/// The explicit extra target is looked up by id, subject to the same
/// exclusions, and appended unless it is already part of the area result.
/// The sentinel id and ids the index does not know are ignored.
pub fn resolve_targets<I>(index: &I, request: &TargetRequest) -> Vec<I::Entity>
where
    I: SpatialIndex + ?Sized,
{
    let mut targets: Vec<I::Entity> = index
        .entities_in_range(request.area)
        .into_iter()
        .filter(|entity| request.admits(entity))
        .collect();

    let extra = request
        .extra_target
        .and_then(EntityId::non_sentinel)
        .filter(|id| targets.iter().all(|target| target.id() != *id))
        .and_then(|id| index.entity_by_id(id))
        .filter(|entity| request.admits(entity));
    targets.extend(extra);

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Dummy {
        id: EntityId,
        kind: ActorKind,
        position: Position,
        alive: bool,
    }

    impl Targetable for Dummy {
        fn id(&self) -> EntityId {
            self.id
        }

        fn kind(&self) -> ActorKind {
            self.kind
        }

        fn is_alive(&self) -> bool {
            self.alive
        }
    }

    struct Field(Vec<Dummy>);

    impl SpatialIndex for Field {
        type Entity = Dummy;

        fn entities_in_range(&self, area: TargetArea) -> Vec<Dummy> {
            self.0
                .iter()
                .filter(|d| area.contains(d.position))
                .copied()
                .collect()
        }

        fn entity_by_id(&self, id: EntityId) -> Option<Dummy> {
            self.0.iter().find(|d| d.id == id).copied()
        }
    }

    fn dummy(id: u16, kind: ActorKind, x: i32, y: i32) -> Dummy {
        Dummy {
            id: EntityId(id),
            kind,
            position: Position::new(x, y),
            alive: true,
        }
    }

    fn field() -> Field {
        Field(vec![
            dummy(1, ActorKind::Player, 10, 10),
            dummy(2, ActorKind::Monster, 11, 10),
            dummy(3, ActorKind::Player, 12, 12),
            dummy(4, ActorKind::Monster, 13, 9),
            dummy(5, ActorKind::Monster, 40, 40),
        ])
    }

    fn request(extra: Option<u16>, hits_players: bool) -> TargetRequest {
        TargetRequest {
            attacker: EntityId(1),
            area: TargetArea::new(Position::new(11, 10), 2),
            extra_target: extra.map(EntityId),
            hits_players,
        }
    }

    fn ids(targets: &[Dummy]) -> Vec<u16> {
        targets.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn excludes_players_and_attacker_by_default() {
        let targets = resolve_targets(&field(), &request(None, false));
        assert_eq!(ids(&targets), [2, 4]);
    }

    #[test]
    fn includes_other_players_when_allowed() {
        let targets = resolve_targets(&field(), &request(None, true));
        assert_eq!(ids(&targets), [2, 3, 4]);
    }

    #[test]
    fn extra_target_is_appended() {
        let targets = resolve_targets(&field(), &request(Some(5), false));
        assert_eq!(ids(&targets), [2, 4, 5]);
    }

    #[test]
    fn extra_target_inside_area_is_counted_once() {
        let targets = resolve_targets(&field(), &request(Some(4), false));
        assert_eq!(ids(&targets), [2, 4]);
    }

    #[test]
    fn extra_target_follows_player_policy() {
        let field = Field(vec![
            dummy(1, ActorKind::Player, 10, 10),
            dummy(9, ActorKind::Player, 50, 50),
        ]);
        assert!(resolve_targets(&field, &request(Some(9), false)).is_empty());
        assert_eq!(ids(&resolve_targets(&field, &request(Some(9), true))), [9]);
    }

    #[test]
    fn dead_entities_are_skipped_in_area_and_as_extra() {
        let mut field = field();
        for dummy in &mut field.0 {
            if dummy.id == EntityId(4) || dummy.id == EntityId(5) {
                dummy.alive = false;
            }
        }

        let targets = resolve_targets(&field, &request(Some(5), false));
        assert_eq!(ids(&targets), [2]);
    }

    #[test]
    fn sentinel_and_unknown_extra_targets_are_ignored() {
        let targets = resolve_targets(&field(), &request(Some(0xFFFF), false));
        assert_eq!(ids(&targets), [2, 4]);

        let targets = resolve_targets(&field(), &request(Some(777), false));
        assert_eq!(ids(&targets), [2, 4]);
    }
}
