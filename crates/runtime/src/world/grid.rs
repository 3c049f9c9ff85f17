//! Sparse bucket grid for area queries.

use std::collections::HashMap;

use realm_core::{EntityId, Position, TargetArea};

/// Buckets entity ids by square cells of `cell_size` tiles.
#[derive(Debug)]
pub(crate) struct SparseGrid {
    cell_size: i32,
    cells: HashMap<(i32, i32), Vec<EntityId>>,
}

impl SparseGrid {
    pub(crate) fn new(cell_size: u8) -> Self {
        Self {
            cell_size: i32::from(cell_size.max(1)),
            cells: HashMap::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, position: Position) -> (i32, i32) {
        (
            position.x.div_euclid(self.cell_size),
            position.y.div_euclid(self.cell_size),
        )
    }

    pub(crate) fn insert(&mut self, entity: EntityId, position: Position) {
        let coord = self.cell_coord(position);
        self.cells.entry(coord).or_default().push(entity);
    }

    pub(crate) fn remove(&mut self, entity: EntityId, position: Position) {
        let coord = self.cell_coord(position);
        if let Some(cell) = self.cells.get_mut(&coord) {
            cell.retain(|&e| e != entity);
            if cell.is_empty() {
                self.cells.remove(&coord);
            }
        }
    }

    /// Ids in every cell overlapping `area`, row by row.
    ///
    /// Candidates still need an exact distance check.
    pub(crate) fn candidates(&self, area: TargetArea) -> impl Iterator<Item = EntityId> + '_ {
        let radius = i32::from(area.radius);
        let (min_x, min_y) = self.cell_coord(Position::new(
            area.center.x.saturating_sub(radius),
            area.center.y.saturating_sub(radius),
        ));
        let (max_x, max_y) = self.cell_coord(Position::new(
            area.center.x.saturating_add(radius),
            area.center.y.saturating_add(radius),
        ));

        (min_y..=max_y).flat_map(move |cy| {
            (min_x..=max_x).flat_map(move |cx| {
                self.cells
                    .get(&(cx, cy))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }
}
