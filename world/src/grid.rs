//! Uniform spatial hash over the ground plane used for bullet/enemy broad-phase.

use std::collections::HashMap;

use turret_survivor_core::EnemyView;

const FALLBACK_CELL_SIZE: f32 = 4.0;

/// Integer coordinates of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Column index, `floor(x / cell_size)`.
    pub column: i32,
    /// Row index, `floor(z / cell_size)`.
    pub row: i32,
}

/// Map from cell keys to the enemy indices located inside each cell.
///
/// The grid is rebuilt from scratch every frame and read-only in between, so
/// indices stay valid until the next enemy removal.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid. Non-positive or non-finite sizes fall back to 4.0.
    #[must_use]
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            FALLBACK_CELL_SIZE
        };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Edge length of a cell.
    #[must_use]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing the provided ground coordinates.
    #[must_use]
    pub fn cell_key(&self, x: f32, z: f32) -> CellKey {
        CellKey {
            column: (x / self.cell_size).floor() as i32,
            row: (z / self.cell_size).floor() as i32,
        }
    }

    /// Discards every bucket and re-inserts each live enemy.
    pub fn rebuild(&mut self, enemies: EnemyView<'_>) {
        self.cells.clear();
        for (index, (&x, &z)) in enemies.xs().iter().zip(enemies.zs()).enumerate() {
            let key = self.cell_key(x, z);
            self.cells.entry(key).or_default().push(index);
        }
    }

    /// Enemy indices sharing a cell with the provided point, in insertion order.
    #[must_use]
    pub fn query(&self, x: f32, z: f32) -> &[usize] {
        self.cells
            .get(&self.cell_key(x, z))
            .map_or(&[], Vec::as_slice)
    }

    /// Iterator over every non-empty bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (CellKey, &[usize])> {
        self.cells
            .iter()
            .map(|(key, indices)| (*key, indices.as_slice()))
    }

    /// Number of non-empty buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.cells.len()
    }
}
