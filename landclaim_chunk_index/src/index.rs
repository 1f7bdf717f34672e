// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chunk index proper: cell → claim buckets with incremental updates.

use core::fmt::Debug;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::key::CellKey;

/// Maps grid cells to the claims whose footprints intersect them.
///
/// The payload type `P` is the caller's claim handle. The index does not
/// store footprints; callers keep each claim's covered cell set (see
/// [`covered_cells`][crate::covered_cells]) and hand the old and new sets to
/// [`ChunkIndex::replace`] on a bounds change.
#[derive(Clone)]
pub struct ChunkIndex<P: Copy + Eq + Debug> {
    cells: HashMap<CellKey, SmallVec<[P; 4]>>,
}

impl<P: Copy + Eq + Debug> Default for ChunkIndex<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Eq + Debug> Debug for ChunkIndex<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries: usize = self.cells.values().map(SmallVec::len).sum();
        f.debug_struct("ChunkIndex")
            .field("cells", &self.cells.len())
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

impl<P: Copy + Eq + Debug> ChunkIndex<P> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Register `payload` under every cell in `cells`.
    pub fn insert(&mut self, payload: P, cells: &[CellKey]) {
        for &key in cells {
            let bucket = self.cells.entry(key).or_default();
            debug_assert!(
                !bucket.contains(&payload),
                "payload already present in cell bucket"
            );
            bucket.push(payload);
        }
    }

    /// Remove `payload` from every cell in `cells`.
    pub fn remove(&mut self, payload: P, cells: &[CellKey]) {
        for &key in cells {
            if let Some(bucket) = self.cells.get_mut(&key) {
                if let Some(pos) = bucket.iter().position(|p| *p == payload) {
                    bucket.swap_remove(pos);
                }
                if bucket.is_empty() {
                    // Dropping empty cells keeps the map compact for sparse worlds.
                    self.cells.remove(&key);
                }
            }
        }
    }

    /// Move `payload` from `old_cells` to `new_cells` by set difference:
    /// stale cells are vacated and only genuinely new cells are added.
    pub fn replace(&mut self, payload: P, old_cells: &[CellKey], new_cells: &[CellKey]) {
        for &key in old_cells {
            if !new_cells.contains(&key)
                && let Some(bucket) = self.cells.get_mut(&key)
            {
                if let Some(pos) = bucket.iter().position(|p| *p == payload) {
                    bucket.swap_remove(pos);
                }
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
        for &key in new_cells {
            if !old_cells.contains(&key) {
                let bucket = self.cells.entry(key).or_default();
                debug_assert!(
                    !bucket.contains(&payload),
                    "payload already present in cell bucket"
                );
                bucket.push(payload);
            }
        }
    }

    /// The claims registered under a cell. Order is unspecified.
    pub fn candidates(&self, key: CellKey) -> &[P] {
        self.cells.get(&key).map_or(&[], |bucket| bucket.as_slice())
    }

    /// The claims registered under the cell containing block `(x, z)`.
    #[inline]
    pub fn candidates_at(&self, x: i32, z: i32) -> &[P] {
        self.candidates(CellKey::from_block(x, z))
    }

    /// Collect the distinct claims registered under any of `cells`.
    ///
    /// A claim spanning several queried cells is reported once.
    pub fn candidates_over(&self, cells: &[CellKey]) -> SmallVec<[P; 8]> {
        let mut out: SmallVec<[P; 8]> = SmallVec::new();
        for &key in cells {
            for &payload in self.candidates(key) {
                if !out.contains(&payload) {
                    out.push(payload);
                }
            }
        }
        out
    }

    /// Whether a cell has any registered claims.
    pub fn is_cell_empty(&self, key: CellKey) -> bool {
        !self.cells.contains_key(&key)
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::covered_cells;
    use landclaim_geom::{BlockPos, Volume};

    fn vol(lx: i32, lz: i32, gx: i32, gz: i32) -> Volume {
        Volume::column(BlockPos::new(lx, 0, lz), BlockPos::new(gx, 0, gz))
    }

    #[test]
    fn insert_query_remove_roundtrip() {
        let mut index: ChunkIndex<u32> = ChunkIndex::new();
        let cells = covered_cells(&vol(0, 0, 40, 40));
        index.insert(1, &cells);

        assert_eq!(index.candidates_at(20, 20), &[1]);
        assert_eq!(index.candidates_at(39, 0), &[1]);
        assert!(index.candidates_at(48, 48).is_empty());

        index.remove(1, &cells);
        assert!(index.candidates_at(20, 20).is_empty());
        assert_eq!(index.cell_count(), 0);
    }

    #[test]
    fn replace_applies_set_difference() {
        let mut index: ChunkIndex<u32> = ChunkIndex::new();
        let old = covered_cells(&vol(0, 0, 31, 31));
        index.insert(1, &old);

        // Shift east; the overlap cells must survive, the west edge must clear.
        let new = covered_cells(&vol(16, 0, 47, 31));
        index.replace(1, &old, &new);

        assert!(index.candidates_at(0, 0).is_empty());
        assert_eq!(index.candidates_at(16, 0), &[1]);
        assert_eq!(index.candidates_at(40, 16), &[1]);

        // Every new cell lists the claim exactly once.
        for &key in &new {
            assert_eq!(index.candidates(key), &[1]);
        }
        // Every vacated cell is gone.
        for &key in &old {
            if !new.contains(&key) {
                assert!(index.is_cell_empty(key));
            }
        }
    }

    #[test]
    fn candidates_over_deduplicates() {
        let mut index: ChunkIndex<u32> = ChunkIndex::new();
        let wide = covered_cells(&vol(0, 0, 100, 100));
        index.insert(1, &wide);
        let small = covered_cells(&vol(0, 0, 10, 10));
        index.insert(2, &small);

        let hits = index.candidates_over(&wide);
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&1));
        assert!(hits.contains(&2));
    }

    #[test]
    fn shared_cells_hold_multiple_claims() {
        let mut index: ChunkIndex<u32> = ChunkIndex::new();
        let a = covered_cells(&vol(0, 0, 15, 15));
        let b = covered_cells(&vol(8, 8, 23, 23));
        index.insert(1, &a);
        index.insert(2, &b);

        let shared = index.candidates_at(10, 10);
        assert_eq!(shared.len(), 2);

        index.remove(1, &a);
        assert_eq!(index.candidates_at(10, 10), &[2]);
    }
}
