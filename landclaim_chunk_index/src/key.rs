// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed cell keys and footprint-to-cell mapping.

use core::fmt;

use smallvec::SmallVec;

use landclaim_geom::Volume;

/// Grid cell edge length in blocks, matching block-storage chunking.
pub const CELL_SIZE: i32 = 16;

/// The covered-cell set of a claim footprint.
///
/// Most claims span a handful of cells; the inline capacity keeps those off
/// the heap.
pub type CellSet = SmallVec<[CellKey; 8]>;

/// A grid cell on the X/Z plane, packed into 64 bits.
///
/// The high half carries the cell X coordinate and the low half the cell Z
/// coordinate, so the key doubles as a stable hash-map key and a compact
/// on-claim cache entry.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellKey(u64);

impl CellKey {
    /// Build a key from cell coordinates.
    #[inline]
    pub const fn from_cell(cell_x: i32, cell_z: i32) -> Self {
        Self(((cell_x as u32 as u64) << 32) | (cell_z as u32 as u64))
    }

    /// Build a key from block coordinates.
    ///
    /// Euclidean division rounds toward negative infinity, so blocks at
    /// negative coordinates land in the correct cell.
    #[inline]
    pub const fn from_block(x: i32, z: i32) -> Self {
        Self::from_cell(x.div_euclid(CELL_SIZE), z.div_euclid(CELL_SIZE))
    }

    /// The cell X coordinate.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The high 32 bits are the cell X coordinate by construction."
    )]
    pub const fn cell_x(self) -> i32 {
        (self.0 >> 32) as u32 as i32
    }

    /// The cell Z coordinate.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The low 32 bits are the cell Z coordinate by construction."
    )]
    pub const fn cell_z(self) -> i32 {
        self.0 as u32 as i32
    }
}

impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellKey")
            .field(&self.cell_x())
            .field(&self.cell_z())
            .finish()
    }
}

/// Compute the set of cells a footprint covers.
///
/// Both corner cells are included; a footprint never covers zero cells.
pub fn covered_cells(volume: &Volume) -> CellSet {
    let x0 = volume.lesser().x.div_euclid(CELL_SIZE);
    let x1 = volume.greater().x.div_euclid(CELL_SIZE);
    let z0 = volume.lesser().z.div_euclid(CELL_SIZE);
    let z1 = volume.greater().z.div_euclid(CELL_SIZE);
    let mut out = CellSet::new();
    for cx in x0..=x1 {
        for cz in z0..=z1 {
            out.push(CellKey::from_cell(cx, cz));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use landclaim_geom::BlockPos;

    #[test]
    fn key_roundtrips_cell_coords() {
        for (cx, cz) in [(0, 0), (1, -1), (-1, 1), (i32::MAX, i32::MIN), (-512, -33)] {
            let k = CellKey::from_cell(cx, cz);
            assert_eq!(k.cell_x(), cx);
            assert_eq!(k.cell_z(), cz);
        }
    }

    #[test]
    fn negative_blocks_floor_toward_negative_cells() {
        assert_eq!(CellKey::from_block(0, 0), CellKey::from_cell(0, 0));
        assert_eq!(CellKey::from_block(15, 15), CellKey::from_cell(0, 0));
        assert_eq!(CellKey::from_block(16, 0), CellKey::from_cell(1, 0));
        assert_eq!(CellKey::from_block(-1, -1), CellKey::from_cell(-1, -1));
        assert_eq!(CellKey::from_block(-16, -17), CellKey::from_cell(-1, -2));
    }

    #[test]
    fn covered_cells_spans_inclusive_corners() {
        // A footprint exactly aligned to one cell.
        let one = Volume::column(BlockPos::new(0, 0, 0), BlockPos::new(15, 0, 15));
        assert_eq!(covered_cells(&one).len(), 1);

        // One block over the edge adds a full row and column of cells.
        let spill = Volume::column(BlockPos::new(0, 0, 0), BlockPos::new(16, 0, 16));
        assert_eq!(covered_cells(&spill).len(), 4);

        // Straddling the origin.
        let origin = Volume::column(BlockPos::new(-8, 0, -8), BlockPos::new(8, 0, 8));
        let cells = covered_cells(&origin);
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&CellKey::from_cell(-1, -1)));
        assert!(cells.contains(&CellKey::from_cell(0, 0)));
    }
}
