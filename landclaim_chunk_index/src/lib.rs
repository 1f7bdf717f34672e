// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landclaim Chunk Index: a coarse uniform grid over claim footprints.
//!
//! The index buckets top-level claims into fixed 16×16 cells on the X/Z plane
//! (mirroring block-storage chunking) and answers queries by touching only the
//! cells a point or footprint covers. It is intended for workloads with:
//! - claim counts in the thousands,
//! - point queries on every entity movement tick, and
//! - occasional footprint updates on create/resize/delete.
//!
//! Child claims are not indexed separately; callers descend into children from
//! a top-level match. Updates are incremental: a claim's covered cell set is
//! recomputed from its new bounds and the index applies the set difference,
//! never a full rebuild.
//!
//! # Example
//!
//! ```rust
//! use landclaim_chunk_index::{CellKey, ChunkIndex, covered_cells};
//! use landclaim_geom::{BlockPos, Volume};
//!
//! let mut index: ChunkIndex<u32> = ChunkIndex::new();
//! let vol = Volume::column(BlockPos::new(0, 0, 0), BlockPos::new(40, 0, 40));
//! let cells = covered_cells(&vol);
//! index.insert(7, &cells);
//!
//! assert_eq!(index.candidates_at(20, 20), &[7]);
//! assert!(index.candidates_at(-10, 20).is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod key;

pub use index::ChunkIndex;
pub use key::{CELL_SIZE, CellKey, CellSet, covered_cells};
