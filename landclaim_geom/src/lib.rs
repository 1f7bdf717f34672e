// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landclaim Geom: integer block-space geometry for land claims.
//!
//! Landclaim Geom is the pure, stateless core of the claim system.
//!
//! - [`BlockPos`]: an integer 3-vector in world block coordinates.
//! - [`Volume`]: a normalized axis-aligned claim volume with inclusive bounds
//!   and a cuboid flag controlling whether the Y axis participates in
//!   containment.
//! - Predicates over volumes: containment, footprint overlap, and the
//!   "banding across" case where one volume cuts fully through another
//!   without either containing the other.
//! - [`ClaimKind`]: the claim taxonomy, with the enclosure compatibility
//!   matrix expressed as a pure function over kind pairs
//!   ([`ClaimKind::can_enclose`]).
//! - [`TrustLevel`] and [`TrustMask`]: the trust lattice
//!   (Accessor < Builder/Container < Manager) used by trust resolution.
//!
//! Everything here is a plain function or method over plain data; the stateful
//! registry and spatial index build on top of this crate.
//!
//! # Example
//!
//! ```rust
//! use landclaim_geom::{BlockPos, Volume};
//!
//! // Column claims ignore height; corners are normalized on construction.
//! let a = Volume::column(BlockPos::new(50, 70, 50), BlockPos::new(0, 0, 0));
//! assert!(a.contains(BlockPos::new(25, -10, 25), true));
//!
//! let b = Volume::column(BlockPos::new(25, 0, 25), BlockPos::new(75, 70, 75));
//! assert!(a.overlaps(&b));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod kind;
mod trust_level;
mod volume;

pub use kind::ClaimKind;
pub use trust_level::{TrustLevel, TrustMask};
pub use volume::{Axis, BlockPos, Volume};
