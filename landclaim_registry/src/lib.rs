// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landclaim Registry: one world's claims and the operations over them.
//!
//! This crate ties the pure pieces together: [`landclaim_geom`] for volume
//! predicates, [`landclaim_chunk_index`] for cell-bounded candidate lookup,
//! and [`landclaim_trust`] for the trust walk. On top it provides:
//!
//! - [`Registry`]: the claim arena, chunk index, and owner bookkeeping for
//!   one world, with atomic create/resize/delete/transfer/trust operations.
//! - [`Registry::claim_at`]: the point query service with a caller-held
//!   one-entry cache, descending to the deepest claim containing a point.
//! - [`Registry::is_trusted`]: trust resolution with override-predicate
//!   short-circuiting and hierarchy inheritance.
//! - Collaborator seams ([`PersistenceGateway`], [`EventHook`],
//!   [`OverridePredicate`], [`ResourceGauge`]) so persistence formats, chat,
//!   economy, and permission plugins stay outside the core.
//!
//! Mutations are single-threaded per world by design; the registry performs
//! no internal synchronization and never blocks on I/O. Persistence is
//! fire-and-forget: gateway failures are logged (via the [`log`] facade) and
//! never roll back an applied mutation.
//!
//! # Example
//!
//! ```rust
//! use landclaim_registry::{
//!     BlockPos, ClaimKind, CreateRequest, NullGateway, Registry, RegistryConfig, SubjectId,
//! };
//!
//! let mut registry = Registry::open("overworld", RegistryConfig::default(), Box::new(NullGateway));
//! let alice = SubjectId::new();
//! let home = registry
//!     .create(
//!         CreateRequest::new(
//!             ClaimKind::Basic,
//!             BlockPos::new(0, 0, 0),
//!             BlockPos::new(31, 255, 31),
//!         )
//!         .owned_by(alice),
//!     )
//!     .unwrap();
//!
//! assert_eq!(registry.claim_at(BlockPos::new(10, 64, 10), false, None), home);
//! ```

mod claim;
mod config;
mod error;
mod hooks;
mod ids;
mod query;
mod registry;

pub use claim::{Claim, ClaimRecord};
pub use config::RegistryConfig;
pub use error::{ClaimError, GatewayError};
pub use hooks::{
    ClaimEvent, EventHook, HookDecision, NullGateway, OverridePredicate, PersistenceGateway,
    ResourceGauge,
};
pub use ids::{ClaimId, SubjectId};
pub use registry::{CreateRequest, OrphanPolicy, Registry, TrustGrantee};

// The vocabulary types hosts need alongside the registry.
pub use landclaim_geom::{Axis, BlockPos, ClaimKind, TrustLevel, Volume};
pub use landclaim_trust::{GroupLookup, NoGroups};
