// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landclaim Trust: trust tables and the trust resolution walk.
//!
//! This crate answers "is subject S trusted at level L in claim C" given C's
//! trust table and the tables of its inheriting ancestors. It is generic over
//! the subject identity type `S`, so callers can use any small copyable
//! handle; group membership is resolved through the [`GroupLookup`] trait and
//! no membership logic lives here.
//!
//! - [`TrustList`]: one level's grants — subject identities, group names, and
//!   a public wildcard.
//! - [`TrustTable`]: the four lists of a claim, with the implication ladder
//!   from [`landclaim_geom::TrustLevel`] applied when reading.
//! - [`resolve`]: the precedence walk over a claim's ancestor chain.
//!
//! Resolution order, first match wins:
//! 1. The effective owner (nearest chain entry carrying an owner) is trusted
//!    at every level.
//! 2. A public wildcard at the requested level or any level implying it.
//! 3. The subject's own identity in an implying list.
//! 4. A group the subject belongs to in an implying list.
//! 5. If the claim inherits from its parent, the walk continues there.
//!
//! Caller-supplied override capabilities (step 2 of the documented precedence
//! in the registry) short-circuit before this crate is consulted.
//!
//! # Example
//!
//! ```rust
//! use landclaim_geom::TrustLevel;
//! use landclaim_trust::{ClaimTrustLink, NoGroups, TrustTable, resolve};
//!
//! let mut table: TrustTable<u32> = TrustTable::new();
//! table.grant_subject(TrustLevel::Builder, 42);
//!
//! let chain = [ClaimTrustLink::new(Some(7), &table, false)];
//! // A builder grant implies accessor…
//! assert!(resolve(&chain, &42, TrustLevel::Accessor, &NoGroups));
//! // …but not container.
//! assert!(!resolve(&chain, &42, TrustLevel::Container, &NoGroups));
//! // The owner is trusted at every level.
//! assert!(resolve(&chain, &7, TrustLevel::Manager, &NoGroups));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod resolve;
mod table;

pub use resolve::{ClaimTrustLink, resolve};
pub use table::{TrustList, TrustTable};

/// Resolves a group name to membership for a subject.
///
/// Group semantics (permission-system groups, scoreboard teams, …) are
/// entirely external; this crate only asks yes/no questions.
pub trait GroupLookup<S> {
    /// Whether `subject` belongs to the named group.
    fn is_member(&self, group: &str, subject: &S) -> bool;
}

/// A [`GroupLookup`] that knows no groups. Useful as a default collaborator
/// and in tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoGroups;

impl<S> GroupLookup<S> for NoGroups {
    fn is_member(&self, _group: &str, _subject: &S) -> bool {
        false
    }
}
