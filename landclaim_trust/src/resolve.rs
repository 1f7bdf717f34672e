// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The precedence walk over a claim's ancestor chain.

use core::fmt::Debug;
use core::hash::Hash;

use landclaim_geom::TrustLevel;

use crate::{GroupLookup, TrustTable};

/// One claim's contribution to a trust resolution, as materialized by the
/// caller: the claim itself first, then each ancestor in order.
#[derive(Copy, Clone, Debug)]
pub struct ClaimTrustLink<'a, S: Eq + Hash> {
    owner: Option<S>,
    table: &'a TrustTable<S>,
    inherits_parent: bool,
}

impl<'a, S: Copy + Eq + Hash> ClaimTrustLink<'a, S> {
    /// Build a link from a claim's owner, trust table, and inheritance flag.
    pub fn new(owner: Option<S>, table: &'a TrustTable<S>, inherits_parent: bool) -> Self {
        Self {
            owner,
            table,
            inherits_parent,
        }
    }
}

/// Resolve whether `subject` is trusted at `level` for the claim at the head
/// of `chain`.
///
/// `chain` lists the claim and then its ancestors, nearest first. The walk
/// stops at the first link that does not inherit from its parent; links past
/// that point never influence the answer. The effective owner — the nearest
/// link carrying an owner — is trusted at every level regardless of where the
/// walk stops, which is how an ownerless subdivision answers for its
/// top-level claim's owner.
pub fn resolve<S: Copy + Eq + Hash + Debug>(
    chain: &[ClaimTrustLink<'_, S>],
    subject: &S,
    level: TrustLevel,
    groups: &dyn GroupLookup<S>,
) -> bool {
    // Effective owner outranks the lists.
    if let Some(owner) = chain.iter().find_map(|link| link.owner)
        && owner == *subject
    {
        return true;
    }

    let bit = level.bit();
    for (i, link) in chain.iter().enumerate() {
        if link.table.public_mask().contains(bit) {
            return true;
        }
        if link.table.subject_mask(subject).contains(bit) {
            return true;
        }
        if link.table.group_mask(subject, groups).contains(bit) {
            return true;
        }
        let has_parent = i + 1 < chain.len();
        if !(link.inherits_parent && has_parent) {
            break;
        }
    }
    false
}
