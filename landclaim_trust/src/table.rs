// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trust lists and tables.

use alloc::string::String;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;

use landclaim_geom::{TrustLevel, TrustMask};

use crate::GroupLookup;

/// The grants recorded at a single trust level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrustList<S: Eq + Hash> {
    /// Directly trusted subject identities.
    pub subjects: HashSet<S>,
    /// Trusted group names, resolved externally via [`GroupLookup`].
    pub groups: HashSet<String>,
    /// Whether everyone is trusted at this level.
    pub public: bool,
}

impl<S: Eq + Hash> Default for TrustList<S> {
    fn default() -> Self {
        Self {
            subjects: HashSet::new(),
            groups: HashSet::new(),
            public: false,
        }
    }
}

impl<S: Eq + Hash> TrustList<S> {
    /// Whether nothing is granted at this level.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty() && self.groups.is_empty() && !self.public
    }
}

/// The four trust lists of a claim.
///
/// Reads apply the implication ladder: a grant at Builder, Container, or
/// Manager also answers for Accessor, and a Manager grant answers for
/// everything (see [`TrustLevel::grants`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrustTable<S: Eq + Hash> {
    accessor: TrustList<S>,
    builder: TrustList<S>,
    container: TrustList<S>,
    manager: TrustList<S>,
}

impl<S: Eq + Hash> Default for TrustTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash> TrustTable<S> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            accessor: TrustList::default(),
            builder: TrustList::default(),
            container: TrustList::default(),
            manager: TrustList::default(),
        }
    }

    /// The list recorded at `level`, without implication.
    pub fn list(&self, level: TrustLevel) -> &TrustList<S> {
        match level {
            TrustLevel::Accessor => &self.accessor,
            TrustLevel::Builder => &self.builder,
            TrustLevel::Container => &self.container,
            TrustLevel::Manager => &self.manager,
        }
    }

    fn list_mut(&mut self, level: TrustLevel) -> &mut TrustList<S> {
        match level {
            TrustLevel::Accessor => &mut self.accessor,
            TrustLevel::Builder => &mut self.builder,
            TrustLevel::Container => &mut self.container,
            TrustLevel::Manager => &mut self.manager,
        }
    }

    /// Grant `subject` trust at `level`. Returns false if already present.
    pub fn grant_subject(&mut self, level: TrustLevel, subject: S) -> bool {
        self.list_mut(level).subjects.insert(subject)
    }

    /// Revoke `subject`'s direct grant at `level`. Returns false if absent.
    pub fn revoke_subject(&mut self, level: TrustLevel, subject: &S) -> bool {
        self.list_mut(level).subjects.remove(subject)
    }

    /// Grant a named group trust at `level`. Returns false if already present.
    pub fn grant_group(&mut self, level: TrustLevel, group: String) -> bool {
        self.list_mut(level).groups.insert(group)
    }

    /// Revoke a named group's grant at `level`. Returns false if absent.
    pub fn revoke_group(&mut self, level: TrustLevel, group: &str) -> bool {
        self.list_mut(level).groups.remove(group)
    }

    /// Set the public wildcard at `level`.
    pub fn set_public(&mut self, level: TrustLevel, public: bool) {
        self.list_mut(level).public = public;
    }

    /// Whether every list is empty.
    pub fn is_empty(&self) -> bool {
        TrustLevel::ALL.iter().all(|&l| self.list(l).is_empty())
    }

    /// Drop every grant.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether any list names `subject` directly.
    pub fn mentions_subject(&self, subject: &S) -> bool {
        TrustLevel::ALL
            .iter()
            .any(|&l| self.list(l).subjects.contains(subject))
    }

    /// The levels granted to everyone, with implication applied.
    pub fn public_mask(&self) -> TrustMask {
        let mut mask = TrustMask::empty();
        for &level in &TrustLevel::ALL {
            if self.list(level).public {
                mask |= level.grants();
            }
        }
        mask
    }

    /// The levels granted to `subject` by direct identity, with implication
    /// applied.
    pub fn subject_mask(&self, subject: &S) -> TrustMask {
        let mut mask = TrustMask::empty();
        for &level in &TrustLevel::ALL {
            if self.list(level).subjects.contains(subject) {
                mask |= level.grants();
            }
        }
        mask
    }

    /// The levels granted to `subject` through group membership, with
    /// implication applied.
    pub fn group_mask(&self, subject: &S, groups: &dyn GroupLookup<S>) -> TrustMask {
        let mut mask = TrustMask::empty();
        for &level in &TrustLevel::ALL {
            if self
                .list(level)
                .groups
                .iter()
                .any(|g| groups.is_member(g, subject))
            {
                mask |= level.grants();
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoGroups;
    use alloc::string::ToString;

    #[test]
    fn implication_ladder_in_masks() {
        let mut t: TrustTable<u32> = TrustTable::new();
        t.grant_subject(TrustLevel::Container, 1);
        let mask = t.subject_mask(&1);
        assert!(mask.contains(TrustMask::CONTAINER));
        assert!(mask.contains(TrustMask::ACCESSOR));
        assert!(!mask.contains(TrustMask::BUILDER));
        assert!(!mask.contains(TrustMask::MANAGER));

        t.grant_subject(TrustLevel::Manager, 2);
        assert_eq!(t.subject_mask(&2), TrustMask::all());
    }

    #[test]
    fn public_wildcard_mask() {
        let mut t: TrustTable<u32> = TrustTable::new();
        assert_eq!(t.public_mask(), TrustMask::empty());
        t.set_public(TrustLevel::Builder, true);
        assert!(t.public_mask().contains(TrustMask::BUILDER));
        assert!(t.public_mask().contains(TrustMask::ACCESSOR));
        t.set_public(TrustLevel::Builder, false);
        assert_eq!(t.public_mask(), TrustMask::empty());
    }

    #[test]
    fn group_mask_consults_lookup() {
        struct OneGroup;
        impl GroupLookup<u32> for OneGroup {
            fn is_member(&self, group: &str, subject: &u32) -> bool {
                group == "council" && *subject == 9
            }
        }

        let mut t: TrustTable<u32> = TrustTable::new();
        t.grant_group(TrustLevel::Manager, "council".to_string());
        assert_eq!(t.group_mask(&9, &OneGroup), TrustMask::all());
        assert_eq!(t.group_mask(&10, &OneGroup), TrustMask::empty());
        assert_eq!(t.group_mask(&9, &NoGroups), TrustMask::empty());
    }

    #[test]
    fn grant_and_revoke_roundtrip() {
        let mut t: TrustTable<u32> = TrustTable::new();
        assert!(t.grant_subject(TrustLevel::Builder, 5));
        assert!(!t.grant_subject(TrustLevel::Builder, 5));
        assert!(t.mentions_subject(&5));
        assert!(t.revoke_subject(TrustLevel::Builder, &5));
        assert!(!t.revoke_subject(TrustLevel::Builder, &5));
        assert!(!t.mentions_subject(&5));
        assert!(t.is_empty());
    }
}
