// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Claim and subject identities.

use std::fmt;

use ulid::Ulid;

/// The identity of a claim.
///
/// Assigned once at creation and never reassigned; deleting a claim
/// tombstones its id rather than recycling it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct ClaimId(Ulid);

impl ClaimId {
    /// Mint a fresh id.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// The underlying ulid.
    pub const fn as_ulid(self) -> Ulid {
        self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Ulid> for ClaimId {
    fn from(value: Ulid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The identity of an acting subject (a player, typically).
///
/// Minted by the host; the registry only compares and stores these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct SubjectId(Ulid);

impl SubjectId {
    /// Mint a fresh id. Mostly useful in tests; hosts usually convert their
    /// own identities via [`From<Ulid>`].
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// The underlying ulid.
    pub const fn as_ulid(self) -> Ulid {
        self.0
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Ulid> for SubjectId {
    fn from(value: Ulid) -> Self {
        Self(value)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct() {
        assert_ne!(ClaimId::new(), ClaimId::new());
        assert_ne!(SubjectId::new(), SubjectId::new());
    }

    #[test]
    fn ulid_roundtrip() {
        let ulid = Ulid::new();
        assert_eq!(ClaimId::from(ulid).as_ulid(), ulid);
    }
}
