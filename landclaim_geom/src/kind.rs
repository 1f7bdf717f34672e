// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Claim taxonomy and the enclosure compatibility matrix.

use core::fmt;

/// The kind of a claim.
///
/// Behavioral differences between kinds are kept as pure functions over the
/// tag (see [`ClaimKind::can_enclose`]) rather than scattered branching, so
/// geometry and registry code stay kind-agnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClaimKind {
    /// The implicit claim covering any point not inside another claim.
    Wilderness,
    /// A server-owned claim with no player owner.
    Admin,
    /// An ordinary player-owned claim.
    Basic,
    /// A top-level claim that can contain Basic claims and subdivisions.
    Town,
    /// A child claim; always has a parent and never has children.
    Subdivision,
}

impl ClaimKind {
    /// Whether a claim of this kind may contain a claim of kind `inner`.
    ///
    /// This is the full compatibility matrix: Wilderness encloses anything,
    /// Town and Admin enclose Basic claims and subdivisions, Basic encloses
    /// only subdivisions, and subdivisions enclose nothing.
    pub const fn can_enclose(self, inner: Self) -> bool {
        match self {
            Self::Wilderness => true,
            Self::Admin | Self::Town => matches!(inner, Self::Basic | Self::Subdivision),
            Self::Basic => matches!(inner, Self::Subdivision),
            Self::Subdivision => false,
        }
    }

    /// Whether this kind carries a player owner. Admin and Wilderness claims
    /// have none; subdivisions defer to their top-level ancestor.
    pub const fn is_owned(self) -> bool {
        matches!(self, Self::Basic | Self::Town)
    }

    /// Whether this kind is a subdivision.
    pub const fn is_subdivision(self) -> bool {
        matches!(self, Self::Subdivision)
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Wilderness => "wilderness",
            Self::Admin => "admin",
            Self::Basic => "basic",
            Self::Town => "town",
            Self::Subdivision => "subdivision",
        };
        f.write_str(s)
    }
}
