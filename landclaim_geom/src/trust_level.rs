// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The trust lattice: levels and their implication mask.

use core::fmt;

/// A level of granted capability inside a claim.
///
/// Levels form a partial order: Accessor sits below Builder and Container
/// (which are unordered between themselves), and Manager sits above all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrustLevel {
    /// May enter and interact passively.
    Accessor,
    /// May modify blocks.
    Builder,
    /// May open containers.
    Container,
    /// May manage the claim itself (trust lists, subdivisions).
    Manager,
}

bitflags::bitflags! {
    /// A set of trust levels, used when expanding a grant into everything it
    /// implies.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TrustMask: u8 {
        /// The [`TrustLevel::Accessor`] bit.
        const ACCESSOR  = 0b0001;
        /// The [`TrustLevel::Builder`] bit.
        const BUILDER   = 0b0010;
        /// The [`TrustLevel::Container`] bit.
        const CONTAINER = 0b0100;
        /// The [`TrustLevel::Manager`] bit.
        const MANAGER   = 0b1000;
    }
}

impl TrustLevel {
    /// All four levels, in ascending implication order.
    pub const ALL: [Self; 4] = [Self::Accessor, Self::Builder, Self::Container, Self::Manager];

    /// The single bit for this level.
    pub const fn bit(self) -> TrustMask {
        match self {
            Self::Accessor => TrustMask::ACCESSOR,
            Self::Builder => TrustMask::BUILDER,
            Self::Container => TrustMask::CONTAINER,
            Self::Manager => TrustMask::MANAGER,
        }
    }

    /// Every level a grant at this level implies, including itself.
    ///
    /// Builder and Container each imply Accessor; Manager implies everything.
    pub const fn grants(self) -> TrustMask {
        match self {
            Self::Accessor => TrustMask::ACCESSOR,
            Self::Builder => TrustMask::ACCESSOR.union(TrustMask::BUILDER),
            Self::Container => TrustMask::ACCESSOR.union(TrustMask::CONTAINER),
            Self::Manager => TrustMask::all(),
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accessor => "accessor",
            Self::Builder => "builder",
            Self::Container => "container",
            Self::Manager => "manager",
        };
        f.write_str(s)
    }
}
