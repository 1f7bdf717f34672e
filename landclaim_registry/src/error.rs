// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for registry operations and the persistence seam.

use landclaim_geom::Axis;
use thiserror::Error;

use crate::ids::ClaimId;

/// Why a registry operation was refused.
///
/// Every variant is recoverable: the registry leaves prior state intact and
/// the caller decides what to do. The only contract violation treated as
/// fatal is a duplicate id in persisted records, which panics in debug builds
/// and is logged and skipped in release builds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The proposed volume conflicts with the named existing claim.
    #[error("volume conflicts with claim {0}")]
    Overlapping(ClaimId),
    /// The claim's kind does not permit the operation.
    #[error("wrong claim kind: {0}")]
    WrongKind(&'static str),
    /// The volume is smaller than the configured minimum on the named axis.
    #[error("extent below the configured minimum on the {0} axis")]
    BelowMinSize(Axis),
    /// The volume is larger than the configured maximum on the named axis.
    #[error("extent above the configured maximum on the {0} axis")]
    AboveMaxSize(Axis),
    /// The owner's claim-area budget cannot cover the requested footprint.
    #[error("insufficient claim area budget")]
    InsufficientResources,
    /// A pre-event hook cancelled the operation.
    #[error("cancelled by event hook: {0}")]
    EventCancelled(String),
    /// No claim with the given id exists.
    #[error("no such claim")]
    NotFound,
    /// The claim kind requires an owner and none was supplied.
    #[error("this claim kind requires an owner")]
    RequiresOwner,
    /// The volume does not fit the named parent, or the parent link is
    /// missing where one is required.
    #[error("volume does not fit the parent claim")]
    ParentMismatch,
}

/// An opaque persistence failure.
///
/// Gateway errors are surfaced as log warnings and never roll back the
/// in-memory mutation; in-memory consistency wins over durability.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GatewayError(
    /// A human-readable description of the failure.
    pub String,
);
