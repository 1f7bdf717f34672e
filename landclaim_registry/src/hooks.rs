// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator seams: persistence, event hooks, overrides, and accounting.
//!
//! The registry knows nothing about chat, economy, rendering, or permission
//! plugins. Everything of that sort plugs in through the traits here, the
//! same way group membership plugs in through
//! [`landclaim_trust::GroupLookup`].

use landclaim_geom::{TrustLevel, Volume};

use crate::claim::{Claim, ClaimRecord};
use crate::error::GatewayError;
use crate::ids::{ClaimId, SubjectId};

/// Durable storage for claim records.
///
/// The registry calls `save`/`delete` after an in-memory mutation has already
/// succeeded, and `load_all` once per [`Registry::open`][crate::Registry::open].
/// The on-disk shape of a record is entirely the gateway's business.
pub trait PersistenceGateway {
    /// Load every persisted record for a world.
    fn load_all(&mut self, world_id: &str) -> Result<Vec<ClaimRecord>, GatewayError>;

    /// Persist one claim's current state.
    fn save(&mut self, record: &ClaimRecord) -> Result<(), GatewayError>;

    /// Drop one claim's persisted state.
    fn delete(&mut self, claim_id: ClaimId) -> Result<(), GatewayError>;
}

/// A gateway that stores nothing. The registry becomes purely in-memory.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullGateway;

impl PersistenceGateway for NullGateway {
    fn load_all(&mut self, _world_id: &str) -> Result<Vec<ClaimRecord>, GatewayError> {
        Ok(Vec::new())
    }

    fn save(&mut self, _record: &ClaimRecord) -> Result<(), GatewayError> {
        Ok(())
    }

    fn delete(&mut self, _claim_id: ClaimId) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// A mutation about to happen or just applied.
#[derive(Debug)]
pub enum ClaimEvent<'a> {
    /// A claim is being created. In the pre-hook the claim is not yet
    /// registered; its id is already final.
    Create {
        /// The claim being created.
        claim: &'a Claim,
    },
    /// A claim's bounds are changing to `to`.
    Resize {
        /// The claim being resized.
        claim: &'a Claim,
        /// The bounds after the resize.
        to: Volume,
    },
    /// A claim is being deleted.
    Delete {
        /// The claim being deleted.
        claim: &'a Claim,
    },
    /// A claim's owner is changing to `to`.
    Transfer {
        /// The claim changing hands.
        claim: &'a Claim,
        /// The new owner.
        to: SubjectId,
    },
    /// A claim's trust table is changing at `level`.
    TrustChange {
        /// The claim whose trust is changing.
        claim: &'a Claim,
        /// The affected trust level.
        level: TrustLevel,
    },
}

/// A pre-hook's verdict on a pending mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookDecision {
    /// Let the mutation proceed.
    Proceed,
    /// Cancel the mutation; the reason is returned to the caller as
    /// [`ClaimError::EventCancelled`][crate::ClaimError::EventCancelled].
    Cancel(String),
}

/// Observes and may veto registry mutations.
///
/// `before` runs after validation but before any state changes; the first
/// hook to cancel aborts the operation. `after` runs once the mutation is
/// fully applied and is informational only. Hooks needing mutable state use
/// interior mutability.
pub trait EventHook {
    /// Veto point for a pending mutation.
    fn before(&self, event: &ClaimEvent<'_>) -> HookDecision {
        let _ = event;
        HookDecision::Proceed
    }

    /// Notification of an applied mutation.
    fn after(&self, event: &ClaimEvent<'_>) {
        let _ = event;
    }
}

/// Short-circuits trust resolution for privileged subjects.
///
/// Models capabilities like "ignore all claims" without the registry knowing
/// which permission system grants them.
pub trait OverridePredicate {
    /// Whether `subject` bypasses trust checks in `claim`.
    fn allows(&self, subject: &SubjectId, claim: &Claim) -> bool;
}

/// Answers how much claim area a subject may still spend.
///
/// Consulted when creating or growing Basic claims. The accounting itself
/// (block accrual, purchases) lives outside the registry; a gauge returning
/// `None` leaves the subject unmetered.
pub trait ResourceGauge {
    /// Remaining footprint-area budget for `subject`, in columns, or `None`
    /// if the subject is not metered.
    fn available_area(&self, subject: &SubjectId) -> Option<i64>;
}
