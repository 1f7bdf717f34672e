// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The claim entity and its persisted form.

use landclaim_chunk_index::{CellKey, CellSet};
use landclaim_geom::{BlockPos, ClaimKind, Volume};
use landclaim_trust::TrustTable;

use crate::ids::{ClaimId, SubjectId};

/// A named, ownable axis-aligned volume in one world.
///
/// Claims form a shallow hierarchy (Town → Basic → Subdivision at most);
/// parent and child links are stored as ids into the registry's claim map,
/// never as owning pointers. All mutation goes through the registry so that
/// geometry and hierarchy invariants are re-validated on every change.
#[derive(Clone, Debug)]
pub struct Claim {
    id: ClaimId,
    kind: ClaimKind,
    volume: Volume,
    owner: Option<SubjectId>,
    parent: Option<ClaimId>,
    children: Vec<ClaimId>,
    trust: TrustTable<SubjectId>,
    inherits_parent: bool,
    // Covered chunk cells, cached while the claim is top-level (children are
    // not indexed). Kept in sync with the volume by the registry.
    cells: CellSet,
}

impl Claim {
    pub(crate) fn new(
        id: ClaimId,
        kind: ClaimKind,
        volume: Volume,
        owner: Option<SubjectId>,
        parent: Option<ClaimId>,
        inherits_parent: bool,
    ) -> Self {
        Self {
            id,
            kind,
            volume,
            owner,
            parent,
            children: Vec::new(),
            trust: TrustTable::new(),
            inherits_parent,
            cells: CellSet::new(),
        }
    }

    pub(crate) fn from_record(record: ClaimRecord) -> Self {
        let mut claim = Self::new(
            record.id,
            record.kind,
            Volume::new(record.lesser, record.greater, record.cuboid),
            record.owner,
            record.parent,
            record.inherits_parent,
        );
        claim.trust = record.trust;
        claim
    }

    /// The persisted form of this claim.
    pub fn to_record(&self) -> ClaimRecord {
        ClaimRecord {
            id: self.id,
            kind: self.kind,
            lesser: self.volume.lesser(),
            greater: self.volume.greater(),
            cuboid: self.volume.is_cuboid(),
            owner: self.owner,
            parent: self.parent,
            trust: self.trust.clone(),
            inherits_parent: self.inherits_parent,
        }
    }

    /// The claim's immutable identity.
    #[inline(always)]
    pub const fn id(&self) -> ClaimId {
        self.id
    }

    /// The claim's kind.
    #[inline(always)]
    pub const fn kind(&self) -> ClaimKind {
        self.kind
    }

    /// The claim's current volume.
    #[inline(always)]
    pub const fn volume(&self) -> Volume {
        self.volume
    }

    /// The owning subject, if the kind carries one.
    #[inline(always)]
    pub const fn owner(&self) -> Option<SubjectId> {
        self.owner
    }

    /// The parent claim, if any.
    #[inline(always)]
    pub const fn parent(&self) -> Option<ClaimId> {
        self.parent
    }

    /// The direct children, in admission order.
    pub fn children(&self) -> &[ClaimId] {
        &self.children
    }

    /// The claim's trust table.
    pub fn trust(&self) -> &TrustTable<SubjectId> {
        &self.trust
    }

    /// Whether unresolved trust checks fall through to the parent.
    #[inline(always)]
    pub const fn inherits_parent(&self) -> bool {
        self.inherits_parent
    }

    /// The chunk cells this claim is indexed under (empty for children).
    pub fn cells(&self) -> &[CellKey] {
        &self.cells
    }

    pub(crate) fn set_kind(&mut self, kind: ClaimKind) {
        self.kind = kind;
    }

    pub(crate) fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
    }

    pub(crate) fn set_owner(&mut self, owner: Option<SubjectId>) {
        self.owner = owner;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ClaimId>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<ClaimId> {
        &mut self.children
    }

    pub(crate) fn trust_mut(&mut self) -> &mut TrustTable<SubjectId> {
        &mut self.trust
    }

    pub(crate) fn set_cells(&mut self, cells: CellSet) {
        self.cells = cells;
    }

    pub(crate) fn take_cells(&mut self) -> CellSet {
        std::mem::take(&mut self.cells)
    }
}

/// The exchange form of a claim handed to the persistence gateway.
///
/// Child links and cached cells are derived state and deliberately absent;
/// they are rebuilt from parent links and volumes on load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClaimRecord {
    /// The claim's identity.
    pub id: ClaimId,
    /// The claim's kind.
    pub kind: ClaimKind,
    /// Componentwise-minimum corner.
    pub lesser: BlockPos,
    /// Componentwise-maximum corner.
    pub greater: BlockPos,
    /// Whether the Y axis participates in containment.
    pub cuboid: bool,
    /// The owning subject, if any.
    pub owner: Option<SubjectId>,
    /// The parent claim, if any.
    pub parent: Option<ClaimId>,
    /// The claim's trust table.
    pub trust: TrustTable<SubjectId>,
    /// Whether unresolved trust checks fall through to the parent.
    pub inherits_parent: bool,
}
