// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-world claim registry and its mutation operations.

use std::fmt;

use hashbrown::HashMap;

use landclaim_chunk_index::{ChunkIndex, covered_cells};
use landclaim_geom::{Axis, BlockPos, ClaimKind, TrustLevel, Volume};
use landclaim_trust::{GroupLookup, NoGroups};

use crate::claim::Claim;
use crate::config::RegistryConfig;
use crate::error::ClaimError;
use crate::hooks::{
    ClaimEvent, EventHook, HookDecision, OverridePredicate, PersistenceGateway, ResourceGauge,
};
use crate::ids::{ClaimId, SubjectId};

/// A request to create a claim.
///
/// Built with [`CreateRequest::new`] and the chainable setters; unset fields
/// default to a column claim at top level that inherits trust from its parent
/// (relevant only once it has one).
#[derive(Clone, Debug)]
pub struct CreateRequest {
    /// The kind of claim to create. Wilderness is refused.
    pub kind: ClaimKind,
    /// One corner of the volume, in any order.
    pub corner_a: BlockPos,
    /// The opposite corner of the volume.
    pub corner_b: BlockPos,
    /// Whether the Y axis participates in containment.
    pub cuboid: bool,
    /// The owning subject. Required for Basic and Town claims; ignored for
    /// Admin claims and subdivisions, which carry no owner of their own.
    pub owner: Option<SubjectId>,
    /// The parent claim. Required for subdivisions.
    pub parent: Option<ClaimId>,
    /// Whether unresolved trust checks fall through to the parent.
    pub inherits_parent: bool,
}

impl CreateRequest {
    /// A request for a column claim at top level.
    pub fn new(kind: ClaimKind, corner_a: BlockPos, corner_b: BlockPos) -> Self {
        Self {
            kind,
            corner_a,
            corner_b,
            cuboid: false,
            owner: None,
            parent: None,
            inherits_parent: true,
        }
    }

    /// Enforce the Y axis for containment.
    pub fn cuboid(mut self) -> Self {
        self.cuboid = true;
        self
    }

    /// Set the owning subject.
    pub fn owned_by(mut self, owner: SubjectId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Create inside `parent` instead of at top level.
    pub fn within(mut self, parent: ClaimId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Control whether unresolved trust checks fall through to the parent.
    pub fn inherits(mut self, inherits_parent: bool) -> Self {
        self.inherits_parent = inherits_parent;
        self
    }
}

/// What happens to a deleted claim's children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Re-parent children one level up, or promote them to top level if the
    /// deleted claim had no parent.
    Promote,
    /// Delete the whole subtree.
    Delete,
}

/// Who a trust grant or revocation names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrustGrantee {
    /// A single subject identity.
    Subject(SubjectId),
    /// A named group, resolved externally through
    /// [`GroupLookup`].
    Group(String),
    /// Everyone.
    Public,
}

/// One world's claims: the arena, the chunk index, and owner bookkeeping.
///
/// All mutations are validated fully before any state changes, so a refused
/// operation leaves the registry untouched. The registry is built for a
/// single mutating thread per world; reads may run concurrently with each
/// other but callers serialize reads against mutations externally.
pub struct Registry {
    pub(crate) world_id: String,
    pub(crate) config: RegistryConfig,
    pub(crate) claims: HashMap<ClaimId, Claim>,
    pub(crate) top_level: Vec<ClaimId>,
    pub(crate) index: ChunkIndex<ClaimId>,
    pub(crate) by_owner: HashMap<SubjectId, Vec<ClaimId>>,
    pub(crate) wilderness: ClaimId,
    pub(crate) gateway: Box<dyn PersistenceGateway>,
    pub(crate) hooks: Vec<Box<dyn EventHook>>,
    pub(crate) overrides: Option<Box<dyn OverridePredicate>>,
    pub(crate) groups: Box<dyn GroupLookup<SubjectId>>,
    pub(crate) gauge: Option<Box<dyn ResourceGauge>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("world_id", &self.world_id)
            .field("claims", &self.claims.len())
            .field("top_level", &self.top_level.len())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Open a world's registry, loading persisted records from the gateway.
    ///
    /// Malformed records (inverted corners, duplicate ids, dangling parents)
    /// are logged and repaired or skipped; a failed load opens an empty
    /// world. The wilderness claim is created here and lives for the
    /// registry's lifetime.
    pub fn open(
        world_id: impl Into<String>,
        config: RegistryConfig,
        mut gateway: Box<dyn PersistenceGateway>,
    ) -> Self {
        let world_id = world_id.into();
        let records = match gateway.load_all(&world_id) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("failed to load claims for world {world_id}: {err}");
                Vec::new()
            }
        };

        let wilderness = ClaimId::new();
        let everywhere = Volume::column(
            BlockPos::new(i32::MIN, i32::MIN, i32::MIN),
            BlockPos::new(i32::MAX, i32::MAX, i32::MAX),
        );
        let mut claims = HashMap::new();
        claims.insert(
            wilderness,
            Claim::new(wilderness, ClaimKind::Wilderness, everywhere, None, None, false),
        );

        for record in records {
            if matches!(record.kind, ClaimKind::Wilderness) {
                log::warn!("skipping persisted wilderness record {}", record.id);
                continue;
            }
            if record.lesser.x > record.greater.x
                || record.lesser.y > record.greater.y
                || record.lesser.z > record.greater.z
            {
                log::warn!("skipping claim {} with inverted corners", record.id);
                continue;
            }
            if claims.contains_key(&record.id) {
                debug_assert!(false, "duplicate claim id {} in persisted records", record.id);
                log::error!("skipping duplicate claim id {}", record.id);
                continue;
            }
            let id = record.id;
            claims.insert(id, Claim::from_record(record));
        }

        // Rebuild child links from parent links; danglers go to top level.
        let ids: Vec<ClaimId> = claims.keys().copied().collect();
        for &id in &ids {
            if id == wilderness {
                continue;
            }
            let Some(pid) = claims.get(&id).and_then(|c| c.parent()) else {
                continue;
            };
            if pid == id || pid == wilderness || !claims.contains_key(&pid) {
                log::warn!("claim {id} references missing parent {pid}; promoting to top level");
                if let Some(claim) = claims.get_mut(&id) {
                    claim.set_parent(None);
                    // A subdivision cannot stand at top level; without its
                    // chain there is no owner to inherit, so it becomes Admin.
                    if claim.kind().is_subdivision() {
                        claim.set_kind(ClaimKind::Admin);
                    }
                }
                continue;
            }
            if let Some(parent) = claims.get_mut(&pid) {
                parent.children_mut().push(id);
            }
        }

        let mut index = ChunkIndex::new();
        let mut top_level = Vec::new();
        let mut by_owner: HashMap<SubjectId, Vec<ClaimId>> = HashMap::new();
        for &id in &ids {
            if id == wilderness {
                continue;
            }
            let Some(claim) = claims.get_mut(&id) else {
                continue;
            };
            if let Some(owner) = claim.owner() {
                by_owner.entry(owner).or_default().push(id);
            }
            if claim.parent().is_none() {
                let cells = covered_cells(&claim.volume());
                claim.set_cells(cells.clone());
                index.insert(id, &cells);
                top_level.push(id);
            }
        }

        log::debug!(
            "opened world {world_id}: {} claims, {} top-level",
            claims.len() - 1,
            top_level.len()
        );
        Self {
            world_id,
            config,
            claims,
            top_level,
            index,
            by_owner,
            wilderness,
            gateway,
            hooks: Vec::new(),
            overrides: None,
            groups: Box::new(NoGroups),
            gauge: None,
        }
    }

    /// Tear the registry down. Saves are eager, so there is nothing to flush.
    pub fn close(self) {
        log::debug!("closed world {}", self.world_id);
    }

    /// Register an event hook. Hooks run in registration order.
    pub fn add_hook(&mut self, hook: Box<dyn EventHook>) {
        self.hooks.push(hook);
    }

    /// Install the trust override predicate.
    pub fn set_override(&mut self, predicate: Box<dyn OverridePredicate>) {
        self.overrides = Some(predicate);
    }

    /// Install the group membership resolver.
    pub fn set_group_lookup(&mut self, groups: Box<dyn GroupLookup<SubjectId>>) {
        self.groups = groups;
    }

    /// Install the claim-area gauge.
    pub fn set_resource_gauge(&mut self, gauge: Box<dyn ResourceGauge>) {
        self.gauge = Some(gauge);
    }

    /// The world this registry serves.
    pub fn world_id(&self) -> &str {
        &self.world_id
    }

    /// The registry's configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The claim with the given id, if it exists.
    pub fn claim(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.get(&id)
    }

    /// The id of this world's wilderness claim.
    pub fn wilderness_id(&self) -> ClaimId {
        self.wilderness
    }

    /// Number of claims, excluding the wilderness.
    pub fn claim_count(&self) -> usize {
        self.claims.len() - 1
    }

    /// The top-level claims, in admission order.
    pub fn top_level(&self) -> &[ClaimId] {
        &self.top_level
    }

    /// The claims owned by `subject`, in admission order.
    pub fn claims_of(&self, subject: SubjectId) -> &[ClaimId] {
        self.by_owner.get(&subject).map_or(&[], Vec::as_slice)
    }

    /// Create a claim.
    ///
    /// Validates size limits, parent fit, the area budget, and conflicts with
    /// every claim sharing the candidate's chunk cells (or its would-be
    /// siblings). Existing top-level claims fully enclosed by the candidate
    /// are adopted as children when the kind matrix allows it; the first that
    /// cannot be adopted aborts the whole operation.
    pub fn create(&mut self, request: CreateRequest) -> Result<ClaimId, ClaimError> {
        let CreateRequest {
            kind,
            corner_a,
            corner_b,
            cuboid,
            owner,
            parent,
            inherits_parent,
        } = request;

        if matches!(kind, ClaimKind::Wilderness) {
            return Err(ClaimError::WrongKind(
                "wilderness exists implicitly and cannot be created",
            ));
        }
        if kind.is_owned() && owner.is_none() {
            return Err(ClaimError::RequiresOwner);
        }
        // Admin claims and subdivisions never carry their own owner.
        let owner = if kind.is_owned() { owner } else { None };

        let volume = Volume::new(corner_a, corner_b, cuboid);
        self.check_size(kind, &volume)?;

        if kind.is_subdivision() && parent.is_none() {
            return Err(ClaimError::ParentMismatch);
        }
        if let Some(pid) = parent {
            if pid == self.wilderness {
                return Err(ClaimError::WrongKind(
                    "wilderness cannot be a parent; create the claim at top level",
                ));
            }
            let p = self.claims.get(&pid).ok_or(ClaimError::NotFound)?;
            if !p.kind().can_enclose(kind) {
                return Err(ClaimError::WrongKind("parent kind cannot enclose this kind"));
            }
            if !p.volume().encloses(&volume) {
                return Err(ClaimError::ParentMismatch);
            }
        }

        if matches!(kind, ClaimKind::Basic)
            && let (Some(owner), Some(gauge)) = (owner, self.gauge.as_deref())
            && let Some(available) = gauge.available_area(&owner)
            && available < volume.footprint_area()
        {
            return Err(ClaimError::InsufficientResources);
        }

        let adopted = self.scan_conflicts(&volume, kind, parent, None)?;

        let id = ClaimId::new();
        let claim = Claim::new(id, kind, volume, owner, parent, inherits_parent);
        self.fire_before(&ClaimEvent::Create { claim: &claim })?;

        self.claims.insert(id, claim);
        match parent {
            Some(pid) => {
                if let Some(p) = self.claims.get_mut(&pid) {
                    p.children_mut().push(id);
                }
            }
            None => {
                let cells = covered_cells(&volume);
                self.index.insert(id, &cells);
                if let Some(claim) = self.claims.get_mut(&id) {
                    claim.set_cells(cells);
                }
                self.top_level.push(id);
            }
        }
        if let Some(owner) = owner {
            self.by_owner.entry(owner).or_default().push(id);
        }
        for other in adopted {
            self.reparent(other, id);
        }
        self.persist(id);
        log::debug!("created {kind} claim {id}");
        if let Some(claim) = self.claims.get(&id) {
            self.fire_after(&ClaimEvent::Create { claim });
        }
        Ok(id)
    }

    /// Resize a claim to new corners.
    ///
    /// Runs the same validation as creation against the candidate bounds. A
    /// child left outside the shrunken footprint is migrated to the nearest
    /// ancestor that still contains it, or promoted to top level if none
    /// does. Any refusal leaves bounds, index entries, and children exactly
    /// as they were.
    pub fn resize(
        &mut self,
        id: ClaimId,
        corner_a: BlockPos,
        corner_b: BlockPos,
    ) -> Result<(), ClaimError> {
        let (kind, parent, old_volume, owner, children) = {
            let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
            (
                claim.kind(),
                claim.parent(),
                claim.volume(),
                claim.owner(),
                claim.children().to_vec(),
            )
        };
        if matches!(kind, ClaimKind::Wilderness) {
            return Err(ClaimError::WrongKind("wilderness cannot be resized"));
        }

        let candidate = old_volume.with_corners(corner_a, corner_b);
        self.check_size(kind, &candidate)?;

        if let Some(pid) = parent {
            let p = self.claims.get(&pid).ok_or(ClaimError::NotFound)?;
            if !p.volume().encloses(&candidate) {
                return Err(ClaimError::ParentMismatch);
            }
        }

        // Growth is charged against the gauge; shrinking is always free.
        if matches!(kind, ClaimKind::Basic)
            && let Some(owner) = owner
            && let Some(gauge) = self.gauge.as_deref()
            && let Some(available) = gauge.available_area(&owner)
        {
            let delta = candidate.footprint_area() - old_volume.footprint_area();
            if delta > 0 && available < delta {
                return Err(ClaimError::InsufficientResources);
            }
        }

        let adopted = self.scan_conflicts(&candidate, kind, parent, Some(id))?;

        // Plan child migrations before touching anything.
        let mut migrations: Vec<(ClaimId, Option<ClaimId>)> = Vec::new();
        for &child_id in &children {
            let Some(child) = self.claims.get(&child_id) else {
                continue;
            };
            if candidate.encloses(&child.volume()) {
                continue;
            }
            let child_volume = child.volume();
            let child_kind = child.kind();
            let mut target = None;
            let mut cursor = parent;
            while let Some(aid) = cursor {
                let Some(ancestor) = self.claims.get(&aid) else {
                    break;
                };
                if ancestor.volume().encloses(&child_volume)
                    && ancestor.kind().can_enclose(child_kind)
                {
                    target = Some(aid);
                    break;
                }
                cursor = ancestor.parent();
            }
            migrations.push((child_id, target));
        }
        let fallback_owner = self.effective_owner(id);

        {
            let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
            self.fire_before(&ClaimEvent::Resize {
                claim,
                to: candidate,
            })?;
        }

        let mut cell_swap = None;
        if let Some(claim) = self.claims.get_mut(&id) {
            claim.set_volume(candidate);
            if claim.parent().is_none() {
                let old_cells = claim.take_cells();
                let new_cells = covered_cells(&candidate);
                claim.set_cells(new_cells.clone());
                cell_swap = Some((old_cells, new_cells));
            }
        }
        if let Some((old_cells, new_cells)) = cell_swap {
            self.index.replace(id, &old_cells, &new_cells);
        }

        for other in adopted {
            self.reparent(other, id);
        }
        for (child_id, target) in migrations {
            match target {
                Some(ancestor) => self.reparent(child_id, ancestor),
                None => self.promote(child_id, fallback_owner),
            }
        }

        self.persist(id);
        log::debug!("resized claim {id}");
        if let Some(claim) = self.claims.get(&id) {
            self.fire_after(&ClaimEvent::Resize {
                claim,
                to: candidate,
            });
        }
        Ok(())
    }

    /// Delete a claim.
    ///
    /// Children are re-parented one level up or deleted with the claim,
    /// per `policy`. The claim's id is never reused.
    pub fn delete(&mut self, id: ClaimId, policy: OrphanPolicy) -> Result<(), ClaimError> {
        {
            let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
            if matches!(claim.kind(), ClaimKind::Wilderness) {
                return Err(ClaimError::WrongKind("wilderness cannot be deleted"));
            }
            self.fire_before(&ClaimEvent::Delete { claim })?;
        }
        let fallback_owner = self.effective_owner(id);
        let Some(claim) = self.claims.remove(&id) else {
            return Err(ClaimError::NotFound);
        };

        match claim.parent() {
            Some(pid) => {
                if let Some(p) = self.claims.get_mut(&pid) {
                    p.children_mut().retain(|c| *c != id);
                }
            }
            None => {
                self.top_level.retain(|c| *c != id);
                self.index.remove(id, claim.cells());
            }
        }
        if let Some(owner) = claim.owner() {
            self.remove_owner_entry(owner, id);
        }

        match policy {
            OrphanPolicy::Promote => {
                for &child_id in claim.children() {
                    match claim.parent() {
                        Some(pid) if self.claims.contains_key(&pid) => {
                            self.reparent(child_id, pid);
                        }
                        _ => self.promote(child_id, fallback_owner),
                    }
                }
            }
            OrphanPolicy::Delete => {
                let mut stack: Vec<ClaimId> = claim.children().to_vec();
                while let Some(child_id) = stack.pop() {
                    if let Some(child) = self.claims.remove(&child_id) {
                        stack.extend_from_slice(child.children());
                        if let Some(owner) = child.owner() {
                            self.remove_owner_entry(owner, child_id);
                        }
                        if let Err(err) = self.gateway.delete(child_id) {
                            log::warn!("failed to delete claim {child_id} from persistence: {err}");
                        }
                    }
                }
            }
        }

        if let Err(err) = self.gateway.delete(id) {
            log::warn!("failed to delete claim {id} from persistence: {err}");
        }
        log::debug!("deleted {} claim {id}", claim.kind());
        self.fire_after(&ClaimEvent::Delete { claim: &claim });
        Ok(())
    }

    /// Transfer an owned claim to a new owner.
    pub fn transfer(&mut self, id: ClaimId, new_owner: SubjectId) -> Result<(), ClaimError> {
        let old_owner = {
            let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
            if !claim.kind().is_owned() {
                return Err(ClaimError::WrongKind(
                    "only basic and town claims carry a transferable owner",
                ));
            }
            if claim.owner() == Some(new_owner) {
                return Ok(());
            }
            self.fire_before(&ClaimEvent::Transfer {
                claim,
                to: new_owner,
            })?;
            claim.owner()
        };
        if let Some(owner) = old_owner {
            self.remove_owner_entry(owner, id);
        }
        if let Some(claim) = self.claims.get_mut(&id) {
            claim.set_owner(Some(new_owner));
        }
        self.by_owner.entry(new_owner).or_default().push(id);
        self.persist(id);
        log::debug!("transferred claim {id}");
        if let Some(claim) = self.claims.get(&id) {
            self.fire_after(&ClaimEvent::Transfer {
                claim,
                to: new_owner,
            });
        }
        Ok(())
    }

    /// Grant trust at `level` to `grantee`. Returns whether anything changed.
    pub fn grant_trust(
        &mut self,
        id: ClaimId,
        level: TrustLevel,
        grantee: TrustGrantee,
    ) -> Result<bool, ClaimError> {
        self.change_trust(id, level, grantee, true)
    }

    /// Revoke trust at `level` from `grantee`. Returns whether anything
    /// changed.
    pub fn revoke_trust(
        &mut self,
        id: ClaimId,
        level: TrustLevel,
        grantee: TrustGrantee,
    ) -> Result<bool, ClaimError> {
        self.change_trust(id, level, grantee, false)
    }

    fn change_trust(
        &mut self,
        id: ClaimId,
        level: TrustLevel,
        grantee: TrustGrantee,
        grant: bool,
    ) -> Result<bool, ClaimError> {
        {
            let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
            if matches!(claim.kind(), ClaimKind::Wilderness) {
                return Err(ClaimError::WrongKind("wilderness carries no trust"));
            }
            self.fire_before(&ClaimEvent::TrustChange { claim, level })?;
        }
        let changed = {
            let Some(claim) = self.claims.get_mut(&id) else {
                return Err(ClaimError::NotFound);
            };
            let table = claim.trust_mut();
            match (grantee, grant) {
                (TrustGrantee::Subject(subject), true) => table.grant_subject(level, subject),
                (TrustGrantee::Subject(subject), false) => table.revoke_subject(level, &subject),
                (TrustGrantee::Group(group), true) => table.grant_group(level, group),
                (TrustGrantee::Group(group), false) => table.revoke_group(level, &group),
                (TrustGrantee::Public, on) => {
                    let was = table.list(level).public;
                    table.set_public(level, on);
                    was != on
                }
            }
        };
        if changed {
            self.persist(id);
            log::debug!("trust change on claim {id} at {level}");
            if let Some(claim) = self.claims.get(&id) {
                self.fire_after(&ClaimEvent::TrustChange { claim, level });
            }
        }
        Ok(changed)
    }

    fn check_size(&self, kind: ClaimKind, volume: &Volume) -> Result<(), ClaimError> {
        // Admin claims answer to no size policy.
        if matches!(kind, ClaimKind::Admin) {
            return Ok(());
        }
        for axis in [Axis::X, Axis::Z] {
            let extent = volume.extent(axis);
            if extent < self.config.min_extent {
                return Err(ClaimError::BelowMinSize(axis));
            }
            if extent > self.config.max_extent {
                return Err(ClaimError::AboveMaxSize(axis));
            }
        }
        if volume.is_cuboid() && volume.extent(Axis::Y) < self.config.min_height {
            return Err(ClaimError::BelowMinSize(Axis::Y));
        }
        Ok(())
    }

    /// Scan for conflicts with the candidate volume among its would-be
    /// siblings (child level) or the chunk-indexed claims (top level).
    /// Returns the claims the candidate would adopt; the first claim it
    /// cannot legally relate to aborts the scan.
    fn scan_conflicts(
        &self,
        candidate: &Volume,
        kind: ClaimKind,
        parent: Option<ClaimId>,
        exclude: Option<ClaimId>,
    ) -> Result<Vec<ClaimId>, ClaimError> {
        let others: Vec<ClaimId> = match parent {
            Some(pid) => self
                .claims
                .get(&pid)
                .map(|p| p.children().to_vec())
                .unwrap_or_default(),
            None => {
                let cells = covered_cells(candidate);
                self.index.candidates_over(&cells).to_vec()
            }
        };
        let mut adopted = Vec::new();
        for other_id in others {
            if Some(other_id) == exclude {
                continue;
            }
            let Some(other) = self.claims.get(&other_id) else {
                continue;
            };
            let other_volume = other.volume();
            if candidate.encloses(&other_volume) {
                if kind.can_enclose(other.kind()) {
                    adopted.push(other_id);
                } else {
                    return Err(ClaimError::Overlapping(other_id));
                }
            } else if other_volume.encloses(candidate)
                || candidate.overlaps(&other_volume)
                || candidate.bands_across(&other_volume)
                || other_volume.bands_across(candidate)
            {
                return Err(ClaimError::Overlapping(other_id));
            }
        }
        Ok(adopted)
    }

    /// Move a claim under a new parent, fixing links, the index, and
    /// persistence.
    fn reparent(&mut self, id: ClaimId, new_parent: ClaimId) {
        let (old_parent, cells) = {
            let Some(claim) = self.claims.get_mut(&id) else {
                return;
            };
            let old_parent = claim.parent();
            let cells = claim.take_cells();
            claim.set_parent(Some(new_parent));
            (old_parent, cells)
        };
        match old_parent {
            Some(pid) => {
                if let Some(p) = self.claims.get_mut(&pid) {
                    p.children_mut().retain(|c| *c != id);
                }
            }
            None => {
                self.top_level.retain(|c| *c != id);
                self.index.remove(id, &cells);
            }
        }
        if let Some(parent) = self.claims.get_mut(&new_parent) {
            parent.children_mut().push(id);
        }
        self.persist(id);
    }

    /// Promote a child to top level. A promoted subdivision becomes a Basic
    /// claim owned by `fallback_owner` (its old chain's effective owner), or
    /// an Admin claim if the chain had none.
    fn promote(&mut self, id: ClaimId, fallback_owner: Option<SubjectId>) {
        let (old_parent, cells, newly_owned) = {
            let Some(claim) = self.claims.get_mut(&id) else {
                return;
            };
            let old_parent = claim.parent();
            claim.set_parent(None);
            let mut newly_owned = None;
            if claim.kind().is_subdivision() {
                match fallback_owner {
                    Some(owner) => {
                        claim.set_kind(ClaimKind::Basic);
                        claim.set_owner(Some(owner));
                        newly_owned = Some(owner);
                    }
                    None => claim.set_kind(ClaimKind::Admin),
                }
            }
            let cells = covered_cells(&claim.volume());
            claim.set_cells(cells.clone());
            (old_parent, cells, newly_owned)
        };
        if let Some(pid) = old_parent
            && let Some(p) = self.claims.get_mut(&pid)
        {
            p.children_mut().retain(|c| *c != id);
        }
        self.top_level.push(id);
        self.index.insert(id, &cells);
        if let Some(owner) = newly_owned {
            self.by_owner.entry(owner).or_default().push(id);
        }
        self.persist(id);
        log::debug!("promoted claim {id} to top level");
    }

    /// The owner of the nearest link in the parent chain that has one.
    pub(crate) fn effective_owner(&self, id: ClaimId) -> Option<SubjectId> {
        let mut cursor = Some(id);
        while let Some(claim_id) = cursor {
            let claim = self.claims.get(&claim_id)?;
            if let Some(owner) = claim.owner() {
                return Some(owner);
            }
            cursor = claim.parent();
        }
        None
    }

    fn remove_owner_entry(&mut self, owner: SubjectId, id: ClaimId) {
        if let Some(list) = self.by_owner.get_mut(&owner) {
            list.retain(|c| *c != id);
            if list.is_empty() {
                self.by_owner.remove(&owner);
            }
        }
    }

    fn persist(&mut self, id: ClaimId) {
        let record = match self.claims.get(&id) {
            Some(claim) => claim.to_record(),
            None => return,
        };
        if let Err(err) = self.gateway.save(&record) {
            log::warn!("failed to persist claim {id}: {err}");
        }
    }

    pub(crate) fn fire_before(&self, event: &ClaimEvent<'_>) -> Result<(), ClaimError> {
        for hook in &self.hooks {
            if let HookDecision::Cancel(reason) = hook.before(event) {
                return Err(ClaimError::EventCancelled(reason));
            }
        }
        Ok(())
    }

    pub(crate) fn fire_after(&self, event: &ClaimEvent<'_>) {
        for hook in &self.hooks {
            hook.after(event);
        }
    }
}
