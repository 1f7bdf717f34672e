// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-side queries: point lookup, bulk scans, and trust checks.

use landclaim_geom::{BlockPos, ClaimKind, TrustLevel};
use landclaim_trust::{ClaimTrustLink, TrustTable, resolve};

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::ids::{ClaimId, SubjectId};
use crate::registry::Registry;

impl Registry {
    /// The deepest claim containing `pos`, or the wilderness id.
    ///
    /// `last` is the caller's cached previous answer; it is re-validated by
    /// containment before being trusted, so a stale cache only costs a miss,
    /// never a wrong answer. Column claims treat every Y as inside when
    /// `ignore_height` is set.
    pub fn claim_at(&self, pos: BlockPos, ignore_height: bool, last: Option<ClaimId>) -> ClaimId {
        if let Some(last_id) = last
            && last_id != self.wilderness
            && let Some(claim) = self.claims.get(&last_id)
            && self.claim_contains(claim, pos, ignore_height)
        {
            return last_id;
        }
        for &top_id in self.index.candidates_at(pos.x, pos.z) {
            let Some(top) = self.claims.get(&top_id) else {
                continue;
            };
            if top.volume().contains(pos, ignore_height) {
                return self.descend(top, pos, ignore_height);
            }
        }
        self.wilderness
    }

    /// Walk into children to the deepest claim containing the point. Nesting
    /// is shallow by construction (Town → Basic → Subdivision).
    fn descend(&self, claim: &Claim, pos: BlockPos, ignore_height: bool) -> ClaimId {
        let mut current = claim;
        'deeper: loop {
            for &child_id in current.children() {
                if let Some(child) = self.claims.get(&child_id)
                    && child.volume().contains(pos, ignore_height)
                {
                    current = child;
                    continue 'deeper;
                }
            }
            return current.id();
        }
    }

    /// Containment for cache validation: the claim's own volume plus every
    /// ancestor's, so a child created before a parent shrink is never
    /// reachable outside the parent's current footprint.
    fn claim_contains(&self, claim: &Claim, pos: BlockPos, ignore_height: bool) -> bool {
        if !claim.volume().contains(pos, ignore_height) {
            return false;
        }
        let mut cursor = claim.parent();
        while let Some(parent_id) = cursor {
            let Some(parent) = self.claims.get(&parent_id) else {
                return false;
            };
            if !parent.volume().contains(pos, ignore_height) {
                return false;
            }
            cursor = parent.parent();
        }
        true
    }

    /// Whether `subject` is trusted at `level` in the claim.
    ///
    /// Precedence: the override predicate, then the effective owner, then the
    /// claim's own trust lists, then inheriting ancestors' lists. The
    /// wilderness trusts nobody; the policy for acting there is the host's.
    pub fn is_trusted(
        &self,
        id: ClaimId,
        subject: SubjectId,
        level: TrustLevel,
    ) -> Result<bool, ClaimError> {
        let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
        if matches!(claim.kind(), ClaimKind::Wilderness) {
            return Ok(false);
        }
        if let Some(overrides) = self.overrides.as_deref()
            && overrides.allows(&subject, claim)
        {
            return Ok(true);
        }
        let mut chain: Vec<ClaimTrustLink<'_, SubjectId>> = Vec::new();
        let mut cursor = Some(id);
        while let Some(link_id) = cursor {
            let Some(link) = self.claims.get(&link_id) else {
                break;
            };
            chain.push(ClaimTrustLink::new(
                link.owner(),
                link.trust(),
                link.inherits_parent(),
            ));
            cursor = link.parent();
        }
        Ok(resolve(&chain, &subject, level, self.groups.as_ref()))
    }

    /// The claim's trust table, for introspection surfaces.
    pub fn trust_table(&self, id: ClaimId) -> Result<&TrustTable<SubjectId>, ClaimError> {
        self.claims
            .get(&id)
            .map(Claim::trust)
            .ok_or(ClaimError::NotFound)
    }

    /// Visit every `(x, z)` column of a claim's footprint.
    ///
    /// Returns `Ok(false)` without visiting anything when the footprint
    /// exceeds the configured scan cap.
    pub fn visit_claim_columns<F>(&self, id: ClaimId, mut visit: F) -> Result<bool, ClaimError>
    where
        F: FnMut(i32, i32),
    {
        let claim = self.claims.get(&id).ok_or(ClaimError::NotFound)?;
        let volume = claim.volume();
        if volume.footprint_area() > self.config.max_scan_area {
            log::debug!("refusing bulk scan of claim {id}: footprint exceeds the scan cap");
            return Ok(false);
        }
        for (x, z) in volume.columns() {
            visit(x, z);
        }
        Ok(true)
    }
}
