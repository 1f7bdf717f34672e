// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry policy knobs.

/// Size and scan limits for one world's registry.
///
/// Admin claims are exempt from the extent limits; everything else is
/// validated against them on create and resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegistryConfig {
    /// Minimum X/Z extent of a claim, in blocks.
    pub min_extent: i64,
    /// Maximum X/Z extent of a claim, in blocks.
    pub max_extent: i64,
    /// Minimum Y extent of a cuboid claim, in blocks.
    pub min_height: i64,
    /// Footprints above this column count are refused by bulk scans so a very
    /// large claim cannot stall the control thread.
    pub max_scan_area: i64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_extent: 5,
            max_extent: 10_000,
            min_height: 5,
            max_scan_area: 65_536,
        }
    }
}
