// Copyright 2025 the Landclaim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Block positions and axis-aligned claim volumes.

use core::fmt;

/// A position in world block coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North/south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its components.
    #[inline(always)]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A world axis, used to report which dimension violated a size limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The X (east/west) axis.
    X,
    /// The Y (vertical) axis.
    Y,
    /// The Z (north/south) axis.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
            Self::Z => f.write_str("z"),
        }
    }
}

/// An axis-aligned claim volume with inclusive corner bounds.
///
/// The two corners are normalized on construction so that `lesser <= greater`
/// holds componentwise. A *column* volume (`is_cuboid() == false`) ignores the
/// Y axis for most predicates: it covers every block above its lesser Y, which
/// matches the default claim shape. A *cuboid* volume enforces all three axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Volume {
    lesser: BlockPos,
    greater: BlockPos,
    cuboid: bool,
}

impl Volume {
    /// Create a volume from two opposite corners, normalizing so that
    /// `lesser <= greater` on every axis.
    pub fn new(a: BlockPos, b: BlockPos, cuboid: bool) -> Self {
        let lesser = BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let greater = BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        Self {
            lesser,
            greater,
            cuboid,
        }
    }

    /// Create a column volume (height ignored for containment).
    #[inline]
    pub fn column(a: BlockPos, b: BlockPos) -> Self {
        Self::new(a, b, false)
    }

    /// Create a cuboid volume (all three axes enforced).
    #[inline]
    pub fn cuboid(a: BlockPos, b: BlockPos) -> Self {
        Self::new(a, b, true)
    }

    /// The componentwise-minimum corner.
    #[inline(always)]
    pub const fn lesser(&self) -> BlockPos {
        self.lesser
    }

    /// The componentwise-maximum corner.
    #[inline(always)]
    pub const fn greater(&self) -> BlockPos {
        self.greater
    }

    /// Whether the Y axis participates in containment.
    #[inline(always)]
    pub const fn is_cuboid(&self) -> bool {
        self.cuboid
    }

    /// Return the same volume with different corners (normalized), keeping the
    /// cuboid flag. Used to build resize candidates.
    #[inline]
    pub fn with_corners(&self, a: BlockPos, b: BlockPos) -> Self {
        Self::new(a, b, self.cuboid)
    }

    /// Inclusive extent along an axis, in blocks. Widened to `i64` so that
    /// world-spanning volumes cannot overflow.
    pub fn extent(&self, axis: Axis) -> i64 {
        let (lesser, greater) = match axis {
            Axis::X => (self.lesser.x, self.greater.x),
            Axis::Y => (self.lesser.y, self.greater.y),
            Axis::Z => (self.lesser.z, self.greater.z),
        };
        i64::from(greater) - i64::from(lesser) + 1
    }

    /// Area of the X/Z footprint, in columns. Saturating, for the same
    /// reason [`Volume::extent`] is widened.
    pub fn footprint_area(&self) -> i64 {
        self.extent(Axis::X).saturating_mul(self.extent(Axis::Z))
    }

    /// Whether the volume contains a point.
    ///
    /// For column volumes only X/Z are tested; unless `ignore_height` is set,
    /// the point must additionally sit at or above the lesser Y. Cuboid
    /// volumes bounds-check all three axes inclusively regardless of
    /// `ignore_height`.
    pub fn contains(&self, p: BlockPos, ignore_height: bool) -> bool {
        if p.x < self.lesser.x || p.x > self.greater.x {
            return false;
        }
        if p.z < self.lesser.z || p.z > self.greater.z {
            return false;
        }
        if self.cuboid {
            p.y >= self.lesser.y && p.y <= self.greater.y
        } else {
            ignore_height || p.y >= self.lesser.y
        }
    }

    /// Whether the X/Z footprint of `other` lies entirely within this
    /// volume's footprint.
    pub fn footprint_contains(&self, other: &Self) -> bool {
        self.lesser.x <= other.lesser.x
            && self.greater.x >= other.greater.x
            && self.lesser.z <= other.lesser.z
            && self.greater.z >= other.greater.z
    }

    /// Whether the X/Z footprints intersect at all. Bounds are inclusive, so
    /// footprints sharing a block column intersect.
    pub fn footprint_intersects(&self, other: &Self) -> bool {
        self.lesser.x <= other.greater.x
            && self.greater.x >= other.lesser.x
            && self.lesser.z <= other.greater.z
            && self.greater.z >= other.lesser.z
    }

    /// Whether the Y ranges intersect, inclusive on both ends.
    #[inline]
    pub fn y_intersects(&self, other: &Self) -> bool {
        self.lesser.y <= other.greater.y && self.greater.y >= other.lesser.y
    }

    /// Whether `other` is fully inside this volume.
    ///
    /// The footprint must be contained; the Y range is only enforced when
    /// this volume is a cuboid (a column encloses any height above its floor).
    pub fn encloses(&self, other: &Self) -> bool {
        if !self.footprint_contains(other) {
            return false;
        }
        if self.cuboid {
            self.lesser.y <= other.lesser.y && self.greater.y >= other.greater.y
        } else {
            other.lesser.y >= self.lesser.y
        }
    }

    /// Whether two volumes conflict as siblings would: they share blocks
    /// while neither fully encloses the other.
    ///
    /// For a cuboid pair the containment exemption is full 3D enclosure and
    /// the Y ranges must intersect: stacked cuboids do not overlap, but a
    /// footprint-contained cuboid whose Y range pokes past its would-be
    /// container's does. Any column participant makes the test
    /// footprint-only.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.cuboid && other.cuboid {
            if self.encloses(other) || other.encloses(self) {
                return false;
            }
            self.footprint_intersects(other) && self.y_intersects(other)
        } else {
            if self.footprint_contains(other) || other.footprint_contains(self) {
                return false;
            }
            self.footprint_intersects(other)
        }
    }

    /// Whether this volume cuts fully through `other` without either
    /// containing the other ("banding").
    ///
    /// The volume bands when it extends strictly past both of `other`'s
    /// bounds on one footprint axis while staying within `other`'s range on
    /// the remaining axis. The predicate is not symmetric; callers that need
    /// to reject any crossing check both directions. Height only participates
    /// when both volumes are cuboids, compared inclusively on both ends.
    pub fn bands_across(&self, other: &Self) -> bool {
        if self.footprint_contains(other) {
            return false;
        }
        let spans_x = self.lesser.x < other.lesser.x
            && self.greater.x > other.greater.x
            && self.lesser.z >= other.lesser.z
            && self.greater.z <= other.greater.z;
        let spans_z = self.lesser.z < other.lesser.z
            && self.greater.z > other.greater.z
            && self.lesser.x >= other.lesser.x
            && self.greater.x <= other.greater.x;
        if !(spans_x || spans_z) {
            return false;
        }
        if self.cuboid && other.cuboid {
            self.y_intersects(other)
        } else {
            true
        }
    }

    /// Iterate the `(x, z)` columns of the footprint in row-major order.
    pub fn columns(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (lx, gx) = (self.lesser.x, self.greater.x);
        let (lz, gz) = (self.lesser.z, self.greater.z);
        (lx..=gx).flat_map(move |x| (lz..=gz).map(move |z| (x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(lx: i32, lz: i32, gx: i32, gz: i32) -> Volume {
        Volume::column(BlockPos::new(lx, 0, lz), BlockPos::new(gx, 255, gz))
    }

    #[test]
    fn corners_normalize() {
        let v = Volume::cuboid(BlockPos::new(10, 64, -5), BlockPos::new(-10, 0, 5));
        assert_eq!(v.lesser(), BlockPos::new(-10, 0, -5));
        assert_eq!(v.greater(), BlockPos::new(10, 64, 5));
    }

    #[test]
    fn column_containment_ignores_height_when_asked() {
        let v = Volume::column(BlockPos::new(0, 50, 0), BlockPos::new(10, 60, 10));
        // Inside the footprint, below the floor.
        let p = BlockPos::new(5, 10, 5);
        assert!(v.contains(p, true));
        assert!(!v.contains(p, false));
        // At or above the floor.
        assert!(v.contains(BlockPos::new(5, 50, 5), false));
        assert!(v.contains(BlockPos::new(5, 300, 5), false));
    }

    #[test]
    fn cuboid_containment_enforces_all_axes() {
        let v = Volume::cuboid(BlockPos::new(0, 50, 0), BlockPos::new(10, 60, 10));
        assert!(v.contains(BlockPos::new(10, 60, 10), true));
        assert!(!v.contains(BlockPos::new(5, 61, 5), true));
        assert!(!v.contains(BlockPos::new(5, 49, 5), true));
        assert!(!v.contains(BlockPos::new(11, 55, 5), true));
    }

    #[test]
    fn overlap_requires_partial_intersection() {
        let a = col(0, 0, 50, 50);
        let b = col(25, 25, 75, 75);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Containment is not overlap.
        let inner = col(10, 10, 20, 20);
        assert!(!a.overlaps(&inner));
        assert!(!inner.overlaps(&a));

        // Disjoint footprints do not overlap.
        let far = col(100, 100, 120, 120);
        assert!(!a.overlaps(&far));

        // Shared edge counts as intersection.
        let edge = col(50, 0, 80, 50);
        assert!(a.overlaps(&edge));
    }

    #[test]
    fn stacked_cuboids_do_not_overlap() {
        let low = Volume::cuboid(BlockPos::new(0, 0, 0), BlockPos::new(10, 20, 10));
        let high = Volume::cuboid(BlockPos::new(0, 21, 0), BlockPos::new(10, 40, 10));
        assert!(!low.overlaps(&high));
        assert!(!high.overlaps(&low));

        // The shared y=20 layer is real overlap, identical footprints or not.
        let touching = Volume::cuboid(BlockPos::new(0, 20, 0), BlockPos::new(10, 40, 10));
        assert!(low.overlaps(&touching));
        assert!(touching.overlaps(&low));

        // Offset footprint and intersecting heights.
        let clash = Volume::cuboid(BlockPos::new(5, 10, 5), BlockPos::new(15, 30, 15));
        assert!(low.overlaps(&clash));
    }

    #[test]
    fn escaping_y_range_inside_a_footprint_still_overlaps() {
        let outer = Volume::cuboid(BlockPos::new(0, 0, 0), BlockPos::new(100, 50, 100));
        // Footprint inside `outer`, Y range poking past its ceiling while
        // still intersecting it: the volumes share blocks.
        let escaping = Volume::cuboid(BlockPos::new(40, 20, 40), BlockPos::new(60, 80, 60));
        assert!(outer.overlaps(&escaping));
        assert!(escaping.overlaps(&outer));
        assert!(!outer.encloses(&escaping));

        // Enclosed on all three axes is containment, not overlap.
        let nested = Volume::cuboid(BlockPos::new(40, 10, 40), BlockPos::new(60, 40, 60));
        assert!(!outer.overlaps(&nested));
        assert!(!nested.overlaps(&outer));

        // Disjoint heights over the same footprint still do not conflict.
        let above = Volume::cuboid(BlockPos::new(40, 60, 40), BlockPos::new(60, 90, 60));
        assert!(!outer.overlaps(&above));
    }

    #[test]
    fn banding_cross_pattern_is_mutual() {
        let a = col(0, 40, 100, 60);
        let b = col(45, 0, 55, 100);
        assert!(a.bands_across(&b));
        assert!(b.bands_across(&a));
    }

    #[test]
    fn banding_rejects_containment_both_ways() {
        let outer = col(0, 0, 100, 100);
        let inner = col(40, 40, 60, 60);
        assert!(!outer.bands_across(&inner));
        assert!(!inner.bands_across(&outer));
    }

    #[test]
    fn banding_rejects_partial_overlap() {
        // Pokes into the other volume but does not pass through it.
        let a = col(0, 40, 50, 60);
        let b = col(45, 0, 55, 100);
        assert!(!a.bands_across(&b));
        assert!(!b.bands_across(&a));
    }

    #[test]
    fn banding_cuboids_need_intersecting_heights() {
        let a = Volume::cuboid(BlockPos::new(0, 0, 40), BlockPos::new(100, 20, 60));
        let b = Volume::cuboid(BlockPos::new(45, 30, 0), BlockPos::new(55, 50, 100));
        assert!(!a.bands_across(&b));

        let b_low = Volume::cuboid(BlockPos::new(45, 10, 0), BlockPos::new(55, 50, 100));
        assert!(a.bands_across(&b_low));
    }

    #[test]
    fn encloses_honors_cuboid_floors() {
        let column = Volume::column(BlockPos::new(0, 10, 0), BlockPos::new(100, 20, 100));
        let tall = Volume::cuboid(BlockPos::new(10, 10, 10), BlockPos::new(20, 300, 20));
        assert!(column.encloses(&tall));

        let below_floor = Volume::cuboid(BlockPos::new(10, 5, 10), BlockPos::new(20, 15, 20));
        assert!(!column.encloses(&below_floor));

        let cube = Volume::cuboid(BlockPos::new(0, 0, 0), BlockPos::new(50, 50, 50));
        let inside = Volume::cuboid(BlockPos::new(10, 10, 10), BlockPos::new(20, 20, 20));
        let poking_out = Volume::cuboid(BlockPos::new(10, 10, 10), BlockPos::new(20, 60, 20));
        assert!(cube.encloses(&inside));
        assert!(!cube.encloses(&poking_out));
    }

    #[test]
    fn extents_and_area() {
        let v = col(0, 0, 49, 49);
        assert_eq!(v.extent(Axis::X), 50);
        assert_eq!(v.extent(Axis::Z), 50);
        assert_eq!(v.footprint_area(), 2500);
    }

    #[test]
    fn columns_cover_footprint() {
        let v = col(-1, -1, 1, 1);
        assert_eq!(v.columns().count(), 9);
        assert!(v.columns().any(|c| c == (-1, -1)));
        assert!(v.columns().any(|c| c == (1, 1)));
    }
}
