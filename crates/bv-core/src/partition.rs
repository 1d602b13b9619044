//! Per-face buffer partitioning and visibility
//!
//! Each element array (quads, boundary segments, interior line segments)
//! stores the six faces' contributions contiguously in [`FACES`] order.
//! A [`PartitionTable`] records where each face's range begins, so a
//! renderer can toggle faces individually or draw everything in one call.
//!
//! [`FACES`]: crate::grid::FACES

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Seven monotonically increasing offsets: six face starts plus a total
/// sentinel. Face `i` owns the half-open element range
/// `[table[i], table[i+1])`; `table[6]` is the array length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionTable(pub [u32; 7]);

impl PartitionTable {
    /// Build the table as a running sum of per-face element counts.
    pub fn from_counts(counts: [usize; 6]) -> Self {
        let mut table = [0u32; 7];
        for (i, &count) in counts.iter().enumerate() {
            table[i + 1] = table[i] + count as u32;
        }
        Self(table)
    }

    /// Total element count across all faces.
    pub fn total(&self) -> u32 {
        self.0[6]
    }

    /// Element range owned by face `i` (`i < 6`).
    pub fn range(&self, face: usize) -> Range<u32> {
        self.0[face]..self.0[face + 1]
    }

    /// Element ranges to draw for the given visibility set.
    ///
    /// With all six faces visible this is a single contiguous range over
    /// the whole array (one draw call, the common case); otherwise one
    /// range per visible face.
    pub fn draw_ranges(&self, visible: FaceSet) -> Vec<Range<u32>> {
        if visible.is_all() {
            vec![0..self.total()]
        } else {
            visible.iter().map(|face| self.range(face)).collect()
        }
    }
}

/// Set of visible face indices (0–5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceSet(u8);

impl FaceSet {
    /// All six faces.
    pub const ALL: FaceSet = FaceSet(0b11_1111);
    /// No faces.
    pub const EMPTY: FaceSet = FaceSet(0);

    /// Add a face to the set.
    pub fn insert(&mut self, face: usize) {
        debug_assert!(face < 6);
        self.0 |= 1 << face;
    }

    /// Remove a face from the set.
    pub fn remove(&mut self, face: usize) {
        debug_assert!(face < 6);
        self.0 &= !(1 << face);
    }

    /// Whether the face is in the set.
    pub fn contains(&self, face: usize) -> bool {
        debug_assert!(face < 6);
        self.0 & (1 << face) != 0
    }

    /// Whether all six faces are visible.
    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }

    /// Whether no face is visible.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of visible faces.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Visible face indices in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..6).filter(|&face| self.contains(face))
    }
}

impl Default for FaceSet {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_sum_covers_total() {
        let counts = [6, 6, 15, 15, 20, 20];
        let table = PartitionTable::from_counts(counts);
        assert_eq!(table.total(), 82);
        for face in 0..6 {
            let range = table.range(face);
            assert_eq!((range.end - range.start) as usize, counts[face]);
        }
        // Contiguous and non-overlapping: each range starts where the
        // previous one ends.
        for face in 0..5 {
            assert_eq!(table.range(face).end, table.range(face + 1).start);
        }
        assert_eq!(table.range(0).start, 0);
        assert_eq!(table.range(5).end, table.total());
    }

    #[test]
    fn all_visible_is_one_contiguous_range() {
        let table = PartitionTable::from_counts([1, 2, 3, 4, 5, 6]);
        assert_eq!(table.draw_ranges(FaceSet::ALL), vec![0..21]);
    }

    #[test]
    fn subset_draws_one_range_per_face() {
        let table = PartitionTable::from_counts([1, 2, 3, 4, 5, 6]);
        let mut visible = FaceSet::EMPTY;
        visible.insert(1);
        visible.insert(4);
        assert_eq!(
            table.draw_ranges(visible),
            vec![table.range(1), table.range(4)]
        );
    }

    #[test]
    fn empty_set_draws_nothing() {
        let table = PartitionTable::from_counts([1, 1, 1, 1, 1, 1]);
        assert!(table.draw_ranges(FaceSet::EMPTY).is_empty());
    }

    #[test]
    fn face_set_operations() {
        let mut set = FaceSet::default();
        assert!(set.is_all());
        assert_eq!(set.len(), 6);
        set.remove(3);
        assert!(!set.is_all());
        assert!(!set.contains(3));
        assert_eq!(set.len(), 5);
        set.insert(3);
        assert!(set.is_all());
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }
}
