//! Rotation-invariant classes of adjacent LBP code pairs
//!
//! Two codes `(c1, c2)` sampled at adjacent windows look like `(ρc2, ρc1)`
//! once the neighborhood is turned by half a revolution, where `ρ` rotates a
//! `P`-bit code circularly by `P/2` bits. The table assigns one class id to
//! every orbit of a pair under that half-turn mirror and under swapping the
//! pair, which makes it symmetric.

use ndarray::Array2;
use texturefeat_core::{Error, Result};
use tracing::debug;

/// Largest sample count for which a table is built (`2^P × 2^P` cells)
pub const MAX_MAPPED_POINTS: usize = 12;

/// Id of the first class; ids are dense from here on
pub const FIRST_CLASS_ID: u32 = 1;

const UNASSIGNED: u32 = 0;

/// Symmetric `2^P × 2^P` table of class ids for LBP code pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationInvariantMap {
    points: usize,
    table: Array2<u32>,
    classes: u32,
}

impl RotationInvariantMap {
    /// Build the table for codes of `points` bits.
    ///
    /// `points` must be even (the half turn must map sample points onto
    /// sample points) and at most [`MAX_MAPPED_POINTS`].
    pub fn new(points: usize) -> Result<Self> {
        if points == 0 || points % 2 != 0 {
            return Err(Error::invalid_parameter(
                "points",
                points,
                "must be even and > 0 for rotation-invariant pairs",
            ));
        }
        if points > MAX_MAPPED_POINTS {
            return Err(Error::invalid_parameter(
                "points",
                points,
                format!("at most {MAX_MAPPED_POINTS} for rotation-invariant pairs"),
            ));
        }

        let size = 1usize << points;
        let mut table = Array2::from_elem((size, size), UNASSIGNED);
        let mut next = FIRST_CLASS_ID;

        for i in 0..size {
            for j in 0..size {
                if table[(i, j)] != UNASSIGNED {
                    continue;
                }
                let ri = rotate_half(i as u32, points) as usize;
                let rj = rotate_half(j as u32, points) as usize;
                for cell in [(i, j), (j, i), (rj, ri), (ri, rj)] {
                    table[cell] = next;
                }
                next += 1;
            }
        }

        let classes = next - FIRST_CLASS_ID;
        debug!("rotation-invariant map for P={}: {} classes", points, classes);

        Ok(Self {
            points,
            table,
            classes,
        })
    }

    /// Sample count the table was built for
    pub fn points(&self) -> usize {
        self.points
    }

    /// Number of distinct classes
    pub fn class_count(&self) -> u32 {
        self.classes
    }

    /// Class id of the code pair `(c1, c2)`
    pub fn class_of(&self, c1: u32, c2: u32) -> Result<u32> {
        self.table
            .get((c1 as usize, c2 as usize))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row: c1 as usize,
                col: c2 as usize,
                rows: self.table.nrows(),
                cols: self.table.ncols(),
            })
    }

    /// The full table
    pub fn table(&self) -> &Array2<u32> {
        &self.table
    }
}

/// Rotate a `points`-bit code circularly by `points / 2` bits.
pub fn rotate_half(code: u32, points: usize) -> u32 {
    let half = points / 2;
    let mask = if points >= 32 { u32::MAX } else { (1u32 << points) - 1 };
    ((code >> half) | (code << (points - half))) & mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::sync::OnceLock;

    fn eight_point_map() -> &'static RotationInvariantMap {
        static MAP: OnceLock<RotationInvariantMap> = OnceLock::new();
        MAP.get_or_init(|| RotationInvariantMap::new(8).unwrap())
    }

    #[test]
    fn test_rotate_half() {
        assert_eq!(rotate_half(0b0000_0001, 8), 0b0001_0000);
        assert_eq!(rotate_half(0b1100_0011, 8), 0b0011_1100);
        assert_eq!(rotate_half(0b01, 2), 0b10);
    }

    #[test]
    fn test_rejects_odd_and_oversized() {
        assert!(RotationInvariantMap::new(0).is_err());
        assert!(RotationInvariantMap::new(3).is_err());
        assert!(RotationInvariantMap::new(14).is_err());
    }

    #[test]
    fn test_every_cell_assigned_and_symmetric() {
        let map = RotationInvariantMap::new(4).unwrap();
        let t = map.table();
        assert_eq!(t.dim(), (16, 16));
        for i in 0..16 {
            for j in 0..16 {
                assert_ne!(t[(i, j)], UNASSIGNED);
                assert_eq!(t[(i, j)], t[(j, i)]);
            }
        }
    }

    #[test]
    fn test_ids_are_dense() {
        let map = RotationInvariantMap::new(4).unwrap();
        let ids: BTreeSet<u32> = map.table().iter().copied().collect();
        let expected: BTreeSet<u32> =
            (FIRST_CLASS_ID..FIRST_CLASS_ID + map.class_count()).collect();
        assert_eq!(ids, expected);
        assert_eq!(map.table()[(0, 0)], FIRST_CLASS_ID);
    }

    #[test]
    fn test_two_point_classes() {
        // With two bits ρ swaps them: (01, 00) mirrors to (00, 10).
        let map = RotationInvariantMap::new(2).unwrap();
        assert_eq!(map.class_of(0, 1).unwrap(), map.class_of(2, 0).unwrap());
        assert_eq!(map.class_of(1, 1).unwrap(), map.class_of(2, 2).unwrap());
        assert_ne!(map.class_of(0, 0).unwrap(), map.class_of(3, 3).unwrap());
        assert!(map.class_of(4, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_half_turn_mirror_shares_class(i in 0u32..256, j in 0u32..256) {
            let map = eight_point_map();
            let mirrored = map.class_of(rotate_half(j, 8), rotate_half(i, 8)).unwrap();
            prop_assert_eq!(map.class_of(i, j).unwrap(), mirrored);
            prop_assert_eq!(map.class_of(i, j).unwrap(), map.class_of(j, i).unwrap());
        }
    }
}
