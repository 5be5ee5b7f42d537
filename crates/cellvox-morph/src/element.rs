//! Structuring elements for binary dilation.

use std::fmt;

/// Neighborhood used by one dilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuringElement {
    /// Face-connected neighborhood (6 neighbors, connectivity 1).
    Face,
    /// Full 3x3x3 neighborhood (26 neighbors).
    #[default]
    Full,
}

/// Offsets of the face-connected neighborhood, center excluded.
const FACE_OFFSETS: [(i64, i64, i64); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Offsets of the full 3x3x3 neighborhood, center excluded.
const FULL_OFFSETS: [(i64, i64, i64); 26] = [
    (-1, -1, -1),
    (0, -1, -1),
    (1, -1, -1),
    (-1, 0, -1),
    (0, 0, -1),
    (1, 0, -1),
    (-1, 1, -1),
    (0, 1, -1),
    (1, 1, -1),
    (-1, -1, 0),
    (0, -1, 0),
    (1, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (-1, 1, 0),
    (0, 1, 0),
    (1, 1, 0),
    (-1, -1, 1),
    (0, -1, 1),
    (1, -1, 1),
    (-1, 0, 1),
    (0, 0, 1),
    (1, 0, 1),
    (-1, 1, 1),
    (0, 1, 1),
    (1, 1, 1),
];

impl StructuringElement {
    /// Neighbor offsets of this element, center voxel excluded.
    #[must_use]
    pub const fn offsets(self) -> &'static [(i64, i64, i64)] {
        match self {
            Self::Face => &FACE_OFFSETS,
            Self::Full => &FULL_OFFSETS,
        }
    }
}

impl fmt::Display for StructuringElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Face => write!(f, "face"),
            Self::Full => write!(f, "full"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_counts() {
        assert_eq!(StructuringElement::Face.offsets().len(), 6);
        assert_eq!(StructuringElement::Full.offsets().len(), 26);
    }

    #[test]
    fn no_center_offset() {
        for element in [StructuringElement::Face, StructuringElement::Full] {
            assert!(!element.offsets().contains(&(0, 0, 0)));
        }
    }

    #[test]
    fn face_is_subset_of_full() {
        let full = StructuringElement::Full.offsets();
        for offset in StructuringElement::Face.offsets() {
            assert!(full.contains(offset));
        }
    }
}
