//! Grid coordinates: the [`Pos`] type.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell address in a square grid. Row grows down, column grows right
/// (screen coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Top-left corner (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours, clockwise from north
    /// (up, right, down, left).
    ///
    /// This enumeration order is part of the determinism contract: together
    /// with the frontier's insertion-order tie-break it fixes which of
    /// several equally short routes a search returns.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row, self.col + 1),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
        ]
    }
}

// --- trait impls for Pos ---

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pos_round_trip() {
        let p = Pos::new(3, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Pos = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
