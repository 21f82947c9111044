//! Geometry primitives: [`Position`] and the named direction constants.
//!
//! A `Position` is both a grid key (row, column) and a movement offset, so
//! the direction constants below are plain `Position` values added to a
//! cell's coordinates to reach its neighbors.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D integer coordinate. Row grows down (in the default upper-left
/// origin), column grows right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The reversed direction (both components negated).
    #[inline]
    pub const fn opposite(self) -> Self {
        Self {
            row: -self.row,
            col: -self.col,
        }
    }
}

// --- trait impls for Position ---

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    /// Row-major ordering, so sorted positions read in reading order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for Position {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.opposite()
    }
}

impl Mul<i32> for Position {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.row * rhs, self.col * rhs)
    }
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// One row up.
pub const NORTH: Position = Position::new(-1, 0);
/// One row down.
pub const SOUTH: Position = Position::new(1, 0);
/// One column right.
pub const EAST: Position = Position::new(0, 1);
/// One column left.
pub const WEST: Position = Position::new(0, -1);

/// Alias for [`NORTH`].
pub const UP: Position = NORTH;
/// Alias for [`SOUTH`].
pub const DOWN: Position = SOUTH;
/// Alias for [`EAST`].
pub const RIGHT: Position = EAST;
/// Alias for [`WEST`].
pub const LEFT: Position = WEST;

/// Up-left diagonal.
pub const NW: Position = Position::new(-1, -1);
/// Up-right diagonal.
pub const NE: Position = Position::new(-1, 1);
/// Down-right diagonal.
pub const SE: Position = Position::new(1, 1);
/// Down-left diagonal.
pub const SW: Position = Position::new(1, -1);

/// The four cardinal directions, clockwise from north.
pub const ORTHOGONAL: [Position; 4] = [NORTH, EAST, SOUTH, WEST];

/// The four diagonal directions, clockwise from north-east.
pub const DIAGONAL: [Position; 4] = [NE, SE, SW, NW];

/// All eight directions, clockwise from north.
pub const SURROUNDING: [Position; 8] = [NORTH, NE, EAST, SE, SOUTH, SW, WEST, NW];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Cell count of the axis-aligned rectangle spanned by two corner
/// positions, both corners included.
#[inline]
pub fn area(a: Position, b: Position) -> i64 {
    let height = (a.row - b.row).abs() as i64 + 1;
    let width = (a.col - b.col).abs() as i64 + 1;
    height * width
}
