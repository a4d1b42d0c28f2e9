//! # Representation of sets of squares.
//! Bitboards are an efficient way to represent sets of squares,
//! and are used extensively in the board representation.

use std::iter::FusedIterator;

use super::square::{Rank, Square};

/// Bitboards are data structures used to efficiently represent a set of squares.
///
/// Bit `n` is set when the square of index `n` is a member of the set.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    /// The empty bitboard.
    pub const EMPTY: Self = Self(0);
    /// The full (universe) bitboard.
    pub const UNIVERSE: Self = Self(u64::MAX);

    /// Returns an empty bitboard.
    #[inline]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Returns the universal set (contains all squares).
    #[inline]
    pub const fn universe() -> Self {
        Self::UNIVERSE
    }

    /// Checks if a bitboard is empty.
    /// # Example
    /// ```
    /// # use horsey_position::game::bitboard::*;
    /// assert!(Bitboard::empty().is_empty());
    /// assert!(!Bitboard::universe().is_empty());
    /// ```
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Adds a square to the set.
    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= square.bitboard().0
    }

    /// Removes a square from the set.
    ///
    /// Removing a square that is not a member does nothing.
    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !square.bitboard().0
    }

    /// Checks if a given square is set on the bitboard.
    /// # Example
    /// ```
    /// # use horsey_position::game::bitboard::*;
    /// # use horsey_position::game::square::*;
    /// let bb = Bitboard::from_iter([Square::E5, Square::D7]);
    /// assert!(bb.is_set(Square::E5));
    /// assert!(!bb.is_set(Square::E6));
    /// ```
    #[inline]
    pub const fn is_set(&self, square: Square) -> bool {
        self.intersects(square.bitboard())
    }

    /// Returns the cardinality of the bitboard (i.e. how many squares are set).
    /// # Example
    /// ```
    /// # use horsey_position::game::bitboard::*;
    /// # use horsey_position::game::square::*;
    /// let bb = Bitboard::from_iter([Square::E5, Square::D7]);
    /// assert_eq!(bb.cardinality(), 2);
    /// assert_eq!(Bitboard::empty().cardinality(), 0);
    /// assert_eq!(Bitboard::universe().cardinality(), 64);
    /// ```
    #[inline]
    pub const fn cardinality(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Returns the lowest square in the bitboard.
    ///
    /// If the bitboard is empty, returns `None`.
    #[inline]
    pub const fn lowest_square(&self) -> Option<Square> {
        Square::from_index(self.0.trailing_zeros() as u8)
    }

    /// Pops the lowest square in the bitboard.
    ///
    /// If the bitboard is empty, returns `None`.
    /// # Example
    /// ```
    /// # use horsey_position::game::bitboard::*;
    /// # use horsey_position::game::square::*;
    /// let mut bb = Bitboard::from_iter([Square::E5, Square::D7]);
    /// assert_eq!(bb.pop_lowest_square(), Some(Square::E5));
    /// assert_eq!(bb.pop_lowest_square(), Some(Square::D7));
    /// assert_eq!(bb.pop_lowest_square(), None);
    /// ```
    #[inline]
    pub fn pop_lowest_square(&mut self) -> Option<Square> {
        let square = self.lowest_square()?;
        self.0 &= self.0.wrapping_sub(1);
        Some(square)
    }

    /// Returns the highest square in the bitboard.
    ///
    /// If the bitboard is empty, returns `None`.
    #[inline]
    pub const fn highest_square(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::from_index(63 - self.0.leading_zeros() as u8)
        }
    }

    /// Pops the highest square in the bitboard.
    ///
    /// If the bitboard is empty, returns `None`.
    #[inline]
    pub fn pop_highest_square(&mut self) -> Option<Square> {
        let square = self.highest_square()?;
        self.remove(square);
        Some(square)
    }

    /// Returns `true` if two bitboards intersect i.e. have at least one common
    /// set square.
    #[inline]
    pub const fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterator over the member squares, lowest first, without consuming the
    /// bitboard.
    #[inline]
    pub const fn squares(&self) -> Self {
        *self
    }

    /// Returns `true` if every square of `other` is also in this set.
    #[inline]
    pub const fn is_superset(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}
impl std::ops::BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}
impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}
impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}
impl std::ops::BitXor for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}
impl std::ops::BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0
    }
}
impl std::ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

/// Iterates over set squares in a [Bitboard], lowest first.
impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lowest_square()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.cardinality() as usize;
        (size, Some(size))
    }
}
/// Iterates over set squares top down.
impl DoubleEndedIterator for Bitboard {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pop_highest_square()
    }
}
impl FusedIterator for Bitboard {}
impl ExactSizeIterator for Bitboard {}
impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut bb = Self::default();
        for sq in iter {
            bb.insert(sq);
        }
        bb
    }
}

impl From<Bitboard> for u64 {
    fn from(value: Bitboard) -> Self {
        value.0
    }
}
impl From<u64> for Bitboard {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}
impl std::fmt::Display for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::iter().rev() {
            for square in rank.bitboard().squares() {
                write!(f, "{} ", if self.is_set(square) { 'x' } else { '.' })?
            }
            writeln!(f)?
        }
        Ok(())
    }
}
