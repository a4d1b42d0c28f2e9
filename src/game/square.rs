//! Enumerations of chessboard accessing constants, such as files, ranks and squares.
//!
//! Squares are indexed as `rank * 8 + file`, from A1 (0) to H8 (63). All three
//! types are closed enumerations, so an out of range coordinate cannot be
//! represented: converting a raw index goes through [`Square::from_index`] or
//! [`TryFrom<u8>`], both of which reject values above 63.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::bitboard::Bitboard;

/// Files of a chessboard (A-H).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}
impl File {
    /// All files, from A to H.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// A file from a given index.
    ///
    /// Returns `None` if the index is more than 7.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the set of all squares within this file.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(0x0101010101010101 << self as u8)
    }

    /// Iterator over all files, from A to H.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}
impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

/// Ranks of a chessboard (1-8).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}
impl Rank {
    /// All ranks, from 1 to 8.
    pub const ALL: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// A rank from a given index.
    ///
    /// Returns `None` if the index is more than 7.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the set of all squares within this rank.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(0xFF << (8 * self as u8))
    }

    /// Iterator over all ranks, from 1 to 8.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}
impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", 1 + *self as u8)
    }
}

/// General square indexing for 8x8 bitboards.
#[rustfmt::skip]
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}
impl Square {
    /// All squares, ordered from A1 to H8.
    #[rustfmt::skip]
    pub const ALL: [Self; 64] = {
        use self::Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Instantiates a new square based on file and rank.
    /// # Example
    /// ```
    /// # use horsey_position::game::square::*;
    /// assert_eq!(Square::new(File::F, Rank::Six), Square::F6);
    /// ```
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::ALL[((rank as u8) << 3 | file as u8) as usize]
    }

    /// Instantiates a new square from its index.
    ///
    /// Returns `None` if the index is more than 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the index of the square, `rank * 8 + file`.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the rank of the square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self as u8 >> 3) as usize]
    }

    /// Returns the file of the square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self as u8 & 7) as usize]
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    /// # Example
    /// ```
    /// # use horsey_position::game::square::*;
    /// assert_eq!(Square::E2.translate(Delta::North), Some(Square::E3));
    /// assert_eq!(Square::H4.translate(Delta::East), None);
    /// ```
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        let in_bounds = match delta {
            Delta::North => (self.rank() as u8) < 7,
            Delta::South => (self.rank() as u8) > 0,
            Delta::East => (self.file() as u8) < 7,
            Delta::West => (self.file() as u8) > 0,
        };
        if in_bounds {
            Self::from_index((self as u8).wrapping_add_signed(delta as i8))
        } else {
            None
        }
    }

    /// Number of ranks between two squares, regardless of direction.
    #[inline]
    pub const fn rank_distance(self, other: Self) -> u8 {
        (self.rank() as u8).abs_diff(other.rank() as u8)
    }

    /// An iterator over all squares, ordered from A1 to H8.
    pub fn squares_iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// An iterator over all squares, ranks from 8 down to 1 and files from A to H,
    /// which is the order FEN strings and board diagrams use.
    pub fn squares_fen_iter() -> impl Iterator<Item = Self> {
        Rank::iter()
            .rev()
            .flat_map(|rank| File::iter().map(move |file| Square::new(file, rank)))
    }

    /// Returns a bitboard containing only this square.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1 << (self as u8))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// A raw index did not designate one of the 64 squares.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
#[error("{0} is not a valid square index (expected 0 to 63)")]
pub struct InvalidSquareError(pub u8);

impl TryFrom<u8> for Square {
    type Error = InvalidSquareError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(InvalidSquareError(value))
    }
}
impl From<Square> for u8 {
    fn from(value: Square) -> Self {
        value as u8
    }
}

/// Errors that may arise when parsing squares in algebraic notation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SquareParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("{0} is not a valid file")]
    InvalidFile(char),
    #[error("{0} is not a valid rank")]
    InvalidRank(char),
    #[error("A square is exactly two characters long")]
    InputTooLong,
}

impl PartialFromStr for File {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let c = s.chars().next().ok_or(SquareParseError::EmptyInput)?;
        let file = match c.to_ascii_lowercase() {
            c @ 'a'..='h' => Self::ALL[(c as u8 - b'a') as usize],
            _ => return Err(SquareParseError::InvalidFile(c)),
        };
        Ok((file, &s[c.len_utf8()..]))
    }
}
impl PartialFromStr for Rank {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let c = s.chars().next().ok_or(SquareParseError::EmptyInput)?;
        let rank = match c {
            '1'..='8' => Self::ALL[(c as u8 - b'1') as usize],
            _ => return Err(SquareParseError::InvalidRank(c)),
        };
        Ok((rank, &s[c.len_utf8()..]))
    }
}
impl PartialFromStr for Square {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (file, s) = File::partial_from_str(s)?;
        let (rank, s) = Rank::partial_from_str(s)?;
        Ok((Self::new(file, rank), s))
    }
}

impl FromStr for File {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (file, "") => Ok(file),
            _ => Err(SquareParseError::InputTooLong),
        }
    }
}
impl FromStr for Rank {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (rank, "") => Ok(rank),
            _ => Err(SquareParseError::InputTooLong),
        }
    }
}
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (square, "") => Ok(square),
            _ => Err(SquareParseError::InputTooLong),
        }
    }
}

/// Orthogonal directions a square can be translated in.
///
/// The discriminant is the change in square index.
#[repr(i8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Delta {
    North = 8,
    South = -8,
    East = 1,
    West = -1,
}
impl Delta {
    /// The direction pawns of a given colour advance in.
    #[inline]
    pub const fn forward(colour: super::colour::Colour) -> Self {
        if colour.is_black() {
            Self::South
        } else {
            Self::North
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn inverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}
