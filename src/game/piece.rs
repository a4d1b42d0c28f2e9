//! Piece types encoding.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::colour::Colour;

/// Total number of different piece kinds (6).
pub const NUM_PIECES: usize = 6;

const PIECE_SYMBOLS: [char; 12] = ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'];

/// Complete set of information for identifying a piece (colour and kind).
///
/// Pieces are parsed from and displayed as their FEN symbol: lowercase for black,
/// uppercase for white.
/// ```
/// # use horsey_position::game::piece::*;
/// # use horsey_position::game::colour::*;
/// assert_eq!("p".parse(), Ok(Piece::new(PieceKind::Pawn, Colour::Black)));
/// assert_eq!(Piece::new(PieceKind::Queen, Colour::White).to_string(), "Q");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
}
impl Piece {
    /// Creates a new `kind` piece of the given `colour`.
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Self { kind, colour }
    }

    /// Returns the piece's FEN symbol.
    pub const fn symbol(&self) -> char {
        PIECE_SYMBOLS[self.colour as usize * NUM_PIECES + self.kind as usize]
    }
}
impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Errors that may arise when parsing pieces and promotion targets.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
pub enum PieceParseError {
    #[error("{0} is not a valid piece symbol")]
    InvalidPieceSymbol(char),
    #[error("Cannot promote to {0:?}")]
    InvalidPromotionTarget(PieceKind),
    #[error("Empty input")]
    EmptyInput,
    #[error("A piece can only be one character long")]
    InputTooLong,
}

impl PartialFromStr for Piece {
    type Err = PieceParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let symbol = s.chars().next().ok_or(PieceParseError::EmptyInput)?;
        let index = PIECE_SYMBOLS
            .iter()
            .position(|&c| c == symbol)
            .ok_or(PieceParseError::InvalidPieceSymbol(symbol))?;
        let piece = Self::new(
            PieceKind::ALL[index % NUM_PIECES],
            Colour::from(index >= NUM_PIECES),
        );
        Ok((piece, &s[symbol.len_utf8()..]))
    }
}
impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (piece, "") => Ok(piece),
            _ => Err(PieceParseError::InputTooLong),
        }
    }
}

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// All piece kinds.
    pub const ALL: [Self; NUM_PIECES] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Iterator over all piece kinds.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Checks if this piece kind can be promoted to.
    ///
    /// Returns true for all pieces but pawns and kings.
    pub const fn is_valid_promotion_target(&self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Lowercase, as used in coordinate move notation.
        write!(f, "{}", PIECE_SYMBOLS[NUM_PIECES + *self as usize])
    }
}
impl PartialFromStr for PieceKind {
    type Err = PieceParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        Piece::partial_from_str(s).map(|(piece, rest)| (piece.kind, rest))
    }
}
impl FromStr for PieceKind {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Piece::from_str(s).map(|piece| piece.kind)
    }
}

/// Pieces a pawn may promote to (knight, bishop, rook and queen).
///
/// A move that does not promote carries no target at all, so "promoting to a
/// pawn" or "promoting to a king" cannot be expressed.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PromotionTarget {
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
}
impl PromotionTarget {
    /// All promotion targets.
    pub const ALL: [Self; 4] = [Self::Knight, Self::Bishop, Self::Rook, Self::Queen];

    /// Converts a piece kind into a promotion target if such a transformation is valid.
    /// # Example
    /// ```
    /// # use horsey_position::game::piece::*;
    /// assert_eq!(PromotionTarget::from_piece_kind(PieceKind::Rook), Some(PromotionTarget::Rook));
    /// assert_eq!(PromotionTarget::from_piece_kind(PieceKind::Pawn), None);
    /// ```
    pub const fn from_piece_kind(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Knight => Some(Self::Knight),
            PieceKind::Bishop => Some(Self::Bishop),
            PieceKind::Rook => Some(Self::Rook),
            PieceKind::Queen => Some(Self::Queen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Converts this promotion target to the corresponding piece kind.
    pub const fn to_piece_kind(self) -> PieceKind {
        match self {
            Self::Knight => PieceKind::Knight,
            Self::Bishop => PieceKind::Bishop,
            Self::Rook => PieceKind::Rook,
            Self::Queen => PieceKind::Queen,
        }
    }
}
impl From<PromotionTarget> for PieceKind {
    fn from(value: PromotionTarget) -> Self {
        value.to_piece_kind()
    }
}
impl TryFrom<PieceKind> for PromotionTarget {
    type Error = PieceParseError;

    fn try_from(value: PieceKind) -> Result<Self, Self::Error> {
        Self::from_piece_kind(value).ok_or(PieceParseError::InvalidPromotionTarget(value))
    }
}
impl PartialFromStr for PromotionTarget {
    type Err = PieceParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (kind, rest) = PieceKind::partial_from_str(s)?;
        Ok((Self::try_from(kind)?, rest))
    }
}
impl FromStr for PromotionTarget {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(PieceKind::from_str(s)?)
    }
}
impl std::fmt::Display for PromotionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_piece_kind())
    }
}
