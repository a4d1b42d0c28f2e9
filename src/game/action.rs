//! # Moves
//! A [`Move`] only names the squares involved and an optional promotion. What
//! kind of move it is (capture, castle, en passant, double push) is worked out
//! by [`Position::apply`](super::position::Position::apply) from the position
//! it is played in.
//!
//! Moves are written in coordinate notation, as used by the UCI protocol:
//! origin square, target square and an optional lowercase promotion piece,
//! e.g. `e2e4`, `e1g1` or `a7a8q`.

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::{
    piece::{PieceParseError, PromotionTarget},
    square::{Square, SquareParseError},
};

/// Fixed capacity list of moves, enough for any legal chess position.
pub type MoveList = heapless::Vec<Move, 256>;

/// A move from one square to another, possibly promoting a pawn.
///
/// Moves carry no legality information.
/// ```
/// # use horsey_position::game::{action::Move, piece::PromotionTarget, square::Square};
/// let mv: Move = "a7a8q".parse().unwrap();
/// assert_eq!(mv, Move::new_promotion(Square::A7, Square::A8, PromotionTarget::Queen));
/// assert_eq!(mv.to_string(), "a7a8q");
/// ```
#[derive(Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub origin: Square,
    pub target: Square,
    pub promotion: Option<PromotionTarget>,
}
impl Move {
    /// A move that does not promote.
    #[inline]
    pub const fn new(origin: Square, target: Square) -> Self {
        Self {
            origin,
            target,
            promotion: None,
        }
    }

    /// A pawn move promoting to `promotion`.
    #[inline]
    pub const fn new_promotion(origin: Square, target: Square, promotion: PromotionTarget) -> Self {
        Self {
            origin,
            target,
            promotion: Some(promotion),
        }
    }
}
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.origin, self.target)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{promotion}")?
        }
        Ok(())
    }
}

/// Errors that may arise when parsing moves in coordinate notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoveParseError {
    #[error("Invalid origin square: {0}")]
    InvalidOriginSquare(SquareParseError),
    #[error("Invalid target square: {0}")]
    InvalidTargetSquare(SquareParseError),
    #[error("Invalid promotion: {0}")]
    InvalidPromotion(PieceParseError),
    #[error("Unexpected trailing input {0:?}")]
    TrailingInput(char),
}

impl PartialFromStr for Move {
    type Err = MoveParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (origin, s) =
            Square::partial_from_str(s).map_err(MoveParseError::InvalidOriginSquare)?;
        let (target, s) =
            Square::partial_from_str(s).map_err(MoveParseError::InvalidTargetSquare)?;

        // Anything that is not a piece symbol ends the move, but a piece symbol
        // that cannot be promoted to is an error.
        let (promotion, s) = match PromotionTarget::partial_from_str(s) {
            Ok((promotion, rest)) => (Some(promotion), rest),
            Err(e @ PieceParseError::InvalidPromotionTarget(_)) => {
                return Err(MoveParseError::InvalidPromotion(e))
            }
            Err(_) => (None, s),
        };

        Ok((
            Self {
                origin,
                target,
                promotion,
            },
            s,
        ))
    }
}
impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mv, rest) = Self::partial_from_str(s)?;
        match rest.chars().next() {
            None => Ok(mv),
            Some(c) => Err(MoveParseError::TrailingInput(c)),
        }
    }
}
