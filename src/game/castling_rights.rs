use std::str::FromStr;

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::{colour::Colour, square::Square};

/// Efficient representation of castling rights.
///
/// Each of the four rights is one bit. The associated constants are themselves
/// single-right masks and can be combined with `|` to query or modify several
/// rights at once.
/// ```
/// # use horsey_position::game::castling_rights::CastlingRights;
/// let mut rights = CastlingRights::full();
/// rights.remove(CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
/// assert!(rights.has_any(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE));
/// assert!(!rights.has_all(CastlingRights::WHITE_KINGSIDE | CastlingRights::WHITE_QUEENSIDE));
/// assert_eq!(rights.to_string(), "Qk");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(u8);
impl CastlingRights {
    pub const BLACK_KINGSIDE: Self = Self(0b0001);
    pub const BLACK_QUEENSIDE: Self = Self(0b0010);
    pub const WHITE_KINGSIDE: Self = Self(0b0100);
    pub const WHITE_QUEENSIDE: Self = Self(0b1000);
    pub const WHITE: Self = Self(Self::WHITE_KINGSIDE.0 | Self::WHITE_QUEENSIDE.0);
    pub const BLACK: Self = Self(Self::BLACK_KINGSIDE.0 | Self::BLACK_QUEENSIDE.0);

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::WHITE.0 | Self::BLACK.0)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(0)
    }

    /// Returns `true` if none of the sides can castle.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every right in `mask` is held.
    #[inline(always)]
    pub const fn has_all(self, mask: Self) -> bool {
        self.0 & mask.0 == mask.0
    }

    /// Returns `true` if at least one right in `mask` is held.
    #[inline(always)]
    pub const fn has_any(self, mask: Self) -> bool {
        self.0 & mask.0 != 0
    }

    /// Grants every right in `mask`.
    #[inline(always)]
    pub fn insert(&mut self, mask: Self) {
        self.0 |= mask.0
    }

    /// Revokes every right in `mask`.
    #[inline(always)]
    pub fn remove(&mut self, mask: Self) {
        self.0 &= !mask.0
    }

    /// Both rights belonging to `colour`.
    #[inline(always)]
    pub const fn of_colour(colour: Colour) -> Self {
        if colour.is_black() {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }

    /// Revokes both castling rights of `colour`.
    #[inline(always)]
    pub fn clear_colour(&mut self, colour: Colour) {
        self.remove(Self::of_colour(colour))
    }

    /// The right tied to the rook starting on `square`, if `square` is one of
    /// the four corners.
    #[inline(always)]
    pub const fn of_corner(square: Square) -> Option<Self> {
        match square {
            Square::A1 => Some(Self::WHITE_QUEENSIDE),
            Square::H1 => Some(Self::WHITE_KINGSIDE),
            Square::A8 => Some(Self::BLACK_QUEENSIDE),
            Square::H8 => Some(Self::BLACK_KINGSIDE),
            _ => None,
        }
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        self.has_any(Self(Self::of_colour(colour).0 & Self::KINGSIDE))
    }

    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        self.has_any(Self(Self::of_colour(colour).0 & Self::QUEENSIDE))
    }

    const KINGSIDE: u8 = Self::WHITE_KINGSIDE.0 | Self::BLACK_KINGSIDE.0;
    const QUEENSIDE: u8 = Self::WHITE_QUEENSIDE.0 | Self::BLACK_QUEENSIDE.0;
}
impl std::ops::BitOr for CastlingRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Errors that may arise when parsing castling rights in FEN notation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum CastlingRightsParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Unexpected character {0} in castling rights")]
    UnexpectedToken(char),
}

impl PartialFromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn partial_from_str(mut s: &str) -> Result<(Self, &str), Self::Err> {
        if let Some(rest) = s.strip_prefix('-') {
            return Ok((Self::none(), rest));
        }

        let mut rights = Self::none();
        while let Some(c) = s.chars().next() {
            let right = match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => break,
            };
            if rights.has_all(right) {
                break;
            }
            rights.insert(right);
            s = &s[1..]
        }

        if rights.is_none() {
            match s.chars().next() {
                Some(c) => Err(CastlingRightsParseError::UnexpectedToken(c)),
                None => Err(CastlingRightsParseError::EmptyInput),
            }
        } else {
            Ok((rights, s))
        }
    }
}
impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (rights, "") => Ok(rights),
            (_, rest) => Err(CastlingRightsParseError::UnexpectedToken(
                rest.chars().next().unwrap_or('-'),
            )),
        }
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        for (right, symbol) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.has_all(right) {
                write!(f, "{symbol}")?
            }
        }
        Ok(())
    }
}
