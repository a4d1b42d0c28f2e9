//! # FEN string utilities

use std::str::FromStr;

use thiserror::Error;

use crate::parsing::{parse_int, walk_whitespace, PartialFromStr};

use super::{
    board::Board,
    castling_rights::{CastlingRights, CastlingRightsParseError},
    colour::Colour,
    en_passant::EnPassant,
    piece::{Piece, PieceParseError},
    square::{File, Rank, Square, SquareParseError},
};

/// FEN string of the initial position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest fullmove number accepted. Positions set up from it can still be
/// played on for more than two billion plies before the ply counter saturates.
pub const MAX_FULLMOVE_NUMBER: u32 = 1 << 30;

/// FEN parsing errors.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum FenError {
    #[error("FEN string missing the {0} section")]
    Incomplete(&'static str),
    #[error("Unexpected character {val:?} in the {section} section")]
    UnexpectedToken { section: &'static str, val: char },
    #[error("Rank {0} does not describe exactly 8 squares")]
    BadRankLength(Rank),
    #[error("The piece section describes {0} ranks instead of 8")]
    BadRankCount(u8),
    #[error("The {0} is out of range")]
    CounterOutOfRange(&'static str),
    #[error(transparent)]
    Piece(#[from] PieceParseError),
    #[error("Invalid castling rights: {0}")]
    CastlingRights(#[from] CastlingRightsParseError),
    #[error("Invalid en passant square: {0}")]
    EnPassant(#[from] SquareParseError),
}

/// A position as described by Forsyth-Edwards Notation.
///
/// The halfmove clock and fullmove number are optional when parsing and
/// default to 0 and 1. Fullmove numbers above [`MAX_FULLMOVE_NUMBER`] are
/// rejected.
/// ```
/// # use horsey_position::game::fen::*;
/// let fen: Fen = STARTING_FEN.parse().unwrap();
/// assert_eq!(fen.to_string(), STARTING_FEN);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Colour,
    pub castling_rights: CastlingRights,
    pub en_passant: EnPassant,
    pub halfmove_clock: u16,
    pub fullmove_number: u32,
}
impl Fen {
    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        fen.parse()
    }
}

/// Parses the piece placement section, rank 8 first.
fn parse_board(mut s: &str) -> Result<(Board, &str), FenError> {
    if s.is_empty() {
        return Err(FenError::Incomplete("pieces"));
    }

    let mut board = Board::empty();
    let mut ranks_seen = 1u8;
    let mut file = 0u8;
    while let Some(c) = s.chars().next() {
        let rank = Rank::ALL[usize::from(8 - ranks_seen)];
        match c {
            '/' => {
                if file != 8 {
                    return Err(FenError::BadRankLength(rank));
                }
                if ranks_seen == 8 {
                    return Err(FenError::BadRankCount(9));
                }
                ranks_seen += 1;
                file = 0;
            }
            '1'..='8' => {
                file += c as u8 - b'0';
                if file > 8 {
                    return Err(FenError::BadRankLength(rank));
                }
            }
            c if c.is_ascii_whitespace() => break,
            _ => {
                let (piece, rest) = Piece::partial_from_str(s)?;
                let file_index = File::from_index(file).ok_or(FenError::BadRankLength(rank))?;
                board.set(piece, Square::new(file_index, rank));
                file += 1;
                s = rest;
                continue;
            }
        }
        s = &s[1..];
    }

    if file != 8 {
        Err(FenError::BadRankLength(Rank::ALL[usize::from(8 - ranks_seen)]))
    } else if ranks_seen != 8 {
        Err(FenError::BadRankCount(ranks_seen))
    } else {
        Ok((board, s))
    }
}

/// Skips the whitespace separating two sections, which must be present.
fn separator<'a>(s: &'a str, next_section: &'static str) -> Result<&'a str, FenError> {
    let rest = walk_whitespace(s);
    match (s.chars().next(), rest.is_empty()) {
        (None, _) | (Some(_), true) => Err(FenError::Incomplete(next_section)),
        (Some(c), false) if rest.len() == s.len() => Err(FenError::UnexpectedToken {
            section: next_section,
            val: c,
        }),
        _ => Ok(rest),
    }
}

/// Parses an optional whitespace separated move counter.
///
/// Returns `Ok(None)` when no counter follows, and an error when one does
/// but does not fit in `T`.
fn counter<'a, T: FromStr>(s: &'a str, section: &'static str) -> Result<Option<(T, &'a str)>, FenError> {
    let rest = walk_whitespace(s);
    if rest.len() == s.len() || !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }
    parse_int(rest)
        .map(Some)
        .ok_or(FenError::CounterOutOfRange(section))
}

impl PartialFromStr for Fen {
    type Err = FenError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (board, s) = parse_board(walk_whitespace(s))?;

        let s = separator(s, "side to move")?;
        let (side_to_move, s) = match s.chars().next() {
            Some('w') => (Colour::White, &s[1..]),
            Some('b') => (Colour::Black, &s[1..]),
            Some(val) => {
                return Err(FenError::UnexpectedToken {
                    section: "side to move",
                    val,
                })
            }
            None => return Err(FenError::Incomplete("side to move")),
        };

        let s = separator(s, "castling rights")?;
        let (castling_rights, s) = CastlingRights::partial_from_str(s)?;

        let s = separator(s, "en passant")?;
        let (en_passant, s) = match s.strip_prefix('-') {
            Some(rest) => (EnPassant::none(), rest),
            None => {
                let (square, rest) = Square::partial_from_str(s)?;
                (EnPassant::on(square), rest)
            }
        };

        let (halfmove_clock, s) = counter::<u16>(s, "halfmove clock")?.unwrap_or((0, s));
        let (fullmove_number, s) = counter::<u32>(s, "fullmove number")?.unwrap_or((1, s));
        if fullmove_number > MAX_FULLMOVE_NUMBER {
            return Err(FenError::CounterOutOfRange("fullmove number"));
        }

        Ok((
            Self {
                board,
                side_to_move,
                castling_rights,
                en_passant,
                halfmove_clock,
                fullmove_number,
            },
            s,
        ))
    }
}
impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (fen, rest) = Self::partial_from_str(s)?;
        match walk_whitespace(rest).chars().next() {
            None => Ok(fen),
            Some(val) => Err(FenError::UnexpectedToken {
                section: "move counters",
                val,
            }),
        }
    }
}
impl std::fmt::Display for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut skip = 0;
        for sq in Square::squares_fen_iter() {
            if let Some(piece) = self.board.piece_on(sq) {
                if skip != 0 {
                    write!(f, "{skip}")?;
                    skip = 0
                }
                write!(f, "{piece}")?
            } else {
                skip += 1
            }

            if sq.file() == File::H {
                if skip != 0 {
                    write!(f, "{skip}")?;
                    skip = 0;
                }
                if sq.rank() != Rank::One {
                    write!(f, "/")?
                }
            }
        }

        write!(
            f,
            " {} {} {} {} {}",
            if self.side_to_move.is_black() {
                'b'
            } else {
                'w'
            },
            self.castling_rights,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
