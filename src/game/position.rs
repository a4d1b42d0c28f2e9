//! Main API to represent and advance a chess position.
//!
//! A [`Position`] is a plain value: a [`Board`], the side to move, castling and
//! en passant rights, and two move counters. Its fields are private so that the
//! only way to change it is [`Position::apply`], which keeps the derived state
//! (rights, counters, turn) in step with the pieces.

use std::str::FromStr;

use super::{
    action::{Move, MoveList},
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    en_passant::EnPassant,
    fen::{Fen, FenError, MAX_FULLMOVE_NUMBER},
    movegen::MoveGenerator,
    piece::{Piece, PieceKind},
    square::{Delta, Rank, Square},
};

/// Plies without a capture or pawn move after which either player may claim a draw.
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;
/// Plies without a capture or pawn move after which the game is drawn outright.
pub const SEVENTY_FIVE_MOVE_RULE_PLIES: u16 = 150;

/// A chess game state: piece placement plus everything needed to continue the
/// game from it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    board: Board,

    // Metadata
    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: EnPassant,
    // Plies since the start of the game.
    plies: u32,
    // Plies since the last capture or pawn move.
    halfmove_clock: u16,
}
impl Default for Position {
    /// A position with no pieces.
    fn default() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Colour::White,
            castling_rights: CastlingRights::none(),
            en_passant: EnPassant::none(),
            plies: 0,
            halfmove_clock: 0,
        }
    }
}
impl Position {
    /// A position with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The initial position of Chess.
    /// # Example
    /// ```
    /// # use horsey_position::game::{colour::Colour, position::Position, castling_rights::CastlingRights};
    /// let position = Position::initial();
    /// assert_eq!(position.side_to_move(), Colour::White);
    /// assert_eq!(position.castling_rights(), CastlingRights::full());
    /// assert_eq!(position.plies(), 0);
    /// ```
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            castling_rights: CastlingRights::full(),
            ..Self::default()
        }
    }

    /// Assembles a position from its parts.
    ///
    /// Nothing is checked: rights that do not match the board (a castling right
    /// without the king and rook in place, say) are kept as given.
    pub fn from_parts(
        board: Board,
        side_to_move: Colour,
        castling_rights: CastlingRights,
        en_passant: EnPassant,
        plies: u32,
        halfmove_clock: u16,
    ) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
            plies,
            halfmove_clock,
        }
    }

    /// Creates a position from a parsed FEN string.
    ///
    /// A fullmove number of 0 is read as 1. Numbers above
    /// [`MAX_FULLMOVE_NUMBER`] are rejected by the parser, and clamped to it
    /// here for hand-built records.
    pub fn from_fen(fen: &Fen) -> Self {
        let fullmoves_played = fen.fullmove_number.clamp(1, MAX_FULLMOVE_NUMBER) - 1;
        let plies = fullmoves_played * 2 + fen.side_to_move.is_black() as u32;
        log::debug!("Setting up position from FEN {fen}");

        Self::from_parts(
            fen.board,
            fen.side_to_move,
            fen.castling_rights,
            fen.en_passant,
            plies,
            fen.halfmove_clock,
        )
    }

    /// Returns a FEN record describing the position.
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number(),
        }
    }

    /// The placement of all pieces.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece present on a given square if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board.piece_on(square)
    }

    /// Returns the current side to move.
    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant(&self) -> EnPassant {
        self.en_passant
    }

    /// Number of plies played since the start of the game.
    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Number of plies since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    /// The full move number as written in FEN, starting at 1 and incremented
    /// after each black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.plies / 2 + 1
    }

    /// Plays `mv` on the board, updating rights, counters and the side to move.
    ///
    /// The kind of move is inferred from the position: a king moving two files
    /// from its starting square castles, a pawn landing on the en passant square
    /// captures en passant, a pawn advancing two ranks from its starting rank
    /// opens an en passant right, and so on.
    ///
    /// # Contract
    /// `mv` is trusted to be legal, typically because it came from a
    /// [`MoveGenerator`]. No legality check is performed. An illegal move leaves
    /// the position in a deterministic but meaningless state. A move whose
    /// origin square is empty moves nothing, yet still advances the counters
    /// and hands the turn over.
    pub fn apply(&mut self, mv: Move) {
        let Move {
            origin,
            target,
            promotion,
        } = mv;
        let us = self.side_to_move;
        log::trace!("{us} plays {mv}");

        let Some(moving) = self.board.piece_on(origin) else {
            log::warn!("{us} plays {mv} from an empty square");
            self.en_passant.clear();
            self.end_ply(false);
            return;
        };

        // Classify the move before touching the board.
        let is_pawn_move = moving.kind == PieceKind::Pawn;
        let is_en_passant = is_pawn_move && self.en_passant.exists_at(target);
        let is_capture = is_en_passant || self.board.is_occupied(target);
        let is_double_push = is_pawn_move
            && origin.rank() == Self::pawn_start_rank(us)
            && origin.rank_distance(target) == 2;
        let castling_rook = if moving.kind == PieceKind::King
            && origin == Self::king_start_square(us)
            && origin.rank() == target.rank()
        {
            Self::castling_rook_move(target)
        } else {
            None
        };

        // The captured pawn sits right behind the en passant square.
        if is_en_passant {
            if let Some(captured) = target.translate(Delta::forward(us).inverse()) {
                self.board.clear(captured)
            }
        }

        if moving.kind == PieceKind::King {
            self.castling_rights.clear_colour(us)
        }
        // Whatever leaves or lands on a corner, that corner's rook can no
        // longer castle.
        for square in [origin, target] {
            if let Some(right) = CastlingRights::of_corner(square) {
                self.castling_rights.remove(right)
            }
        }

        self.en_passant.clear();
        if is_double_push {
            if let Some(skipped) = origin.translate(Delta::forward(us)) {
                self.en_passant.set(skipped)
            }
        }

        if let Some((rook_origin, rook_target)) = castling_rook {
            self.board
                .move_piece(Piece::new(PieceKind::Rook, us), rook_origin, rook_target)
        }
        self.board.move_piece(moving, origin, target);
        if let Some(promotion) = promotion {
            self.board.set(Piece::new(promotion.into(), us), target)
        }

        self.end_ply(is_capture || is_pawn_move);
    }

    /// Returns the position reached by playing `mv`, leaving this one untouched.
    ///
    /// See [`Position::apply`] for the contract on `mv`.
    #[must_use]
    pub fn applied(&self, mv: Move) -> Self {
        let mut next = *self;
        next.apply(mv);
        next
    }

    /// Advances the counters and hands the turn to the other side.
    #[inline]
    fn end_ply(&mut self, irreversible: bool) {
        self.plies = self.plies.saturating_add(1);
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        self.side_to_move.invert();
    }

    /// Checks if either player may claim a draw under the fifty-move rule.
    pub fn fifty_move_rule_claimable(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_RULE_PLIES
    }

    /// Checks if the game is over under the seventy-five-move rule.
    pub fn seventy_five_move_rule(&self) -> bool {
        self.halfmove_clock >= SEVENTY_FIVE_MOVE_RULE_PLIES
    }

    /// Lists the moves that may be played in this position.
    ///
    /// Once the seventy-five-move rule ends the game the list is empty;
    /// otherwise it is whatever `generator` produces.
    pub fn legal_moves<G: MoveGenerator + ?Sized>(&self, generator: &G) -> MoveList {
        if self.seventy_five_move_rule() {
            return MoveList::new();
        }
        generator.generate(self)
    }

    /// Returns the rank pawns of the given colour start on.
    #[inline(always)]
    const fn pawn_start_rank(colour: Colour) -> Rank {
        if colour.is_black() {
            Rank::Seven
        } else {
            Rank::Two
        }
    }

    /// Returns the square the king of the given colour starts on.
    #[inline(always)]
    const fn king_start_square(colour: Colour) -> Square {
        if colour.is_black() {
            Square::E8
        } else {
            Square::E1
        }
    }

    /// Returns the origin and target of the rook when a king castles onto
    /// `king_target`, or `None` if no castling move lands there.
    #[inline(always)]
    const fn castling_rook_move(king_target: Square) -> Option<(Square, Square)> {
        match king_target {
            Square::G1 => Some((Square::H1, Square::F1)),
            Square::C1 => Some((Square::A1, Square::D1)),
            Square::G8 => Some((Square::H8, Square::F8)),
            Square::C8 => Some((Square::A8, Square::D8)),
            _ => None,
        }
    }
}
impl From<Fen> for Position {
    fn from(value: Fen) -> Self {
        Self::from_fen(&value)
    }
}
impl From<&Fen> for Position {
    fn from(value: &Fen) -> Self {
        Self::from_fen(value)
    }
}
impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Fen>().map(Self::from)
    }
}
impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, rank) in Rank::iter().rev().enumerate() {
            write!(f, "{rank} ")?;
            for sq in rank.bitboard().squares() {
                match self.piece_on(sq) {
                    Some(p) => write!(f, "{p} ")?,
                    None => write!(f, ". ")?,
                }
            }
            match r {
                3 => writeln!(f, "   side to move: {}", self.side_to_move),
                4 => writeln!(f, "   halfmove clock: {}", self.halfmove_clock),
                5 => writeln!(f, "   en passant: {}", self.en_passant),
                6 => writeln!(f, "   castling rights: {}", self.castling_rights),
                7 => writeln!(f, "   plies: {}", self.plies),
                _ => writeln!(f),
            }?
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "\nfen: {}", self.fen())
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::piece::PromotionTarget;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn position(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn initial_state() {
        let pos = Position::initial();
        assert_eq!(*pos.board(), Board::initial());
        assert_eq!(pos.side_to_move(), Colour::White);
        assert_eq!(pos.castling_rights(), CastlingRights::full());
        assert!(!pos.en_passant().exists());
        assert_eq!(pos.plies(), 0);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn double_push_opens_en_passant() {
        let mut pos = Position::initial();
        pos.apply(mv("e2e4"));
        assert_eq!(pos.en_passant().square(), Some(Square::E3));
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.plies(), 1);
        assert_eq!(pos.side_to_move(), Colour::Black);
        assert_eq!(
            pos.piece_on(Square::E4),
            Some(Piece::new(PieceKind::Pawn, Colour::White))
        );
        assert_eq!(pos.piece_on(Square::E2), None);

        pos.apply(mv("e7e5"));
        assert_eq!(pos.en_passant().square(), Some(Square::E6));
        pos.apply(mv("g1f3"));
        assert!(!pos.en_passant().exists());
        assert_eq!(pos.halfmove_clock(), 1);
        assert_eq!(pos.fullmove_number(), 2);
    }

    #[test]
    fn single_push_does_not_open_en_passant() {
        let pos = Position::initial().applied(mv("d2d3"));
        assert!(!pos.en_passant().exists());
        assert_eq!(pos.halfmove_clock(), 0);
    }

    #[test]
    fn kingside_castle_moves_rook() {
        let mut pos = position("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 3 10");
        pos.apply(mv("e1g1"));
        assert_eq!(
            pos.piece_on(Square::G1),
            Some(Piece::new(PieceKind::King, Colour::White))
        );
        assert_eq!(
            pos.piece_on(Square::F1),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert_eq!(pos.piece_on(Square::H1), None);
        assert_eq!(pos.piece_on(Square::E1), None);
        assert!(!pos.castling_rights().has_any(CastlingRights::WHITE));
        assert!(pos.castling_rights().has_all(CastlingRights::BLACK));
        assert_eq!(pos.side_to_move(), Colour::Black);
        assert_eq!(pos.halfmove_clock(), 4);
    }

    #[test]
    fn queenside_castle_moves_rook() {
        let mut pos = position("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1");
        pos.apply(mv("e8c8"));
        assert_eq!(
            pos.piece_on(Square::C8),
            Some(Piece::new(PieceKind::King, Colour::Black))
        );
        assert_eq!(
            pos.piece_on(Square::D8),
            Some(Piece::new(PieceKind::Rook, Colour::Black))
        );
        assert_eq!(pos.piece_on(Square::A8), None);
        assert_eq!(pos.castling_rights(), CastlingRights::WHITE);
    }

    #[test]
    fn white_queenside_castle_moves_rook() {
        let mut pos = position("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        pos.apply(mv("e1c1"));
        assert_eq!(
            pos.piece_on(Square::C1),
            Some(Piece::new(PieceKind::King, Colour::White))
        );
        assert_eq!(
            pos.piece_on(Square::D1),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert_eq!(pos.piece_on(Square::A1), None);
        assert_eq!(pos.piece_on(Square::E1), None);
        assert_eq!(pos.castling_rights(), CastlingRights::BLACK);
    }

    #[test]
    fn black_kingside_castle_moves_rook() {
        let mut pos = position("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 2 7");
        pos.apply(mv("e8g8"));
        assert_eq!(
            pos.piece_on(Square::G8),
            Some(Piece::new(PieceKind::King, Colour::Black))
        );
        assert_eq!(
            pos.piece_on(Square::F8),
            Some(Piece::new(PieceKind::Rook, Colour::Black))
        );
        assert_eq!(pos.piece_on(Square::H8), None);
        assert_eq!(pos.piece_on(Square::E8), None);
        assert_eq!(pos.castling_rights(), CastlingRights::WHITE);
        assert_eq!(pos.halfmove_clock(), 3);
        assert_eq!(pos.fullmove_number(), 8);
        assert!(pos.board().is_consistent());
    }

    #[test]
    fn king_step_is_not_a_castle() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        pos.apply(mv("e1f1"));
        assert_eq!(
            pos.piece_on(Square::H1),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
        assert_eq!(pos.castling_rights(), CastlingRights::BLACK);
    }

    #[test]
    fn en_passant_capture_removes_pawn() {
        let mut pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        pos.apply(mv("e5d6"));
        assert_eq!(pos.piece_on(Square::D5), None);
        assert_eq!(
            pos.piece_on(Square::D6),
            Some(Piece::new(PieceKind::Pawn, Colour::White))
        );
        assert_eq!(pos.halfmove_clock(), 0);
        assert!(!pos.en_passant().exists());
        assert_eq!(pos.board().colour_bitboard(Colour::Black).cardinality(), 1);
    }

    #[test]
    fn black_en_passant_capture() {
        let mut pos = position("4k3/8/8/8/2Pp4/8/8/4K3 b - c3 0 1");
        pos.apply(mv("d4c3"));
        assert_eq!(pos.piece_on(Square::C4), None);
        assert_eq!(
            pos.piece_on(Square::C3),
            Some(Piece::new(PieceKind::Pawn, Colour::Black))
        );
    }

    #[test]
    fn capturing_on_corner_revokes_right() {
        let mut pos = position("r3k3/8/8/8/8/8/8/R3K3 w Qq - 5 20");
        pos.apply(mv("a1a8"));
        assert!(!pos.castling_rights().has_any(CastlingRights::BLACK_QUEENSIDE));
        assert!(!pos.castling_rights().has_any(CastlingRights::WHITE_QUEENSIDE));
        assert_eq!(pos.castling_rights(), CastlingRights::none());
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(
            pos.piece_on(Square::A8),
            Some(Piece::new(PieceKind::Rook, Colour::White))
        );
    }

    #[test]
    fn rook_leaving_corner_revokes_right() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        pos.apply(mv("h1h5"));
        assert_eq!(
            pos.castling_rights(),
            CastlingRights::WHITE_QUEENSIDE | CastlingRights::BLACK
        );
        assert_eq!(pos.halfmove_clock(), 1);
    }

    #[test]
    fn promotion_replaces_pawn() {
        let mut pos = position("1n2k3/P7/8/8/8/8/8/4K3 w - - 7 40");
        pos.apply(Move::new_promotion(
            Square::A7,
            Square::B8,
            PromotionTarget::Knight,
        ));
        assert_eq!(
            pos.piece_on(Square::B8),
            Some(Piece::new(PieceKind::Knight, Colour::White))
        );
        assert_eq!(pos.piece_on(Square::A7), None);
        assert_eq!(pos.halfmove_clock(), 0);
        assert!(pos.board().is_consistent());

        pos.apply(mv("e8d7"));
        pos.apply(mv("e1e2"));
        assert_eq!(pos.halfmove_clock(), 2);
    }

    #[test]
    fn empty_origin_only_advances_counters() {
        let before = Position::initial().applied(mv("e2e4"));
        let after = before.applied(mv("d4d5"));
        assert_eq!(after.board(), before.board());
        assert_eq!(after.plies(), 2);
        assert_eq!(after.halfmove_clock(), 1);
        assert_eq!(after.side_to_move(), Colour::White);
        assert!(!after.en_passant().exists());
    }

    #[test]
    fn seventy_five_move_rule_empties_move_list() {
        let generator = |_: &Position| {
            let mut moves = MoveList::new();
            moves.push(Move::new(Square::E1, Square::E2)).unwrap();
            moves
        };

        let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 149 120");
        assert!(pos.fifty_move_rule_claimable());
        assert!(!pos.seventy_five_move_rule());
        assert_eq!(pos.legal_moves(&generator).len(), 1);

        let pos = pos.applied(mv("e1e2"));
        assert!(pos.seventy_five_move_rule());
        assert!(pos.legal_moves(&generator).is_empty());
    }

    #[test]
    fn large_fullmove_numbers_round_trip() {
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 40000";
        let mut pos = position(fen);
        assert_eq!(pos.plies(), 79998);
        assert_eq!(pos.fen().to_string(), fen);

        pos.apply(mv("e1e2"));
        assert_eq!(pos.plies(), 79999);
        pos.apply(mv("e8e7"));
        assert_eq!(pos.plies(), 80000);
        assert_eq!(pos.fullmove_number(), 40001);

        let pos = position("4k3/8/8/8/8/8/8/4K3 b - - 0 1073741824");
        assert_eq!(pos.plies(), 2 * MAX_FULLMOVE_NUMBER - 1);
        assert_eq!(pos.fullmove_number(), MAX_FULLMOVE_NUMBER);
        let pos = pos.applied(mv("e8e7"));
        assert_eq!(pos.plies(), 2 * MAX_FULLMOVE_NUMBER);
        assert_eq!(pos.fullmove_number(), MAX_FULLMOVE_NUMBER + 1);
    }

    #[test]
    fn fen_counters_map_to_plies() {
        let pos = position("4k3/8/8/8/8/8/8/4K3 b - - 0 3");
        assert_eq!(pos.plies(), 5);
        assert_eq!(pos.fullmove_number(), 3);
        assert_eq!(
            pos.fen().to_string(),
            "4k3/8/8/8/8/8/8/4K3 b - - 0 3"
        );
    }
}
