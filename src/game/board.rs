//! Piece placement, stored as one bitboard per colour and one per piece kind.
//!
//! A square belongs to at most one colour bitboard and at most one kind
//! bitboard, and an occupied square is always a member of exactly one of each.
//! Every mutating operation goes through [`Board::clear`] first so that this
//! invariant cannot be broken from outside the module.

use super::{
    bitboard::Bitboard,
    colour::{Colour, NUM_COLOURS},
    piece::{Piece, PieceKind, NUM_PIECES},
    square::{File, Rank, Square},
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Occupancy of every piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    colours: [Bitboard; NUM_COLOURS],
    kinds: [Bitboard; NUM_PIECES],
}
impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            colours: [Bitboard::EMPTY; NUM_COLOURS],
            kinds: [Bitboard::EMPTY; NUM_PIECES],
        }
    }

    /// The standard starting arrangement: rooks, knights, bishops, queen and king
    /// on the back ranks, pawns on the second and seventh ranks.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (file, kind) in File::iter().zip(BACK_RANK) {
            board.set(
                Piece::new(kind, Colour::White),
                Square::new(file, Rank::One),
            );
            board.set(
                Piece::new(PieceKind::Pawn, Colour::White),
                Square::new(file, Rank::Two),
            );
            board.set(
                Piece::new(PieceKind::Pawn, Colour::Black),
                Square::new(file, Rank::Seven),
            );
            board.set(
                Piece::new(kind, Colour::Black),
                Square::new(file, Rank::Eight),
            );
        }
        board
    }

    /// Returns the colour of the piece on `square`, if any.
    #[inline]
    pub fn piece_colour(&self, square: Square) -> Option<Colour> {
        Colour::ALL
            .into_iter()
            .find(|&colour| self.colour_bitboard(colour).is_set(square))
    }

    /// Returns the kind of the piece on `square`, if any.
    #[inline]
    pub fn piece_kind(&self, square: Square) -> Option<PieceKind> {
        PieceKind::iter().find(|&kind| self.kind_bitboard(kind).is_set(square))
    }

    /// Returns the piece on `square`, if any.
    /// # Example
    /// ```
    /// # use horsey_position::game::{board::Board, colour::Colour, piece::*, square::Square};
    /// let board = Board::initial();
    /// assert_eq!(board.piece_on(Square::D8), Some(Piece::new(PieceKind::Queen, Colour::Black)));
    /// assert_eq!(board.piece_on(Square::D4), None);
    /// ```
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let colour = self.piece_colour(square)?;
        let kind = self.piece_kind(square)?;
        Some(Piece::new(kind, colour))
    }

    /// Checks if any piece sits on `square`.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied().is_set(square)
    }

    /// Places `piece` on `square`, replacing whatever stood there before.
    #[inline]
    pub fn set(&mut self, piece: Piece, square: Square) {
        self.clear(square);
        self.colours[piece.colour as usize].insert(square);
        self.kinds[piece.kind as usize].insert(square);
    }

    /// Moves `piece` from `origin` to `target`.
    ///
    /// Anything standing on `target` is removed. Callers that need to know what
    /// was captured must look it up before calling this.
    #[inline]
    pub fn move_piece(&mut self, piece: Piece, origin: Square, target: Square) {
        self.clear(origin);
        self.set(piece, target);
    }

    /// Removes the piece on `square`. Does nothing if the square is empty.
    #[inline]
    pub fn clear(&mut self, square: Square) {
        for bb in self.colours.iter_mut().chain(self.kinds.iter_mut()) {
            bb.remove(square)
        }
    }

    /// All squares occupied by a piece of the given colour.
    #[inline]
    pub fn colour_bitboard(&self, colour: Colour) -> Bitboard {
        self.colours[colour as usize]
    }

    /// All squares occupied by a piece of the given kind, of either colour.
    #[inline]
    pub fn kind_bitboard(&self, kind: PieceKind) -> Bitboard {
        self.kinds[kind as usize]
    }

    /// All squares occupied by the given piece.
    #[inline]
    pub fn piece_bitboard(&self, piece: Piece) -> Bitboard {
        self.colour_bitboard(piece.colour) & self.kind_bitboard(piece.kind)
    }

    /// All occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colours[Colour::White as usize] | self.colours[Colour::Black as usize]
    }

    /// Checks that every occupied square holds exactly one colour and one kind.
    pub fn is_consistent(&self) -> bool {
        let white = self.colour_bitboard(Colour::White);
        let black = self.colour_bitboard(Colour::Black);
        if white.intersects(black) {
            return false;
        }

        let mut seen = Bitboard::empty();
        for kind in self.kinds {
            if seen.intersects(kind) {
                return false;
            }
            seen |= kind;
        }
        seen == white | black
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank} ")?;
            for square in rank.bitboard().squares() {
                match self.piece_on(square) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?
        }
        write!(f, "  a b c d e f g h")
    }
}
