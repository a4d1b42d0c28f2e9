use rand::{rngs::SmallRng, seq::IteratorRandom, Rng, SeedableRng};

use crate::game::{
    action::Move,
    castling_rights::CastlingRights,
    colour::Colour,
    fen::STARTING_FEN,
    piece::{Piece, PieceKind, PromotionTarget},
    position::Position,
    square::{File, Rank, Square},
};

fn play(position: &mut Position, moves: &str) {
    for mv in moves.split_whitespace() {
        position.apply(mv.parse().unwrap())
    }
}

#[test]
fn npo_for_enums() {
    use std::mem::size_of;
    assert_eq!(size_of::<PieceKind>(), size_of::<Option<PieceKind>>());
    assert_eq!(size_of::<File>(), size_of::<Option<File>>());
    assert_eq!(size_of::<Rank>(), size_of::<Option<Rank>>());
    assert_eq!(size_of::<Square>(), size_of::<Option<Square>>());
    assert_eq!(
        size_of::<PromotionTarget>(),
        size_of::<Option<PromotionTarget>>()
    );
}

#[test]
fn initial_position_round_trips_through_fen() {
    let position = Position::initial();
    assert_eq!(position.fen().to_string(), STARTING_FEN);
    assert_eq!(STARTING_FEN.parse::<Position>().unwrap(), position);
}

#[test]
fn italian_opening_with_castling() {
    let mut position = Position::initial();
    play(&mut position, "e2e4 e7e5 g1f3 b8c6 f1c4 f8c5 e1g1");
    assert_eq!(
        position.fen().to_string(),
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
    );
    assert_eq!(position.plies(), 7);
    assert!(position.board().is_consistent());
}

#[test]
fn en_passant_right_lasts_one_ply() {
    let mut position = Position::initial();
    play(&mut position, "e2e4 g8f6 e4e5 d7d5");
    assert_eq!(
        position.fen().to_string(),
        "rnbqkb1r/ppp1pppp/5n2/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
    );

    let captured = position.applied("e5d6".parse().unwrap());
    assert_eq!(
        captured.fen().to_string(),
        "rnbqkb1r/ppp1pppp/3P1n2/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
    );

    // Declining the capture forfeits it.
    let declined = position.applied("b1c3".parse().unwrap());
    assert!(!declined.en_passant().exists());
    assert_eq!(declined.piece_on(Square::D5), position.piece_on(Square::D5));
}

#[test]
fn promotion_capture_on_corner() {
    let mut position: Position = "r3k3/1P6/8/8/8/8/8/4K3 w q - 3 30".parse().unwrap();
    position.apply(Move::new_promotion(
        Square::B7,
        Square::A8,
        PromotionTarget::Queen,
    ));
    assert_eq!(
        position.piece_on(Square::A8),
        Some(Piece::new(PieceKind::Queen, Colour::White))
    );
    assert_eq!(position.castling_rights(), CastlingRights::none());
    assert_eq!(position.halfmove_clock(), 0);
    assert_eq!(position.fen().to_string(), "Q3k3/8/8/8/8/8/8/4K3 b - - 0 30");
}

#[test]
fn applied_leaves_original_untouched() {
    let before = Position::initial();
    let after = before.applied("g1f3".parse().unwrap());
    assert_eq!(before, Position::initial());
    assert_ne!(before, after);
    assert_eq!(after.halfmove_clock(), 1);
}

/// Picks a random move for the side to move, ignoring legality but never
/// landing on one of its own pieces.
fn random_move(position: &Position, rng: &mut SmallRng) -> Option<Move> {
    let us = position.side_to_move();
    let ours = position.board().colour_bitboard(us);
    let origin = ours.squares().choose(rng)?;
    let target = Square::squares_iter()
        .filter(|&sq| !ours.is_set(sq))
        .choose(rng)?;

    let is_pawn = position.board().piece_kind(origin) == Some(PieceKind::Pawn);
    let last_rank = if us.is_white() { Rank::Eight } else { Rank::One };
    if is_pawn && target.rank() == last_rank {
        let promotion = PromotionTarget::ALL[rng.gen_range(0..PromotionTarget::ALL.len())];
        Some(Move::new_promotion(origin, target, promotion))
    } else {
        Some(Move::new(origin, target))
    }
}

#[test]
fn random_play_keeps_invariants() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for _ in 0..64 {
        let mut position = Position::initial();
        for _ in 0..200 {
            let Some(mv) = random_move(&position, &mut rng) else {
                break;
            };
            let before = position;
            position.apply(mv);

            let us = before.side_to_move();
            let moving = before.board().piece_kind(mv.origin);
            let is_pawn = moving == Some(PieceKind::Pawn);
            let is_capture = before.board().is_occupied(mv.target)
                || (is_pawn && before.en_passant().exists_at(mv.target));
            let start_rank = if us.is_white() { Rank::Two } else { Rank::Seven };
            let is_double_push = is_pawn
                && mv.origin.rank() == start_rank
                && mv.origin.rank_distance(mv.target) == 2;

            assert!(position.board().is_consistent(), "{before:?}\n{mv}");
            assert_eq!(position.plies(), before.plies() + 1);
            assert_eq!(position.side_to_move(), us.inverse());
            assert_eq!(position.piece_on(mv.origin), None);
            assert_eq!(
                position.board().piece_colour(mv.target),
                Some(us),
                "{before:?}\n{mv}"
            );
            assert!(before.castling_rights().has_all(position.castling_rights()));
            assert_eq!(position.en_passant().exists(), is_double_push);
            if is_pawn || is_capture {
                assert_eq!(position.halfmove_clock(), 0);
            } else {
                assert_eq!(position.halfmove_clock(), before.halfmove_clock() + 1);
            }
            assert!(
                position.board().colour_bitboard(us.inverse()).cardinality()
                    <= before.board().colour_bitboard(us.inverse()).cardinality()
            );
        }
    }
}

#[test]
fn random_play_survives_fen_round_trip() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut position = Position::initial();
    for _ in 0..300 {
        let Some(mv) = random_move(&position, &mut rng) else {
            break;
        };
        position.apply(mv);

        let fen = position.fen().to_string();
        let reparsed: Position = fen.parse().unwrap();
        assert_eq!(reparsed, position, "{fen}");
    }
}
