//! Interface to legal move generation.
//!
//! This crate does not generate moves. Engines plug their own generator in
//! through [`MoveGenerator`], and [`Position::apply`](super::position::Position::apply)
//! trusts whatever it produces to be legal.

use super::{action::MoveList, position::Position};

/// Produces the legal moves of a position.
///
/// Implementations must only return moves that are legal for the side to move:
/// positions never check the moves they are given.
pub trait MoveGenerator {
    /// Generates every legal move in `position`.
    fn generate(&self, position: &Position) -> MoveList;
}

impl<F> MoveGenerator for F
where
    F: Fn(&Position) -> MoveList,
{
    fn generate(&self, position: &Position) -> MoveList {
        self(position)
    }
}
