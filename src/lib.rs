//! # Horsey position
//! A compact chess position model built on bitboards.
//!
//! [`Position`](game::position::Position) holds the pieces, the side to move,
//! castling and en passant rights and the move counters, and advances them
//! with [`Position::apply`](game::position::Position::apply). Move generation
//! is left to the caller through [`MoveGenerator`](game::movegen::MoveGenerator).
//!
//! It is usable as both a library to embed into your own projects and a small
//! standalone binary to inspect positions and play moves on them.

pub mod game;
pub mod parsing;

#[cfg(test)]
mod tests;
