//! # Chess API
//! Everything needed to describe a chess position and play moves on it:
//! squares and bitboards, pieces, the board, castling and en passant rights,
//! moves, FEN records and the position itself.

pub mod action;
pub mod bitboard;
pub mod board;
pub mod castling_rights;
pub mod colour;
pub mod en_passant;
pub mod fen;
pub mod movegen;
pub mod piece;
pub mod position;
pub mod square;
