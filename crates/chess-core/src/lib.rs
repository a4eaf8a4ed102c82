//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! collaborators:
//! - [`Square`] for board coordinates (row 0 is Black's back rank)
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Move`] for a start/end square pair
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use mov::Move;
pub use piece::{ParsePieceError, Piece, PieceKind};
pub use square::{Square, SquareError};
