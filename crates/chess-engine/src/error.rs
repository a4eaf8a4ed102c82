//! Errors reported by the rules engine.

use chess_core::{Color, FenError, Square, SquareError};
use thiserror::Error;

/// Why a move, a validation or a promotion request was refused.
///
/// A refused request never mutates the position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{mover} cannot move: it is {turn}'s turn")]
    OutOfTurn { mover: Color, turn: Color },

    #[error("{to} is not a destination for the piece on {from}")]
    IllegalDestination { from: Square, to: Square },

    #[error("no piece on {0}")]
    NoPieceAtSquare(Square),

    #[error(transparent)]
    OutOfBounds(#[from] SquareError),

    #[error("invalid promotion kind: {0:?}")]
    InvalidPromotionKind(String),

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("the promotion on {0} must be resolved first")]
    PromotionPending(Square),
}

/// Errors from [`Game`](crate::Game) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),
}
