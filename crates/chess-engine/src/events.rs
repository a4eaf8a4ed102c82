//! Notable side effects of executed moves.
//!
//! Every executed move lists its events in its [`MoveReport`](crate::MoveReport);
//! [`Game`](crate::Game) additionally forwards them to subscribers. Each event
//! is also emitted through `tracing`.

use crate::position::CastleSide;
use chess_core::{Color, Piece, Square};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    /// A piece was taken off `square`.
    Capture {
        square: Square,
        piece: Piece,
        en_passant: bool,
    },
    /// A king castled and its rook was relocated.
    Castle { color: Color, side: CastleSide },
    /// A pawn reached its last rank and awaits a promotion choice.
    PromotionPending { square: Square },
    /// A pending promotion was resolved into `piece`.
    Promoted { square: Square, piece: Piece },
    /// After the move, `color` (the side to move) is in check.
    Check { color: Color },
}

impl MoveEvent {
    /// Emits this event as a `tracing` event.
    pub(crate) fn trace(&self) {
        match self {
            MoveEvent::Check { color } => tracing::info!(%color, "check"),
            other => tracing::debug!(event = %other, "move event"),
        }
    }
}

impl fmt::Display for MoveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveEvent::Capture {
                square,
                piece,
                en_passant,
            } => {
                write!(f, "{} captured on {}", piece, square)?;
                if *en_passant {
                    write!(f, " en passant")?;
                }
                Ok(())
            }
            MoveEvent::Castle { color, side } => write!(f, "{} castled {:?}", color, side),
            MoveEvent::PromotionPending { square } => write!(f, "promotion pending on {}", square),
            MoveEvent::Promoted { square, piece } => write!(f, "promoted to {} on {}", piece, square),
            MoveEvent::Check { color } => write!(f, "{} is in check", color),
        }
    }
}
