//! Attack detection built on the move generator.

use super::{generate_moves, KING_STEPS};
use crate::Position;
use chess_core::{Color, PieceKind, Square};

/// Returns true if some piece of the side opposing `defender` has `square`
/// among its pseudo-legal destinations.
///
/// Full-board scan: every opposing piece generates its moves once.
pub fn is_attacked(position: &Position, square: Square, defender: Color) -> bool {
    position
        .pieces_of(defender.opposite())
        .any(|(from, _)| generate_moves(position, from).contains(square))
}

/// Returns true if `color`'s king stands on an attacked square.
///
/// A side without a king is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    position
        .find_king(color)
        .is_some_and(|king| is_attacked(position, king, color))
}

/// Returns true if the piece on `from` could capture on `target` were an
/// enemy piece standing there.
///
/// Unlike destination sets, this counts pawn diagonals whatever their
/// occupancy and leaves out pawn advances and castling, so it also answers
/// for empty squares.
pub fn threatens(position: &Position, from: Square, target: Square) -> bool {
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    match piece.kind {
        PieceKind::Pawn => [-1, 1]
            .into_iter()
            .any(|dc| from.offset(piece.color.pawn_direction(), dc) == Some(target)),
        PieceKind::King => KING_STEPS
            .iter()
            .any(|&(dr, dc)| from.offset(dr, dc) == Some(target)),
        _ => generate_moves(position, from).contains(target),
    }
}

/// Returns true if any piece opposing `defender` threatens `square`.
pub(crate) fn is_threatened(position: &Position, square: Square, defender: Color) -> bool {
    position
        .pieces_of(defender.opposite())
        .any(|(from, _)| threatens(position, from, square))
}
