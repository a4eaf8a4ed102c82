//! Move generation.
//!
//! [`generate_moves`] produces pseudo-legal destinations: squares a piece can
//! reach under its movement geometry without landing on a friendly piece.
//! Whether the mover's own king is safe afterwards is not considered here;
//! [`generate_legal_moves`] adds that filter for callers that want it.

mod attacks;

pub use attacks::{is_attacked, is_in_check, threatens};

use crate::config::Legality;
use crate::position::CastleSide;
use crate::{Position, SquareSet};
use chess_core::{Color, Move, Piece, PieceKind, Square};

/// One-step offsets to the eight neighbouring squares.
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Knight jumps: one coordinate changes by 1, the other by 2.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns the pseudo-legal destinations of the piece on `from`.
///
/// An empty square yields an empty set.
pub fn generate_moves(position: &Position, from: Square) -> SquareSet {
    let Some(piece) = position.piece_at(from) else {
        return SquareSet::EMPTY;
    };

    match piece.kind {
        PieceKind::King => king_moves(position, from, piece.color),
        PieceKind::Queen => {
            slider_moves(position, from, piece.color, &ROOK_DIRECTIONS)
                | slider_moves(position, from, piece.color, &BISHOP_DIRECTIONS)
        }
        PieceKind::Rook => slider_moves(position, from, piece.color, &ROOK_DIRECTIONS),
        PieceKind::Bishop => slider_moves(position, from, piece.color, &BISHOP_DIRECTIONS),
        PieceKind::Knight => step_moves(position, from, piece.color, &KNIGHT_JUMPS),
        PieceKind::Pawn => pawn_moves(position, from, piece.color),
    }
}

/// Returns the destinations of the piece on `from` under the given legality.
///
/// In strict mode, destinations that leave the mover's king attacked are
/// dropped, and castling is refused while the king is in check or when it
/// would cross an attacked square.
pub fn generate_legal_moves(position: &Position, from: Square, legality: Legality) -> SquareSet {
    let mut moves = generate_moves(position, from);
    if legality == Legality::PseudoLegal {
        return moves;
    }

    let Some(piece) = position.piece_at(from) else {
        return moves;
    };

    moves.retain(|to| {
        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            if attacks::is_threatened(position, from, piece.color) {
                return false;
            }
            let step = if to.col() > from.col() { 1 } else { -1 };
            let crossed = from.offset(0, step);
            if crossed.is_some_and(|sq| attacks::is_threatened(position, sq, piece.color)) {
                return false;
            }
        }

        let mut after = position.clone();
        after.apply_move(from, to, piece);
        !is_in_check(&after, piece.color)
    });
    moves
}

/// Collects every move available to `color`, in row-major order of the
/// moving piece.
pub fn all_moves(position: &Position, color: Color, legality: Legality) -> Vec<Move> {
    position
        .pieces_of(color)
        .flat_map(|(from, _)| {
            generate_legal_moves(position, from, legality)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Adjacent squares plus castling destinations.
///
/// Castling is offered on rights, empty intervening squares and a friendly
/// rook in the corner; attacked squares are not consulted here.
fn king_moves(position: &Position, from: Square, color: Color) -> SquareSet {
    let mut moves = step_moves(position, from, color, &KING_STEPS);

    let rights = position.castling_rights();
    let row = from.row() as i32;
    for side in CastleSide::BOTH {
        if !rights.has(color, side) {
            continue;
        }
        let path_clear = side
            .between_cols()
            .iter()
            .all(|&col| square_at(row, col).is_some_and(|sq| position.piece_at(sq).is_none()));
        let rook_home = square_at(row, side.rook_col())
            .and_then(|sq| position.piece_at(sq))
            .is_some_and(|rook| rook.is(color, PieceKind::Rook));
        if path_clear && rook_home {
            if let Some(target) = square_at(row, side.king_target_col()) {
                moves.insert(target);
            }
        }
    }

    moves
}

/// Fixed-offset moves (king steps, knight jumps).
fn step_moves(position: &Position, from: Square, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| !holds_color(position, to, color))
        .collect()
}

/// Ray casting: walk each direction until the edge or the first occupied
/// square, which is included only when it holds an opposing piece.
fn slider_moves(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match position.piece_at(next) {
                None => moves.insert(next),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.insert(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
    moves
}

fn pawn_moves(position: &Position, from: Square, color: Color) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if position.piece_at(one).is_none() {
            moves.insert(one);
            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if position.piece_at(two).is_none() {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(diagonal) = from.offset(dir, dc) else {
            continue;
        };
        let captures = position
            .piece_at(diagonal)
            .is_some_and(|target| target.color != color);
        // The en passant target is offered whatever its occupancy.
        if captures || position.en_passant_target() == Some(diagonal) {
            moves.insert(diagonal);
        }
    }

    moves
}

#[inline]
fn square_at(row: i32, col: u8) -> Option<Square> {
    Square::new(row, col as i32).ok()
}

#[inline]
fn holds_color(position: &Position, sq: Square, color: Color) -> bool {
    position
        .piece_at(sq)
        .is_some_and(|piece: Piece| piece.color == color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn set(squares: &[(i32, i32)]) -> SquareSet {
        squares.iter().map(|&(r, c)| sq(r, c)).collect()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        let pos = Position::startpos();
        let total: usize = pos
            .pieces_of(Color::White)
            .map(|(from, _)| generate_moves(&pos, from).len())
            .sum();
        assert_eq!(total, 20);
        assert_eq!(all_moves(&pos, Color::Black, Legality::PseudoLegal).len(), 20);
    }

    #[test]
    fn empty_square_has_no_moves() {
        let pos = Position::startpos();
        assert!(generate_moves(&pos, sq(4, 4)).is_empty());
    }

    #[test]
    fn pawn_single_and_double_advance() {
        let pos = Position::startpos();
        assert_eq!(generate_moves(&pos, sq(6, 4)), set(&[(5, 4), (4, 4)]));
        assert_eq!(generate_moves(&pos, sq(1, 3)), set(&[(2, 3), (3, 3)]));
    }

    #[test]
    fn pawn_blocked() {
        // White pawn e2 blocked on e3; black pawn d7 blocked two squares ahead.
        let pos = Position::from_fen("4k3/3p4/8/3n4/8/4N3/4P3/4K3 w - - 0 1").unwrap();
        assert!(generate_moves(&pos, sq(6, 4)).is_empty());
        assert_eq!(generate_moves(&pos, sq(1, 3)), set(&[(2, 3)]));
    }

    #[test]
    fn pawn_captures_only_opponents() {
        let pos = Position::from_fen("4k3/8/8/8/8/3p1P2/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(
            generate_moves(&pos, sq(6, 4)),
            set(&[(5, 4), (4, 4), (5, 3)])
        );
    }

    #[test]
    fn pawn_en_passant_target_offered() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let moves = generate_moves(&pos, sq(3, 4));
        assert!(moves.contains(sq(2, 3)));
        assert!(moves.contains(sq(2, 4)));
    }

    #[test]
    fn knight_jumps() {
        let pos = Position::startpos();
        assert_eq!(generate_moves(&pos, sq(7, 1)), set(&[(5, 0), (5, 2)]));

        let mut pos = Position::empty();
        pos.put(sq(4, 4), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(generate_moves(&pos, sq(4, 4)).len(), 8);
    }

    #[test]
    fn rook_rays_stop_at_blockers() {
        let pos = Position::from_fen("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1").unwrap();
        let moves = generate_moves(&pos, sq(4, 3));
        // Left: c4 then capture on b4, a4 unreachable.
        assert!(moves.contains(sq(4, 2)));
        assert!(moves.contains(sq(4, 1)));
        assert!(!moves.contains(sq(4, 0)));
        // Right: e4, f4, own pawn on g4 excluded.
        assert!(moves.contains(sq(4, 5)));
        assert!(!moves.contains(sq(4, 6)));
        assert!(!moves.contains(sq(4, 7)));
        // Full file.
        assert!(moves.contains(sq(0, 3)));
        assert!(moves.contains(sq(7, 3)));
        assert_eq!(moves.len(), 2 + 2 + 4 + 3);
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let mut pos = Position::empty();
        pos.put(sq(4, 3), Piece::new(Color::Black, PieceKind::Queen));
        assert_eq!(generate_moves(&pos, sq(4, 3)).len(), 27);
    }

    #[test]
    fn king_castling_candidates() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = generate_moves(&pos, Square::E1);
        assert!(moves.contains(Square::G1));
        assert!(moves.contains(Square::C1));

        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").unwrap();
        assert!(!generate_moves(&pos, Square::E1).contains(Square::G1));

        // Knight on b1 blocks queenside.
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1").unwrap();
        assert!(!generate_moves(&pos, Square::E1).contains(Square::C1));

        // Right set but the corner holds no rook.
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2N w KQkq - 0 1").unwrap();
        assert!(!generate_moves(&pos, Square::E1).contains(Square::G1));
    }

    #[test]
    fn pseudo_legal_castling_ignores_attacks() {
        // Black rook on f8 covers f1, the square the king crosses.
        let pos = Position::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(generate_moves(&pos, Square::E1).contains(Square::G1));
        assert!(!generate_legal_moves(&pos, Square::E1, Legality::Strict).contains(Square::G1));
    }

    #[test]
    fn strict_mode_drops_self_check() {
        // The e2 bishop is pinned by the rook on e8.
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(!generate_moves(&pos, sq(6, 4)).is_empty());
        assert!(generate_legal_moves(&pos, sq(6, 4), Legality::Strict).is_empty());
    }

    #[test]
    fn strict_mode_forbids_castling_out_of_check() {
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(generate_moves(&pos, Square::E1).contains(Square::G1));
        assert!(!generate_legal_moves(&pos, Square::E1, Legality::Strict).contains(Square::G1));
    }

    proptest! {
        #[test]
        fn rays_stop_at_first_blocker(
            from in 0u8..64,
            blockers in proptest::collection::vec((0u8..64, any::<bool>()), 0..12),
            kind in prop_oneof![
                Just(PieceKind::Rook),
                Just(PieceKind::Bishop),
                Just(PieceKind::Queen),
            ],
        ) {
            let from = Square::from_index(from).unwrap();
            let mut pos = Position::empty();
            for (index, white) in blockers {
                let color = if white { Color::White } else { Color::Black };
                pos.put(Square::from_index(index).unwrap(), Piece::new(color, PieceKind::Pawn));
            }
            pos.put(from, Piece::new(Color::White, kind));

            let moves = generate_moves(&pos, from);
            let directions: Vec<(i8, i8)> = match kind {
                PieceKind::Rook => ROOK_DIRECTIONS.to_vec(),
                PieceKind::Bishop => BISHOP_DIRECTIONS.to_vec(),
                _ => [ROOK_DIRECTIONS, BISHOP_DIRECTIONS].concat(),
            };

            let mut expected = 0;
            for (dr, dc) in directions {
                let mut blocked = false;
                let mut current = from;
                while let Some(next) = current.offset(dr, dc) {
                    if blocked {
                        prop_assert!(!moves.contains(next));
                    } else {
                        match pos.piece_at(next) {
                            None => {
                                prop_assert!(moves.contains(next));
                                expected += 1;
                            }
                            Some(p) => {
                                prop_assert_eq!(moves.contains(next), p.color == Color::Black);
                                if p.color == Color::Black {
                                    expected += 1;
                                }
                                blocked = true;
                            }
                        }
                    }
                    current = next;
                }
            }
            prop_assert_eq!(moves.len(), expected);
        }
    }
}
