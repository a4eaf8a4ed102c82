//! Move execution.
//!
//! A submitted move is validated first (turn, then destination), and only a
//! move that passes every check touches the position. Side effects are then
//! applied in a fixed order: en passant capture, en passant target, pending
//! promotion, castling rook, castling rights; then the piece is relocated,
//! the turn flips and check is reported.

use crate::config::RulesConfig;
use crate::events::MoveEvent;
use crate::movegen::{generate_legal_moves, generate_moves, is_in_check};
use crate::position::CastleSide;
use crate::{MoveError, Position, SquareSet};
use chess_core::{Color, Move, Piece, PieceKind, Square};

/// What an executed move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub mov: Move,
    /// The piece that moved, as it stood on the start square.
    pub piece: Piece,
    /// The piece taken, if any (including en passant).
    pub captured: Option<Piece>,
    pub events: Vec<MoveEvent>,
}

impl MoveReport {
    /// True if the side now to move is in check.
    pub fn is_check(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, MoveEvent::Check { .. }))
    }

    /// True if the move left a pawn waiting for its promotion choice.
    pub fn is_promotion_pending(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, MoveEvent::PromotionPending { .. }))
    }
}

impl Position {
    /// Pseudo-legal destinations of the piece on `from`, for highlighting
    /// or search expansion.
    pub fn generate_moves(&self, from: Square) -> SquareSet {
        generate_moves(self, from)
    }

    /// Returns true if `color`'s king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(self, color)
    }

    /// Returns true if [`make_move`](Self::make_move) would accept the move.
    pub fn is_valid_move(&self, from: Square, to: Square) -> bool {
        self.is_valid_move_with(from, to, &RulesConfig::default())
    }

    /// Returns true if [`make_move_with`](Self::make_move_with) would accept
    /// the move under `config`.
    pub fn is_valid_move_with(&self, from: Square, to: Square, config: &RulesConfig) -> bool {
        self.validate_move(from, to, config).is_ok()
    }

    /// Checks a move without executing it, returning the moving piece.
    pub fn validate_move(
        &self,
        from: Square,
        to: Square,
        config: &RulesConfig,
    ) -> Result<Piece, MoveError> {
        if config.promotion_gating {
            if let Some(pending) = self.pending_promotion() {
                return Err(MoveError::PromotionPending(pending));
            }
        }

        let piece = self
            .piece_at(from)
            .ok_or(MoveError::NoPieceAtSquare(from))?;
        if piece.color != self.turn() {
            return Err(MoveError::OutOfTurn {
                mover: piece.color,
                turn: self.turn(),
            });
        }

        if !generate_legal_moves(self, from, config.legality).contains(to) {
            return Err(MoveError::IllegalDestination { from, to });
        }

        Ok(piece)
    }

    /// Executes a move under the default rules.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveReport, MoveError> {
        self.make_move_with(from, to, &RulesConfig::default())
    }

    /// Executes a move given as raw (row, col) pairs.
    pub fn make_move_coords(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<MoveReport, MoveError> {
        let from = Square::try_from(from)?;
        let to = Square::try_from(to)?;
        self.make_move(from, to)
    }

    /// Executes a move under `config`.
    ///
    /// On error the position is left untouched.
    pub fn make_move_with(
        &mut self,
        from: Square,
        to: Square,
        config: &RulesConfig,
    ) -> Result<MoveReport, MoveError> {
        let piece = match self.validate_move(from, to, config) {
            Ok(piece) => piece,
            Err(err) => {
                tracing::debug!(%from, %to, error = %err, "move rejected");
                return Err(err);
            }
        };

        let mut report = self.apply_move(from, to, piece);
        let side_to_move = self.turn();
        if is_in_check(self, side_to_move) {
            report.events.push(MoveEvent::Check {
                color: side_to_move,
            });
        }

        tracing::debug!(mov = %report.mov, %piece, fen = %self.to_fen(), "move applied");
        for event in &report.events {
            event.trace();
        }
        Ok(report)
    }

    /// Applies an already validated move. Never fails.
    ///
    /// Does not compute check, so strict move filtering can run it on
    /// scratch copies cheaply.
    pub(crate) fn apply_move(&mut self, from: Square, to: Square, piece: Piece) -> MoveReport {
        let color = piece.color;
        let is_pawn = piece.kind == PieceKind::Pawn;
        let mut events = Vec::new();
        let mut captured = None;

        // En passant: the captured pawn sits beside the start square.
        if is_pawn && self.en_passant_target() == Some(to) {
            if let Ok(victim_square) = Square::new(from.row() as i32, to.col() as i32) {
                if let Some(victim) = self.remove(victim_square) {
                    captured = Some(victim);
                    events.push(MoveEvent::Capture {
                        square: victim_square,
                        piece: victim,
                        en_passant: true,
                    });
                }
            }
        }

        let double_advance = is_pawn && from.row().abs_diff(to.row()) == 2;
        let skipped = if double_advance {
            Square::new((from.row() as i32 + to.row() as i32) / 2, from.col() as i32).ok()
        } else {
            None
        };
        self.set_en_passant(skipped);

        // A pawn left unpromoted (gating off) can be captured before it is resolved.
        if self.pending_promotion() == Some(to) {
            self.set_pending_promotion(None);
        }
        if is_pawn && to.row() == color.promotion_row() {
            self.set_pending_promotion(Some(to));
            events.push(MoveEvent::PromotionPending { square: to });
        }

        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            let side = if to.col() > from.col() {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            let row = from.row() as i32;
            let rook_from = Square::new(row, side.rook_col() as i32);
            let rook_to = Square::new(row, side.rook_target_col() as i32);
            if let (Ok(rook_from), Ok(rook_to)) = (rook_from, rook_to) {
                if let Some(rook) = self.remove(rook_from) {
                    self.put(rook_to, rook);
                }
            }
            events.push(MoveEvent::Castle { color, side });
        }

        match piece.kind {
            PieceKind::King => self.castling_mut().revoke_all(color),
            PieceKind::Rook if from.row() == color.back_rank() => {
                for side in CastleSide::BOTH {
                    if from.col() == side.rook_col() {
                        self.castling_mut().revoke(color, side);
                    }
                }
            }
            _ => {}
        }

        let grid = self.grid_mut();
        grid[from.index() as usize] = None;
        if let Some(displaced) = grid[to.index() as usize].replace(piece) {
            captured = Some(displaced);
            events.push(MoveEvent::Capture {
                square: to,
                piece: displaced,
                en_passant: false,
            });
        }

        self.finish_ply(is_pawn || captured.is_some());

        MoveReport {
            mov: Move::new(from, to),
            piece,
            captured,
            events,
        }
    }
}
