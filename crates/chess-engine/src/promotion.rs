//! Promotion resolution.
//!
//! A pawn reaching its last rank stays a pawn until the player (or engine)
//! picks what it becomes; [`Position::resolve_promotion`] makes that swap.

use crate::events::MoveEvent;
use crate::{MoveError, Position};
use chess_core::{Piece, PieceKind};
use std::fmt;
use std::str::FromStr;

/// The kinds a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionChoice {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionChoice {
    pub const ALL: [PromotionChoice; 4] = [
        PromotionChoice::Queen,
        PromotionChoice::Rook,
        PromotionChoice::Bishop,
        PromotionChoice::Knight,
    ];

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotionChoice::Queen => PieceKind::Queen,
            PromotionChoice::Rook => PieceKind::Rook,
            PromotionChoice::Bishop => PieceKind::Bishop,
            PromotionChoice::Knight => PieceKind::Knight,
        }
    }
}

impl TryFrom<PieceKind> for PromotionChoice {
    type Error = MoveError;

    fn try_from(kind: PieceKind) -> Result<Self, Self::Error> {
        match kind {
            PieceKind::Queen => Ok(PromotionChoice::Queen),
            PieceKind::Rook => Ok(PromotionChoice::Rook),
            PieceKind::Bishop => Ok(PromotionChoice::Bishop),
            PieceKind::Knight => Ok(PromotionChoice::Knight),
            PieceKind::Pawn | PieceKind::King => {
                Err(MoveError::InvalidPromotionKind(kind.name().to_string()))
            }
        }
    }
}

impl FromStr for PromotionChoice {
    type Err = MoveError;

    /// Accepts "queen", "Rook", "n" and the like; never falls back to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<PieceKind>()
            .map_err(|_| MoveError::InvalidPromotionKind(s.to_string()))
            .and_then(PromotionChoice::try_from)
    }
}

impl fmt::Display for PromotionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl Position {
    /// Replaces the pawn awaiting promotion with a piece of the chosen kind,
    /// keeping its color, and clears the pending marker.
    pub fn resolve_promotion(&mut self, choice: PromotionChoice) -> Result<Piece, MoveError> {
        let square = self
            .pending_promotion()
            .ok_or(MoveError::NoPendingPromotion)?;
        let pawn = self
            .piece_at(square)
            .ok_or(MoveError::NoPieceAtSquare(square))?;

        let promoted = Piece::new(pawn.color, choice.kind());
        self.put(square, promoted);
        self.set_pending_promotion(None);

        MoveEvent::Promoted {
            square,
            piece: promoted,
        }
        .trace();
        Ok(promoted)
    }

    /// Resolves a promotion from a collaborator-supplied name such as "queen".
    pub fn resolve_promotion_named(&mut self, name: &str) -> Result<Piece, MoveError> {
        let choice = name.parse::<PromotionChoice>()?;
        self.resolve_promotion(choice)
    }
}
