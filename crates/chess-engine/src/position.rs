//! Chess position representation.

use chess_core::{Color, FenError, FenRecord, Piece, PieceKind, Square, SquareError};
use std::fmt;

/// The two directions a king can castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Column of the rook this side castles with.
    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// Column the rook lands on, next to the king.
    #[inline]
    pub const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Columns strictly between the king's and the rook's start squares.
    pub const fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }
}

/// Castling rights flags.
///
/// Rights only ever get revoked during play; nothing in the engine sets a
/// flag once it has been cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` may still castle toward `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Revokes one right.
    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Revokes both rights of a color.
    #[inline]
    pub fn revoke_all(&mut self, color: Color) {
        for side in CastleSide::BOTH {
            self.revoke(color, side);
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Reads an already validated FEN castling field ("KQkq", "-").
    pub fn from_fen_field(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            };
        }
        CastlingRights::new(flags)
    }

    /// Writes the FEN castling field.
    pub fn to_fen_field(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|&(flag, _)| self.0 & flag != 0)
        .map(|(_, c)| c)
        .collect()
    }
}

/// Complete chess position state: an 8x8 grid of piece slots plus the
/// bookkeeping the rules need.
///
/// A position is mutated in place by [`Position::make_move`]. Exploring
/// hypothetical lines means cloning it first; there is no undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    grid: [Option<Piece>; 64],
    turn: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    pending_promotion: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    /// Creates an empty board, White to move, no rights.
    pub fn empty() -> Self {
        Position {
            grid: [None; 64],
            turn: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            pending_promotion: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut position = Position::empty();
        for color in Color::BOTH {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_start_row() as usize;
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                position.grid[back * 8 + col] = Some(Piece::new(color, kind));
                position.grid[pawns * 8 + col] = Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        position.castling = CastlingRights::ALL;
        position
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let record = FenRecord::parse(fen)?;
        Ok(Position {
            grid: record.placement,
            turn: record.active_color,
            castling: CastlingRights::from_fen_field(&record.castling),
            en_passant: record.en_passant,
            pending_promotion: None,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
        })
    }

    /// Converts the position to a FEN string.
    ///
    /// A pending promotion is not representable in FEN and is not written.
    pub fn to_fen(&self) -> String {
        FenRecord {
            placement: self.grid,
            active_color: self.turn,
            castling: self.castling.to_fen_field(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index() as usize]
    }

    /// Returns the piece at raw (row, col) coordinates, rejecting off-board ones.
    pub fn piece_at_coords(&self, row: i32, col: i32) -> Result<Option<Piece>, SquareError> {
        Ok(self.piece_at(Square::new(row, col)?))
    }

    /// Places a piece, returning whatever occupied the square.
    pub fn put(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.grid[sq.index() as usize].replace(piece)
    }

    /// Empties a square, returning its previous occupant.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.index() as usize].take()
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Locates a king of the given color.
    ///
    /// Positions are not required to hold exactly one king per side: with
    /// none this returns `None`, with several the first in row-major order.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Square skipped by the pawn double advance made on the previous ply.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Square of a pawn waiting for its promotion choice.
    #[inline]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub(crate) fn grid_mut(&mut self) -> &mut [Option<Piece>; 64] {
        &mut self.grid
    }

    pub(crate) fn castling_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling
    }

    pub(crate) fn set_en_passant(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    pub(crate) fn set_pending_promotion(&mut self, sq: Option<Square>) {
        self.pending_promotion = sq;
    }

    /// Flips the turn and advances the move counters.
    pub(crate) fn finish_ply(&mut self, reset_halfmove: bool) {
        if reset_halfmove {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.turn == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.turn = self.turn.opposite();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = Square::new(row as i32, col as i32)
                    .ok()
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
