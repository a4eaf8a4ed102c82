//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six fields of a FEN string, decoded into board terms.
///
/// The engine turns a record into a position and back; this type only
/// knows the notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Piece per square, indexed like [`Square::index`] (row 0 = rank 8 first).
    pub placement: [Option<Piece>; 64],
    /// Side to move.
    pub active_color: Color,
    /// Castling availability as written ("KQkq", "Kq", "-").
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1 and incremented after Black moves.
    pub fullmove_number: u32,
}

impl FenRecord {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;

        let active_color = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3], active_color)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenRecord {
            placement,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut grid = [None; 64];
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            let mut after_digit = false;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    if after_digit {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "consecutive digits in rank {}",
                            8 - row
                        )));
                    }
                    after_digit = true;
                    col += skip as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    after_digit = false;
                    if col < 8 {
                        grid[row * 8 + col] = Some(piece);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
                if col > 8 {
                    break;
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} does not describe exactly 8 squares",
                    8 - row
                )));
            }
        }

        Ok(grid)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        let mut seen = String::new();
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
            if seen.contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate character '{}'",
                    c
                )));
            }
            seen.push(c);
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str, active_color: Color) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        // Only the square the opponent's pawn just skipped over.
        let skipped_row = active_color.opposite().pawn_start_row() as i8
            + active_color.opposite().pawn_direction();
        match Square::from_algebraic(ep) {
            Some(sq) if sq.row() as i8 == skipped_row => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Renders the piece placement field.
    pub fn placement_field(&self) -> String {
        let mut field = String::new();
        for row in 0..8 {
            let mut empty_count = 0;
            for col in 0..8 {
                match self.placement[row * 8 + col] {
                    Some(piece) => {
                        if empty_count > 0 {
                            field.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        field.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                field.push_str(&empty_count.to_string());
            }
            if row < 7 {
                field.push('/');
            }
        }
        field
    }

    /// Converts the record back to a FEN string.
    pub fn to_fen(&self) -> String {
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);
        let castling = if self.castling.is_empty() {
            "-"
        } else {
            self.castling.as_str()
        };
        format!(
            "{} {} {} {} {} {}",
            self.placement_field(),
            self.active_color.fen_char(),
            castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    #[test]
    fn parse_startpos() {
        let fen = FenRecord::parse(FenRecord::STARTPOS).unwrap();
        assert_eq!(fen.active_color, Color::White);
        assert_eq!(fen.castling, "KQkq");
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(
            fen.placement[Square::E1.index() as usize],
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            fen.placement[Square::A8.index() as usize],
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(fen.placement.iter().flatten().count(), 32);
    }

    #[test]
    fn roundtrip() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = FenRecord::parse(original).unwrap();
        assert_eq!(parsed.en_passant, Square::new(5, 4).ok());
        assert_eq!(parsed.to_fen(), original);
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenRecord::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));

        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement() {
        // Too few ranks
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Unknown piece letter
        assert!(matches!(
            FenRecord::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Nine squares in a rank
        assert!(matches!(
            FenRecord::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenRecord::parse("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        // Adjacent digits add up to eight but are not a valid run
        assert!(matches!(
            FenRecord::parse("44/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/3K13 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(FenRecord::parse("8/8/8/8/8/8/8/3K4 w - - 0 1").is_ok());
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w KK - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for ep in ["abc", "x3", "e4", "e3"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep);
            assert!(matches!(
                FenRecord::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(_))
            ));
        }
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            FenRecord::parse("8/8/8/8/8/8/8/8 w - - 0 0"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn partial_castling_and_black_en_passant() {
        let fen = FenRecord::parse("8/8/8/8/8/8/8/8 b Kq d3 0 1").unwrap();
        assert_eq!(fen.castling, "Kq");
        assert_eq!(fen.en_passant, Square::new(5, 3).ok());
    }

    #[test]
    fn en_passant_must_match_side_to_move() {
        // White to move: only a square Black skipped (rank 6) makes sense.
        assert!(matches!(
            FenRecord::parse("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            FenRecord::parse("4k3/8/8/8/8/8/8/4K3 b - d6 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert_eq!(
            FenRecord::parse("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
                .unwrap()
                .en_passant,
            Square::new(2, 3).ok()
        );
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains('3'));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}
