//! Move representation.

use crate::Square;
use std::fmt;

/// A move from one square to another.
///
/// Special-move semantics (castling, en passant, promotion) are derived by
/// the engine from the position, so a move is only its two squares.
/// Encoded compactly: 6 bits from, 6 bits to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6))
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_bits((self.0 & 0x3F) as u8)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_bits(((self.0 >> 6) & 0x3F) as u8)
    }

    /// Returns the long algebraic notation for this move (e.g., "e2e4").
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from(), self.to())
    }

    /// Parses a move from long algebraic notation.
    ///
    /// A trailing promotion letter ("e7e8q") is accepted and ignored: the
    /// promotion choice is supplied separately once the pawn has landed.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        if s.len() == 5 && !matches!(s.as_bytes()[4].to_ascii_lowercase(), b'n' | b'b' | b'r' | b'q')
        {
            return None;
        }
        Some(Move::new(from, to))
    }
}

impl From<(Square, Square)> for Move {
    fn from((from, to): (Square, Square)) -> Self {
        Move::new(from, to)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_encoding() {
        let e2 = Square::new(6, 4).unwrap();
        let e4 = Square::new(4, 4).unwrap();
        let m = Move::new(e2, e4);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
        let converted: Move = (e2, e4).into();
        assert_eq!(converted, m);
    }

    #[test]
    fn move_uci() {
        let m = Move::new(Square::new(6, 4).unwrap(), Square::new(4, 4).unwrap());
        assert_eq!(m.to_uci(), "e2e4");
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from(), Square::new(6, 4).unwrap());
        assert_eq!(m.to(), Square::new(4, 4).unwrap());

        let promo = Move::from_uci("e7e8q").unwrap();
        assert_eq!(promo.to(), Square::E8);

        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
        assert!(Move::from_uci("e7e8x").is_none());
    }

    #[test]
    fn move_from_uci_edge_cases() {
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e").is_none());
        assert!(Move::from_uci("e2e4qq").is_none());
        assert!(Move::from_uci("é2e4").is_none());
    }
}
