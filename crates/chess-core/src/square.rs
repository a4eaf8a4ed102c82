//! Board square representation.

use std::fmt;
use thiserror::Error;

/// Error returned when coordinates fall outside the 8x8 board.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SquareError {
    #[error("square ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: i32, col: i32 },
}

/// A square on the board, addressed by (row, column).
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's (rank 1);
/// column 0 is the a-file. Internally the square is the index
/// `row * 8 + col`, so a8 = 0, h8 = 7, a1 = 56 and h1 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, rejecting off-board coordinates.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Result<Self, SquareError> {
        if row < 0 || row >= 8 || col < 0 || col >= 8 {
            return Err(SquareError::OutOfBounds { row, col });
        }
        Ok(Square((row * 8 + col) as u8))
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from the low six bits of `bits`.
    #[inline]
    pub(crate) const fn from_bits(bits: u8) -> Self {
        Square(bits & 0x3F)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        let col = (file - b'a') as i32;
        let row = (b'8' - rank) as i32;
        Some(Square((row * 8 + col) as u8))
    }

    /// Iterates over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square `dr` rows and `dc` columns away, if it is on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row() as i32 + dr as i32;
        let col = self.col() as i32 + dc as i32;
        match Square::new(row, col) {
            Ok(sq) => Some(sq),
            Err(_) => None,
        }
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Returns the rank digit ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    // Common squares
    pub const A8: Square = Square(0);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl TryFrom<(i32, i32)> for Square {
    type Error = SquareError;

    fn try_from((row, col): (i32, i32)) -> Result<Self, Self::Error> {
        Square::new(row, col)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {} = {})", self.row(), self.col(), self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
