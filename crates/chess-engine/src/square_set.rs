//! Compact set of board squares.
//!
//! Destination sets from the move generator are returned as a 64-bit mask
//! with one bit per square index, so membership tests are a single AND.

use chess_core::Square;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of squares, bit `n` standing for the square with index `n`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// No squares.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Every square.
    pub const FULL: SquareSet = SquareSet(!0);

    /// Creates a set holding a single square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        SquareSet(1u64 << sq.index())
    }

    /// Returns the raw mask.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Keeps only the squares for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(Square) -> bool,
    {
        for sq in *self {
            if !f(sq) {
                self.remove(sq);
            }
        }
    }

    /// Iterates the squares in index order.
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

/// Iterator over the squares of a [`SquareSet`], lowest index first.
#[derive(Debug, Clone)]
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareSetIter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl BitAnd for SquareSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & rhs.0)
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Square::to_algebraic)).finish()
    }
}

impl fmt::Display for SquareSet {
    /// Prints the set as an 8x8 grid, row 0 (rank 8) on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sq in Square::all() {
            let c = if self.contains(sq) { 'x' } else { '.' };
            write!(f, "{}", c)?;
            if sq.col() == 7 {
                writeln!(f)?;
            } else {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Square::E1);
        set.insert(Square::A8);
        assert!(set.contains(Square::E1));
        assert!(!set.contains(Square::H1));
        assert_eq!(set.len(), 2);
        set.remove(Square::E1);
        assert_eq!(set, SquareSet::from_square(Square::A8));
    }

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [Square::H1, Square::A8, Square::E8].into_iter().collect();
        let squares: Vec<Square> = set.iter().collect();
        assert_eq!(squares, vec![Square::A8, Square::E8, Square::H1]);
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn retain_filters() {
        let mut set = SquareSet::FULL;
        set.retain(|sq| sq.row() == 0);
        assert_eq!(set.len(), 8);
        assert!(set.iter().all(|sq| sq.row() == 0));
    }

    #[test]
    fn display_grid() {
        let set = SquareSet::from_square(Square::A8);
        let text = set.to_string();
        assert!(text.starts_with("x . ."));
        assert_eq!(text.lines().count(), 8);
    }
}
