//! Removal orders: paired sequences of positions that empty a board.

use tilefall_core::{Position, PositionPool};

/// An ordered sequence of positions emptying a board pair by pair.
///
/// Positions at indices `2k` and `2k + 1` form pair `k`: both were
/// simultaneously free at the `k`-th step of the search that produced the
/// order. The pairing later decides which two physical cells receive the
/// same sprite, so a pair can never be partially removed.
///
/// A removal order is produced by
/// [`build_guaranteed_order`](crate::build_guaranteed_order) and consumed
/// by [`count_solutions`](crate::count_solutions) (which only keeps the
/// pairing, not the sequence) and by level assembly (which keeps the
/// sequence, reversed, for placement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOrder {
    positions: Vec<Position>,
}

impl RemovalOrder {
    /// Creates a removal order from an even-length position sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence has odd length: positions pair up `2k` with
    /// `2k + 1`, so an odd sequence is a programming defect, never valid
    /// input.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        assert!(
            positions.len() % 2 == 0,
            "removal order length {} is not even",
            positions.len()
        );
        Self { positions }
    }

    /// Returns the number of positions in the order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns whether the order contains no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.positions.len() / 2
    }

    /// Returns pair `k` of the order.
    ///
    /// # Panics
    ///
    /// Panics if `k >= pair_count()`.
    #[must_use]
    pub fn pair(&self, k: usize) -> (Position, Position) {
        (self.positions[2 * k], self.positions[2 * k + 1])
    }

    /// Iterates over the pairs in removal order.
    pub fn pairs(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.positions.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Returns the positions in removal order.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Consumes the order and returns its positions.
    #[must_use]
    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }

    /// Replays the order against a copy of `pool` and reports whether every
    /// removal step was legal.
    ///
    /// This is the solvability-witness check: the order is valid iff it has
    /// the same length as the pool and, at every step, both members of the
    /// next pair are present and free against the positions remaining at
    /// that point.
    #[must_use]
    pub fn is_witness_for(&self, pool: &PositionPool) -> bool {
        if self.positions.len() != pool.len() {
            return false;
        }
        let mut pool = pool.clone();
        for (a, b) in self.pairs() {
            if !(pool.contains(a) && pool.contains(b)) {
                return false;
            }
            if !(pool.is_free(a) && pool.is_free(b)) {
                return false;
            }
            pool.remove(a);
            pool.remove(b);
        }
        pool.is_empty()
    }
}
