//! Bounded counting of structurally distinct solutions.

use tilefall_core::{BoardShape, Position, PositionPool};
use tinyvec::TinyVec;

use crate::RemovalOrder;

/// Limits for one solution-counting run.
///
/// The counting search is exponential in the worst case; the acceptance
/// threshold alone does not bound it when solutions are rare, so every run
/// carries an explicit node budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Hard cap on the number of search nodes visited in a single run.
    pub max_nodes: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_nodes: 1_000_000,
        }
    }
}

/// Result of one solution-counting run.
///
/// `solutions` is a lower bound on the true solution count: the search
/// stops as soon as the requested threshold is reached, and a run that ran
/// out of budget may have stopped before finding solutions that exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOutcome {
    solutions: usize,
    nodes: u64,
    budget_exhausted: bool,
}

impl CountOutcome {
    /// Returns the number of complete clears found before the search
    /// stopped.
    #[must_use]
    pub const fn solutions(&self) -> usize {
        self.solutions
    }

    /// Returns the number of search nodes visited.
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns whether the run stopped because the node budget ran out.
    #[must_use]
    pub const fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }

    /// Returns whether at least `limit` solutions were found.
    #[must_use]
    pub const fn has_at_least(&self, limit: usize) -> bool {
        self.solutions >= limit
    }
}

/// Counts distinct pair-removal sequences that empty the board, up to
/// `limit`.
///
/// The pairing structure is fixed by `order` (pair `k` is positions `2k`
/// and `2k + 1`); the sequence the order was discovered in is NOT reused.
/// The search explores every admissible order of whole-pair removal against
/// the live position set, under the same freeness rules as the order
/// search, and increments the solution counter each time the board empties.
/// Reaching `limit` stops the search immediately; so does exhausting
/// `limits.max_nodes`.
///
/// A board with very few distinct clears forces a near-single correct move
/// sequence; generation uses this count as an acceptance filter via
/// [`has_at_least_n_solutions`].
///
/// # Panics
///
/// Panics if `order` contains a position outside `shape` or repeats a
/// position, both of which indicate a defective order, not a search
/// failure.
#[must_use]
pub fn count_solutions(
    order: &RemovalOrder,
    shape: BoardShape,
    limit: usize,
    limits: &SearchLimits,
) -> CountOutcome {
    let pairs: Vec<(Position, Position)> = order.pairs().collect();

    let mut live = PositionPool::empty(shape);
    for &pos in order.positions() {
        assert!(live.insert(pos), "position {pos} repeated in removal order");
    }

    let mut search = CountSearch {
        pairs: &pairs,
        live,
        live_pairs: pairs.len(),
        limit,
        solutions: 0,
        nodes: 0,
        max_nodes: limits.max_nodes,
        budget_exhausted: false,
    };
    if search.limit > 0 {
        search.explore();
    }

    CountOutcome {
        solutions: search.solutions,
        nodes: search.nodes,
        budget_exhausted: search.budget_exhausted,
    }
}

/// Acceptance filter: does the board admit at least `limit` structurally
/// distinct complete solutions?
///
/// Returns `false` both for boards with too few solutions (including zero)
/// and for runs that exhausted their node budget first; either way the
/// board is rejected and generation retries. Monotonic in `limit`: a board
/// accepted at `limit = k` is accepted at any smaller limit.
#[must_use]
pub fn has_at_least_n_solutions(
    order: &RemovalOrder,
    shape: BoardShape,
    limit: usize,
    limits: &SearchLimits,
) -> bool {
    count_solutions(order, shape, limit, limits).has_at_least(limit)
}

/// Working state of one counting run.
///
/// Owns the live pool outright; pair removals are undone after each
/// explored branch, including the branch that just recorded a full clear.
struct CountSearch<'a> {
    pairs: &'a [(Position, Position)],
    live: PositionPool,
    live_pairs: usize,
    limit: usize,
    solutions: usize,
    nodes: u64,
    max_nodes: u64,
    budget_exhausted: bool,
}

impl CountSearch<'_> {
    /// Explores all admissible pair removals from the current live set.
    ///
    /// Returns `true` when the whole search must stop (threshold reached or
    /// budget exhausted), which unwinds the recursion without further
    /// exploration.
    fn explore(&mut self) -> bool {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            self.budget_exhausted = true;
            return true;
        }

        let removable: TinyVec<[usize; 32]> = (0..self.pairs.len())
            .filter(|&pid| self.is_pair_removable(pid))
            .collect();

        for pid in removable {
            let (a, b) = self.pairs[pid];
            self.live.remove(a);
            self.live.remove(b);
            self.live_pairs -= 1;

            let stop = if self.live_pairs == 0 {
                self.solutions += 1;
                self.solutions >= self.limit
            } else {
                self.explore()
            };

            self.live_pairs += 1;
            self.live.insert(b);
            self.live.insert(a);

            if stop {
                return true;
            }
        }

        false
    }

    /// A pair is removable iff both members are still live and both pass
    /// the freeness predicate against the live set.
    fn is_pair_removable(&self, pid: usize) -> bool {
        let (a, b) = self.pairs[pid];
        self.live.contains(a) && self.live.is_free(a) && self.live.is_free(b)
    }
}
