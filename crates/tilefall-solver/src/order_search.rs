//! Backtracking search for a guaranteed removal order.

use tilefall_core::{Position, PositionPool};
use tinyvec::TinyVec;

use crate::RemovalOrder;

/// Finds one legal full removal sequence for the pool, if any exists.
///
/// The search recursively picks two currently-free positions, provisionally
/// removes them, and recurses on the shrunk pool; on failure of the
/// continuation the pair is restored and the next candidate pair is tried.
/// Candidates are enumerated in the pool's ascending iteration order, pairs
/// nested `i` then `j > i`, so the search is deterministic for a given
/// pool: all randomness in level generation lives outside it.
///
/// Returns `None` when no pair choice at any level leads to an empty board.
/// That is an expected outcome for unlucky boards, not an error; the caller
/// retries with a fresh random board.
///
/// The recursion depth is `pool.len() / 2`.
///
/// # Panics
///
/// Panics if the pool has odd size: pools are trimmed to even cardinality
/// before any search, so an odd pool is a programming defect.
///
/// # Examples
///
/// ```
/// use tilefall_core::{BoardShape, PositionPool};
/// use tilefall_solver::build_guaranteed_order;
///
/// let shape = BoardShape::new(2, 2, 1)?;
/// let pool = PositionPool::full(shape);
///
/// let order = build_guaranteed_order(&pool).expect("flat boards are solvable");
/// assert_eq!(order.len(), 4);
/// assert!(order.is_witness_for(&pool));
/// # Ok::<(), tilefall_core::ShapeError>(())
/// ```
#[must_use]
pub fn build_guaranteed_order(pool: &PositionPool) -> Option<RemovalOrder> {
    assert!(
        pool.len() % 2 == 0,
        "search requires an even pool, got {} positions",
        pool.len()
    );
    let mut search = OrderSearch {
        pool: pool.clone(),
        order: Vec::with_capacity(pool.len()),
    };
    if search.run() {
        Some(RemovalOrder::from_positions(search.order))
    } else {
        None
    }
}

/// Working state of one search invocation.
///
/// The search owns its pool copy and order outright; every mutation is
/// undone on the backtracking path, so the state is consistent at the top
/// of each recursive step.
struct OrderSearch {
    pool: PositionPool,
    order: Vec<Position>,
}

impl OrderSearch {
    fn run(&mut self) -> bool {
        if self.pool.is_empty() {
            return true;
        }

        let free: TinyVec<[Position; 16]> = self
            .pool
            .iter()
            .filter(|&pos| self.pool.is_free(pos))
            .collect();
        if free.len() < 2 {
            // Dead end for this branch only; the caller backtracks.
            return false;
        }

        for i in 0..free.len() {
            for j in (i + 1)..free.len() {
                let (a, b) = (free[i], free[j]);
                self.pool.remove(a);
                self.pool.remove(b);
                self.order.push(a);
                self.order.push(b);

                if self.run() {
                    return true;
                }

                self.order.truncate(self.order.len() - 2);
                self.pool.insert(b);
                self.pool.insert(a);
            }
        }

        false
    }
}
