//! Search algorithms for mahjong-solitaire boards.
//!
//! This crate proves properties of a board before a player ever sees it:
//!
//! 1. **Guaranteed-order search** - [`build_guaranteed_order`] finds one
//!    ordered sequence of pair-removals that empties the board, proving the
//!    board is solvable and fixing which two cells must later share a
//!    sprite. The result is a [`RemovalOrder`].
//! 2. **Solution-counting search** - [`count_solutions`] takes the pairing
//!    structure of a [`RemovalOrder`] and explores how many distinct orders
//!    of pair-removal clear the board, stopping early at an acceptance
//!    threshold. [`has_at_least_n_solutions`] is the filter used by level
//!    generation to reject boards that force a single move sequence.
//!
//! Both searches are pure backtracking over coordinate sets: sprite
//! identity is never inspected. Search exhaustion is an expected outcome
//! (`None` / a count below the threshold), not an error; callers retry with
//! a fresh random board.
//!
//! # Examples
//!
//! ```
//! use tilefall_core::{BoardShape, PositionPool};
//! use tilefall_solver::{SearchLimits, build_guaranteed_order, has_at_least_n_solutions};
//!
//! let shape = BoardShape::new(2, 2, 1)?;
//! let pool = PositionPool::full(shape);
//!
//! let order = build_guaranteed_order(&pool).expect("flat boards are solvable");
//! assert_eq!(order.pair_count(), 2);
//! assert!(order.is_witness_for(&pool));
//!
//! // The two pairs of a flat 2x2 board can be removed in either order
//! assert!(has_at_least_n_solutions(&order, shape, 2, &SearchLimits::default()));
//! # Ok::<(), tilefall_core::ShapeError>(())
//! ```

pub use self::{count::*, order::*, order_search::*};

mod count;
mod order;
mod order_search;
