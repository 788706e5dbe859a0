//! Core data structures for mahjong-solitaire boards.
//!
//! This crate provides the board model shared by level generation, solution
//! search, and game management components.
//!
//! # Overview
//!
//! The crate is organized around three concepts:
//!
//! 1. **Positions** - [`position`]: an immutable `(x, y, layer)` cell
//!    coordinate on a stepped-pyramid board.
//! 2. **Board topology** - [`shape`]: [`BoardShape`] validates board
//!    dimensions, enumerates every legal position (each higher layer is
//!    inset by one cell on each axis), and maps positions to dense indices.
//! 3. **Live-position tracking** - [`pool`]: [`PositionPool`] is the set of
//!    positions currently present on a (virtual) board, together with the
//!    freeness predicate that decides whether a position may legally be
//!    removed right now.
//!
//! # Examples
//!
//! ```
//! use tilefall_core::{BoardShape, Position, PositionPool};
//!
//! let shape = BoardShape::new(4, 4, 2)?;
//! // 4x4 base layer plus a 3x3 upper layer
//! assert_eq!(shape.position_count(), 25);
//!
//! let pool = PositionPool::full(shape);
//!
//! // A corner of the upper layer is uncovered and unpinned on one side
//! assert!(pool.is_free(Position::new(0, 0, 1)));
//!
//! // A base-layer cell under the upper layer is roofed
//! assert!(!pool.is_free(Position::new(1, 1, 0)));
//! # Ok::<(), tilefall_core::ShapeError>(())
//! ```

pub use self::{
    pool::PositionPool,
    position::Position,
    shape::{BoardShape, ShapeError},
};

pub mod pool;
pub mod position;
pub mod shape;
