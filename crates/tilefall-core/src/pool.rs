//! Live-position tracking and the freeness predicate.

use crate::{BoardShape, Position};

/// The set of positions currently present on a (virtual) board.
///
/// A pool starts out either [`full`](Self::full) or
/// [`empty`](Self::empty) for a given [`BoardShape`] and is mutated as
/// tiles are (provisionally) removed and restored during search, or
/// permanently removed during play.
///
/// The pool also hosts the *freeness predicate*: a position may legally be
/// removed right now iff it is neither [roofed](Self::is_roofed) nor
/// [pinned](Self::is_pinned). Both checks are pure reads of the pool.
///
/// # Examples
///
/// ```
/// use tilefall_core::{BoardShape, Position, PositionPool};
///
/// let shape = BoardShape::new(3, 1, 1)?;
/// let mut pool = PositionPool::full(shape);
///
/// // The middle tile of a row of three is pinned on both sides
/// assert!(!pool.is_free(Position::new(1, 0, 0)));
///
/// // Removing one end frees it
/// pool.remove(Position::new(0, 0, 0));
/// assert!(pool.is_free(Position::new(1, 0, 0)));
/// # Ok::<(), tilefall_core::ShapeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionPool {
    shape: BoardShape,
    live: Vec<bool>,
    len: usize,
}

impl PositionPool {
    /// Creates a pool containing every legal position of the shape.
    #[must_use]
    pub fn full(shape: BoardShape) -> Self {
        let count = shape.position_count();
        Self {
            shape,
            live: vec![true; count],
            len: count,
        }
    }

    /// Creates a pool containing no positions.
    #[must_use]
    pub fn empty(shape: BoardShape) -> Self {
        Self {
            shape,
            live: vec![false; shape.position_count()],
            len: 0,
        }
    }

    /// Returns the board shape this pool tracks.
    #[must_use]
    pub const fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Returns the number of present positions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether no positions are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether the position is present.
    ///
    /// Positions outside the shape are never present.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.shape
            .index_of(pos)
            .is_some_and(|index| self.live[index])
    }

    /// Inserts a position. Returns `true` if it was newly inserted.
    ///
    /// # Panics
    ///
    /// Panics if the position is not legal for the pool's shape.
    pub fn insert(&mut self, pos: Position) -> bool {
        let index = self
            .shape
            .index_of(pos)
            .unwrap_or_else(|| panic!("position {pos} outside board shape"));
        if self.live[index] {
            return false;
        }
        self.live[index] = true;
        self.len += 1;
        true
    }

    /// Removes a position. Returns `true` if it was present.
    pub fn remove(&mut self, pos: Position) -> bool {
        let Some(index) = self.shape.index_of(pos) else {
            return false;
        };
        if !self.live[index] {
            return false;
        }
        self.live[index] = false;
        self.len -= 1;
        true
    }

    /// Iterates over present positions in dense index order.
    ///
    /// This is the ascending enumeration order of
    /// [`BoardShape::positions`], which search code relies on as its
    /// deterministic tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.shape
            .positions()
            .enumerate()
            .filter(|&(index, _)| self.live[index])
            .map(|(_, pos)| pos)
    }

    /// Returns whether some present position covers this one from above.
    ///
    /// A position is roofed if any of the nine positions
    /// `(x ± 1, y ± 1, layer + 1)` (the position's own column included) is
    /// present.
    #[must_use]
    pub fn is_roofed(&self, pos: Position) -> bool {
        for dx in -1..=1 {
            for dy in -1..=1 {
                if pos
                    .offset(dx, dy, 1)
                    .is_some_and(|above| self.contains(above))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Returns whether both horizontal neighbors are present.
    ///
    /// A tile blocked on only one side can still be grabbed from the other
    /// long edge, so single-sided contact does not pin.
    #[must_use]
    pub fn is_pinned(&self, pos: Position) -> bool {
        let left = pos.offset(-1, 0, 0).is_some_and(|p| self.contains(p));
        let right = pos.offset(1, 0, 0).is_some_and(|p| self.contains(p));
        left && right
    }

    /// Returns whether the position may legally be removed right now.
    ///
    /// Free iff neither roofed nor pinned; the two checks are independent
    /// and both must pass.
    #[must_use]
    pub fn is_free(&self, pos: Position) -> bool {
        !self.is_roofed(pos) && !self.is_pinned(pos)
    }
}
