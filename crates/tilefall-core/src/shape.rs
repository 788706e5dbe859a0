//! Board dimensions and topology enumeration.

use derive_more::{Display, Error};

use crate::Position;

/// Error returned when board dimensions are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ShapeError {
    /// One or more dimensions were zero.
    #[display("board dimensions must be positive, got {width}x{height}x{layers}")]
    ZeroDimension {
        /// Requested base-layer width.
        width: u8,
        /// Requested base-layer height.
        height: u8,
        /// Requested layer count.
        layers: u8,
    },
}

/// Validated dimensions of a stepped-pyramid board.
///
/// A shape `(W, H, L)` admits the position `(x, y, layer)` iff
/// `layer < L`, `x < W - layer`, and `y < H - layer`: each higher layer is
/// inset by one cell on each axis, producing a pyramid. Layers taller than
/// the base dimensions simply have no cells.
///
/// # Examples
///
/// ```
/// use tilefall_core::{BoardShape, Position};
///
/// let shape = BoardShape::new(4, 4, 2)?;
/// assert!(shape.contains(Position::new(3, 3, 0)));
/// assert!(shape.contains(Position::new(2, 2, 1)));
/// // Layer 1 is inset to 3x3
/// assert!(!shape.contains(Position::new(3, 0, 1)));
/// assert_eq!(shape.position_count(), 16 + 9);
/// # Ok::<(), tilefall_core::ShapeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardShape {
    width: u8,
    height: u8,
    layers: u8,
}

impl BoardShape {
    /// Creates a board shape from base-layer dimensions and a layer count.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::ZeroDimension`] if any dimension is zero.
    pub const fn new(width: u8, height: u8, layers: u8) -> Result<Self, ShapeError> {
        if width == 0 || height == 0 || layers == 0 {
            return Err(ShapeError::ZeroDimension {
                width,
                height,
                layers,
            });
        }
        Ok(Self {
            width,
            height,
            layers,
        })
    }

    /// Returns the base-layer width.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the base-layer height.
    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the number of layers.
    #[must_use]
    pub const fn layers(&self) -> u8 {
        self.layers
    }

    /// Returns the usable width of the given layer (zero above the board).
    #[must_use]
    pub const fn layer_width(&self, layer: u8) -> u8 {
        if layer >= self.layers {
            0
        } else {
            self.width.saturating_sub(layer)
        }
    }

    /// Returns the usable height of the given layer (zero above the board).
    #[must_use]
    pub const fn layer_height(&self, layer: u8) -> u8 {
        if layer >= self.layers {
            0
        } else {
            self.height.saturating_sub(layer)
        }
    }

    /// Returns whether the position is legal for this shape.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.layer() < self.layers
            && pos.x() < self.layer_width(pos.layer())
            && pos.y() < self.layer_height(pos.layer())
    }

    /// Iterates over every legal position, in dense index order.
    ///
    /// The order is ascending layer, then x, then y. This is the canonical
    /// enumeration order: [`index_of`] maps positions to their rank in this
    /// sequence.
    ///
    /// [`index_of`]: Self::index_of
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.layers).flat_map(move |layer| {
            (0..self.layer_width(layer)).flat_map(move |x| {
                (0..self.layer_height(layer)).map(move |y| Position::new(x, y, layer))
            })
        })
    }

    /// Returns the total number of legal positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        (0..self.layers)
            .map(|layer| usize::from(self.layer_width(layer)) * usize::from(self.layer_height(layer)))
            .sum()
    }

    /// Returns the dense index of a position, or `None` if the position is
    /// not legal for this shape.
    ///
    /// Indices cover `0..position_count()` and follow the enumeration order
    /// of [`positions`](Self::positions).
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let mut base = 0;
        for layer in 0..pos.layer() {
            base += usize::from(self.layer_width(layer)) * usize::from(self.layer_height(layer));
        }
        let layer_height = usize::from(self.layer_height(pos.layer()));
        Some(base + usize::from(pos.x()) * layer_height + usize::from(pos.y()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert!(matches!(
            BoardShape::new(0, 4, 1),
            Err(ShapeError::ZeroDimension { .. })
        ));
        assert!(matches!(
            BoardShape::new(4, 0, 1),
            Err(ShapeError::ZeroDimension { .. })
        ));
        assert!(matches!(
            BoardShape::new(4, 4, 0),
            Err(ShapeError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_flat_2x2_topology() {
        let shape = BoardShape::new(2, 2, 1).unwrap();
        let positions: Vec<_> = shape.positions().collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0, 0),
                Position::new(0, 1, 0),
                Position::new(1, 0, 0),
                Position::new(1, 1, 0),
            ]
        );
        assert_eq!(shape.position_count(), 4);
    }

    #[test]
    fn test_layer_inset() {
        let shape = BoardShape::new(4, 4, 2).unwrap();
        assert_eq!(shape.layer_width(0), 4);
        assert_eq!(shape.layer_width(1), 3);
        assert!(shape.contains(Position::new(2, 2, 1)));
        assert!(!shape.contains(Position::new(3, 0, 1)));
        assert!(!shape.contains(Position::new(0, 3, 1)));
        assert!(!shape.contains(Position::new(0, 0, 2)));
    }

    #[test]
    fn test_layers_taller_than_base() {
        // A 2x2 base cannot support more than two layers; the extra layers
        // contribute no cells but the shape itself stays valid.
        let shape = BoardShape::new(2, 2, 5).unwrap();
        assert_eq!(shape.layer_width(2), 0);
        assert_eq!(shape.position_count(), 4 + 1);
    }

    #[test]
    fn test_index_of_matches_enumeration_order() {
        let shape = BoardShape::new(4, 3, 2).unwrap();
        for (i, pos) in shape.positions().enumerate() {
            assert_eq!(shape.index_of(pos), Some(i));
        }
        assert_eq!(shape.index_of(Position::new(0, 0, 2)), None);
    }

    proptest! {
        #[test]
        fn prop_positions_are_valid_and_unique(
            width in 1_u8..=8,
            height in 1_u8..=8,
            layers in 1_u8..=4,
        ) {
            let shape = BoardShape::new(width, height, layers).unwrap();
            let positions: Vec<_> = shape.positions().collect();
            prop_assert_eq!(positions.len(), shape.position_count());

            let unique: HashSet<_> = positions.iter().copied().collect();
            prop_assert_eq!(unique.len(), positions.len());

            for pos in positions {
                prop_assert!(pos.layer() < layers);
                prop_assert!(pos.x() < width - pos.layer());
                prop_assert!(pos.y() < height - pos.layer());
            }
        }
    }
}
