//! Assembled levels ready for the presentation layer.

use tilefall_core::{BoardShape, Position};
use tilefall_solver::RemovalOrder;

use crate::LevelSeed;

/// Identity of a tile face. Two tiles match iff their sprites are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(u16);

impl SpriteId {
    /// Creates a sprite id from its catalogue index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the catalogue index.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.0
    }
}

/// Identity of a removal-order pair. Pair `k` groups the positions at
/// indices `2k` and `2k + 1` of the removal order; exactly two tiles carry
/// each pair id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairId(usize);

impl PairId {
    /// Creates a pair id from its removal-order pair index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the pair index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Position of a tile in layout space, in cell units.
///
/// Each layer sits half a cell inward on both axes and slightly closer to
/// the camera; the presentation layer multiplies by its cell size in
/// pixels. The whole layout is centered on the bounding box of all tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPoint {
    /// Horizontal offset from the board center.
    pub x: f32,
    /// Vertical offset from the board center.
    pub y: f32,
    /// Draw depth; more negative is closer to the camera.
    pub depth: f32,
}

/// One physical tile of an assembled level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    /// Cell coordinates on the board.
    pub position: Position,
    /// Face sprite; the matching partner tile carries the same sprite.
    pub sprite: SpriteId,
    /// Removal-order pair this tile belongs to.
    pub pair: PairId,
    /// Centered layout-space position.
    pub layout: LayoutPoint,
}

/// A fully assembled, verified level.
///
/// Tiles appear in placement order, which is the REVERSE of the removal
/// order: the pair the search found free last is placed first and ends up
/// the most buried on the physical board. Both tiles of every pair carry
/// the same sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLevel {
    /// Seed that reproduces this level exactly.
    pub seed: LevelSeed,
    /// Dimensions of the board the level was generated for.
    pub shape: BoardShape,
    /// The accepted removal order witnessing solvability.
    pub removal_order: RemovalOrder,
    /// Placed tiles, in placement (reverse removal) order.
    pub tiles: Vec<PlacedTile>,
}

impl GeneratedLevel {
    /// Returns the number of tile pairs in the level.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    /// Returns the tile placed at the given position, if any.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<&PlacedTile> {
        self.tiles.iter().find(|tile| tile.position == position)
    }
}
