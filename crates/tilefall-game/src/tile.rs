//! Per-tile play state.

use tilefall_core::Position;
use tilefall_generator::{PairId, SpriteId};

/// One live tile on the play board.
///
/// A tile carries its placement identity (position, sprite, pair) plus two
/// play-time flags: `blocked` (recomputed by the game after every removal)
/// and `selected` (at most one tile is selected at a time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    position: Position,
    sprite: SpriteId,
    pair: PairId,
    blocked: bool,
    selected: bool,
}

impl Tile {
    pub(crate) const fn new(position: Position, sprite: SpriteId, pair: PairId) -> Self {
        Self {
            position,
            sprite,
            pair,
            blocked: false,
            selected: false,
        }
    }

    /// Returns the tile's cell coordinates.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the tile's face sprite.
    #[must_use]
    pub const fn sprite(&self) -> SpriteId {
        self.sprite
    }

    /// Returns the removal-order pair the tile belongs to.
    #[must_use]
    pub const fn pair(&self) -> PairId {
        self.pair
    }

    /// Returns whether the tile is currently blocked (roofed or pinned).
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Returns whether the tile is the current selection.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
