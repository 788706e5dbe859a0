//! The game state machine: selection, pair removal, and board collapse.

use derive_more::{Display, Error};
use tilefall_core::{BoardShape, Position};
use tilefall_generator::GeneratedLevel;

use crate::Tile;

/// Error returned when a selection is rejected.
///
/// Both variants are recoverable play errors: the game state is unchanged
/// and the player simply picks another tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// No live tile occupies the position.
    #[display("no tile at {position}")]
    NoTile {
        /// The rejected position.
        position: Position,
    },
    /// The tile at the position is roofed or pinned.
    #[display("tile at {position} is blocked")]
    TileBlocked {
        /// The rejected position.
        position: Position,
    },
}

/// What a successful [`Game::select`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tile became the current selection.
    Selected,
    /// The tile was the current selection and is no longer selected.
    Deselected,
    /// The selection moved to this tile because the sprites differ.
    Switched,
    /// The tile matched the current selection; both were removed.
    PairRemoved {
        /// The previously selected tile's position.
        first: Position,
        /// The newly selected tile's position.
        second: Position,
    },
}

/// Overall state of a game in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Live tiles remain and at least one matching free pair exists.
    InProgress,
    /// All tiles have been removed.
    Won,
    /// Live tiles remain but no two free tiles share a sprite.
    Stuck,
}

/// A mahjong-solitaire game session over a generated level.
///
/// The game owns per-tile play state and implements the matching flow:
/// selecting a free tile highlights it, selecting a second free tile with
/// the same sprite removes the pair, and every removal recomputes which
/// tiles are blocked.
///
/// The blocked rule follows the physical board geometry: a tile is blocked
/// if a live tile occupies its 2x2 overlap footprint one layer up (layers
/// sit half a cell inward, so four upper cells overlap each lower cell),
/// or if both its left and right neighbors are live. This is never
/// stricter than the rule the generation searches were verified under, so
/// an accepted removal order is always replayable in play.
///
/// # Examples
///
/// ```
/// use tilefall_game::{Game, SelectOutcome};
/// use tilefall_generator::{GeneratorConfig, LevelGenerator};
///
/// let generator = LevelGenerator::new(GeneratorConfig {
///     width: 4,
///     height: 4,
///     layers: 2,
///     ..GeneratorConfig::default()
/// })?;
/// let level = generator.generate()?;
/// let mut game = Game::new(&level);
///
/// // The first two positions of the removal order form a matching pair
/// let (first, second) = level.removal_order.pair(0);
/// assert_eq!(game.select(first)?, SelectOutcome::Selected);
/// assert_eq!(
///     game.select(second)?,
///     SelectOutcome::PairRemoved { first, second }
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    shape: BoardShape,
    tiles: Vec<Option<Tile>>,
    live: usize,
    selected: Option<Position>,
}

impl Game {
    /// Creates a game session from a generated level.
    ///
    /// Initial blocked flags are computed immediately, so buried tiles
    /// reject selection from the first move on.
    ///
    /// # Panics
    ///
    /// Panics if the level places a tile outside its own board shape or
    /// places two tiles on one cell; both indicate a defective level.
    #[must_use]
    pub fn new(level: &GeneratedLevel) -> Self {
        let mut tiles = vec![None; level.shape.position_count()];
        for placed in &level.tiles {
            let index = level
                .shape
                .index_of(placed.position)
                .unwrap_or_else(|| panic!("tile at {} outside board shape", placed.position));
            assert!(
                tiles[index].is_none(),
                "two tiles placed at {}",
                placed.position
            );
            tiles[index] = Some(Tile::new(placed.position, placed.sprite, placed.pair));
        }

        let mut game = Self {
            shape: level.shape,
            live: level.tiles.len(),
            tiles,
            selected: None,
        };
        game.update_blocks();
        game
    }

    /// Returns the board shape.
    #[must_use]
    pub const fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Returns the live tile at the position, if any.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        let index = self.shape.index_of(position)?;
        self.tiles[index].as_ref()
    }

    /// Iterates over live tiles in board enumeration order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter_map(Option::as_ref)
    }

    /// Returns the number of live tiles.
    #[must_use]
    pub const fn live_tile_count(&self) -> usize {
        self.live
    }

    /// Returns the position of the currently selected tile, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Handles a click on the tile at `position`.
    ///
    /// With no current selection the tile becomes selected. Clicking the
    /// selection again clears it. Clicking a second tile removes both if
    /// their sprites match, and moves the selection otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoTile`] if no live tile occupies the position
    /// and [`GameError::TileBlocked`] if the tile is blocked. The game
    /// state (including the current selection) is unchanged on error.
    pub fn select(&mut self, position: Position) -> Result<SelectOutcome, GameError> {
        let tile = self.tile(position).ok_or(GameError::NoTile { position })?;
        if tile.is_blocked() {
            return Err(GameError::TileBlocked { position });
        }
        let sprite = tile.sprite();

        let Some(first) = self.selected else {
            self.set_selected_flag(position, true);
            self.selected = Some(position);
            return Ok(SelectOutcome::Selected);
        };

        if first == position {
            self.set_selected_flag(position, false);
            self.selected = None;
            return Ok(SelectOutcome::Deselected);
        }

        let first_sprite = self
            .tile(first)
            .expect("selected tile is live")
            .sprite();
        if first_sprite == sprite {
            self.set_selected_flag(first, false);
            self.selected = None;
            self.remove_pair(first, position);
            return Ok(SelectOutcome::PairRemoved {
                first,
                second: position,
            });
        }

        self.set_selected_flag(first, false);
        self.set_selected_flag(position, true);
        self.selected = Some(position);
        Ok(SelectOutcome::Switched)
    }

    /// Returns the overall game state.
    #[must_use]
    pub fn state(&self) -> GameState {
        if self.live == 0 {
            GameState::Won
        } else if self.has_available_moves() {
            GameState::InProgress
        } else {
            GameState::Stuck
        }
    }

    /// Returns whether some pair of free tiles shares a sprite.
    #[must_use]
    pub fn has_available_moves(&self) -> bool {
        self.matching_free_pair().is_some()
    }

    /// Returns the first matching free pair in board scan order, if any.
    ///
    /// This is the pair the auto-solver would remove next.
    #[must_use]
    pub fn hint(&self) -> Option<(Position, Position)> {
        self.matching_free_pair()
    }

    /// Removes the next matching free pair, if any, and returns it.
    pub fn solve_step(&mut self) -> Option<(Position, Position)> {
        let (first, second) = self.matching_free_pair()?;
        if let Some(selected) = self.selected.take() {
            self.set_selected_flag(selected, false);
        }
        self.remove_pair(first, second);
        Some((first, second))
    }

    /// Greedily removes matching free pairs until the board is cleared or
    /// no move remains. Returns the number of pairs removed.
    ///
    /// Greedy play can dead-end on boards a smarter order would clear, so
    /// the resulting state may be [`GameState::Stuck`].
    pub fn solve_automatically(&mut self) -> usize {
        let mut removed = 0;
        while self.solve_step().is_some() {
            removed += 1;
        }
        removed
    }

    fn matching_free_pair(&self) -> Option<(Position, Position)> {
        let free: Vec<&Tile> = self.tiles().filter(|tile| !tile.is_blocked()).collect();
        for (i, first) in free.iter().enumerate() {
            for second in &free[i + 1..] {
                if first.sprite() == second.sprite() {
                    return Some((first.position(), second.position()));
                }
            }
        }
        None
    }

    fn remove_pair(&mut self, first: Position, second: Position) {
        for position in [first, second] {
            let index = self
                .shape
                .index_of(position)
                .expect("removed tile is on the board");
            debug_assert!(self.tiles[index].is_some());
            self.tiles[index] = None;
        }
        self.live -= 2;
        self.update_blocks();
    }

    fn set_selected_flag(&mut self, position: Position, selected: bool) {
        let index = self
            .shape
            .index_of(position)
            .expect("selected tile is on the board");
        if let Some(tile) = self.tiles[index].as_mut() {
            tile.set_selected(selected);
        }
    }

    fn update_blocks(&mut self) {
        let blocked: Vec<(usize, bool)> = self
            .tiles()
            .map(|tile| {
                let index = self
                    .shape
                    .index_of(tile.position())
                    .expect("live tile is on the board");
                (index, self.is_position_blocked(tile.position()))
            })
            .collect();
        for (index, is_blocked) in blocked {
            if let Some(tile) = self.tiles[index].as_mut() {
                tile.set_blocked(is_blocked);
            }
        }
    }

    /// Physical blocked rule: covered by the 2x2 overlap footprint one
    /// layer up, or pinned between live left and right neighbors.
    fn is_position_blocked(&self, position: Position) -> bool {
        if self.has_roof(position) {
            return true;
        }
        let left = self.is_occupied(position.offset(-1, 0, 0));
        let right = self.is_occupied(position.offset(1, 0, 0));
        left && right
    }

    fn has_roof(&self, position: Position) -> bool {
        for dx in -1..=0 {
            for dy in -1..=0 {
                if self.is_occupied(position.offset(dx, dy, 1)) {
                    return true;
                }
            }
        }
        false
    }

    fn is_occupied(&self, position: Option<Position>) -> bool {
        position.is_some_and(|pos| self.tile(pos).is_some())
    }
}

#[cfg(test)]
mod tests {
    use tilefall_core::BoardShape;
    use tilefall_generator::{
        GeneratorConfig, LevelGenerator, LevelSeed, PairId, PlacedTile, SpriteId,
    };
    use tilefall_solver::RemovalOrder;

    use super::*;

    fn p(x: u8, y: u8, layer: u8) -> Position {
        Position::new(x, y, layer)
    }

    /// Builds a level by hand so sprites are under test control.
    ///
    /// `tiles` lists `(position, sprite)` in placement order; the removal
    /// order is its reverse, pairing consecutive removal entries.
    fn handmade_level(shape: BoardShape, tiles: &[(Position, u16)]) -> GeneratedLevel {
        assert_eq!(tiles.len() % 2, 0);
        let order: Vec<Position> = tiles.iter().rev().map(|&(pos, _)| pos).collect();
        let placed = tiles
            .iter()
            .enumerate()
            .map(|(placement_index, &(position, sprite))| {
                let order_index = tiles.len() - 1 - placement_index;
                PlacedTile {
                    position,
                    sprite: SpriteId::new(sprite),
                    pair: PairId::new(order_index / 2),
                    layout: tilefall_generator::LayoutPoint {
                        x: 0.0,
                        y: 0.0,
                        depth: 0.0,
                    },
                }
            })
            .collect();
        GeneratedLevel {
            seed: LevelSeed::from_bytes([0; 32]),
            shape,
            removal_order: RemovalOrder::from_positions(order),
            tiles: placed,
        }
    }

    fn flat_2x2(sprites: [u16; 4]) -> GeneratedLevel {
        let shape = BoardShape::new(2, 2, 1).unwrap();
        handmade_level(
            shape,
            &[
                (p(0, 0, 0), sprites[0]),
                (p(1, 0, 0), sprites[1]),
                (p(0, 1, 0), sprites[2]),
                (p(1, 1, 0), sprites[3]),
            ],
        )
    }

    #[test]
    fn test_select_deselect_and_switch() {
        let mut game = Game::new(&flat_2x2([1, 1, 2, 2]));

        assert_eq!(game.select(p(0, 0, 0)), Ok(SelectOutcome::Selected));
        assert!(game.tile(p(0, 0, 0)).unwrap().is_selected());
        assert_eq!(game.selected(), Some(p(0, 0, 0)));

        assert_eq!(game.select(p(0, 0, 0)), Ok(SelectOutcome::Deselected));
        assert_eq!(game.selected(), None);
        assert!(!game.tile(p(0, 0, 0)).unwrap().is_selected());

        // Mismatched sprites move the selection
        assert_eq!(game.select(p(0, 0, 0)), Ok(SelectOutcome::Selected));
        assert_eq!(game.select(p(0, 1, 0)), Ok(SelectOutcome::Switched));
        assert_eq!(game.selected(), Some(p(0, 1, 0)));
        assert!(!game.tile(p(0, 0, 0)).unwrap().is_selected());
        assert!(game.tile(p(0, 1, 0)).unwrap().is_selected());
    }

    #[test]
    fn test_matching_pair_is_removed() {
        let mut game = Game::new(&flat_2x2([1, 1, 2, 2]));

        game.select(p(0, 0, 0)).unwrap();
        assert_eq!(
            game.select(p(1, 0, 0)),
            Ok(SelectOutcome::PairRemoved {
                first: p(0, 0, 0),
                second: p(1, 0, 0),
            })
        );
        assert_eq!(game.live_tile_count(), 2);
        assert_eq!(game.selected(), None);
        assert!(game.tile(p(0, 0, 0)).is_none());

        game.select(p(0, 1, 0)).unwrap();
        game.select(p(1, 1, 0)).unwrap();
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn test_selecting_missing_or_blocked_tile_fails() {
        let shape = BoardShape::new(2, 2, 2).unwrap();
        let level = handmade_level(shape, &[(p(0, 0, 0), 1), (p(0, 0, 1), 1)]);
        let mut game = Game::new(&level);

        // The base tile is covered by the layer-1 tile's overlap footprint
        assert!(game.tile(p(0, 0, 0)).unwrap().is_blocked());
        assert_eq!(
            game.select(p(0, 0, 0)),
            Err(GameError::TileBlocked {
                position: p(0, 0, 0)
            })
        );

        assert_eq!(
            game.select(p(1, 1, 0)),
            Err(GameError::NoTile {
                position: p(1, 1, 0)
            })
        );

        // Errors leave the selection untouched
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_removal_unblocks_covered_tiles() {
        let shape = BoardShape::new(3, 3, 2).unwrap();
        let level = handmade_level(
            shape,
            &[
                (p(0, 0, 0), 2),
                (p(2, 2, 0), 2),
                (p(0, 0, 1), 1),
                (p(2, 0, 0), 1),
            ],
        );
        let mut game = Game::new(&level);

        // (0, 0, 1) overlaps the four base cells {0, 1} x {0, 1}
        assert!(game.tile(p(0, 0, 0)).unwrap().is_blocked());
        assert!(!game.tile(p(0, 0, 1)).unwrap().is_blocked());
        assert!(!game.tile(p(2, 0, 0)).unwrap().is_blocked());

        game.select(p(0, 0, 1)).unwrap();
        game.select(p(2, 0, 0)).unwrap();

        assert!(!game.tile(p(0, 0, 0)).unwrap().is_blocked());
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn test_stuck_detection() {
        let shape = BoardShape::new(4, 1, 1).unwrap();
        // Free tiles are the row ends, which do not match
        let level = handmade_level(
            shape,
            &[
                (p(0, 0, 0), 1),
                (p(1, 0, 0), 2),
                (p(2, 0, 0), 1),
                (p(3, 0, 0), 2),
            ],
        );
        let game = Game::new(&level);

        assert!(game.tile(p(1, 0, 0)).unwrap().is_blocked());
        assert!(game.tile(p(2, 0, 0)).unwrap().is_blocked());
        assert!(!game.has_available_moves());
        assert_eq!(game.state(), GameState::Stuck);
    }

    #[test]
    fn test_hint_and_auto_solve() {
        let mut game = Game::new(&flat_2x2([1, 2, 2, 1]));

        // First matching free pair in scan order: the two 1-sprites
        assert_eq!(game.hint(), Some((p(0, 0, 0), p(1, 1, 0))));

        let removed = game.solve_automatically();
        assert_eq!(removed, 2);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.hint(), None);
    }

    #[test]
    fn test_solve_step_clears_selection() {
        let mut game = Game::new(&flat_2x2([1, 1, 2, 2]));
        game.select(p(0, 1, 0)).unwrap();

        let step = game.solve_step().unwrap();
        assert_eq!(step, (p(0, 0, 0), p(1, 0, 0)));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_generated_level_replays_its_removal_order() {
        let generator = LevelGenerator::new(GeneratorConfig {
            width: 4,
            height: 4,
            layers: 2,
            sprite_count: 6,
            ..GeneratorConfig::default()
        })
        .unwrap();
        let level = generator
            .generate_with_seed(LevelSeed::from_bytes([5; 32]))
            .unwrap();
        let mut game = Game::new(&level);

        // The search predicate is stricter than the physical blocked rule,
        // so every pair of the accepted order is selectable at its turn.
        for (first, second) in level.removal_order.pairs() {
            assert_eq!(game.select(first), Ok(SelectOutcome::Selected));
            assert_eq!(
                game.select(second),
                Ok(SelectOutcome::PairRemoved { first, second })
            );
        }
        assert_eq!(game.state(), GameState::Won);
    }
}
