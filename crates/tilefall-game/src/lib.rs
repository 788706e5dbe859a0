//! Play-state management for mahjong-solitaire levels.
//!
//! This crate turns a [`GeneratedLevel`] into a playable [`Game`]: it
//! tracks which tiles are live, which are blocked, and which one is
//! selected, and implements the click-to-match flow, win and stuck
//! detection, and a greedy auto-solver.
//!
//! Rendering, input handling, and animation are the host application's
//! concern; the game state here is pure data.
//!
//! [`GeneratedLevel`]: tilefall_generator::GeneratedLevel
//!
//! # Examples
//!
//! ```
//! use tilefall_game::{Game, GameState};
//! use tilefall_generator::{GeneratorConfig, LevelGenerator};
//!
//! let generator = LevelGenerator::new(GeneratorConfig {
//!     width: 4,
//!     height: 4,
//!     layers: 2,
//!     ..GeneratorConfig::default()
//! })?;
//! let level = generator.generate()?;
//!
//! let mut game = Game::new(&level);
//! assert_eq!(game.state(), GameState::InProgress);
//!
//! // Every generated level is solvable; the removal order proves it
//! for (first, second) in level.removal_order.pairs() {
//!     game.select(first)?;
//!     game.select(second)?;
//! }
//! assert_eq!(game.state(), GameState::Won);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    game::{Game, GameError, GameState, SelectOutcome},
    tile::Tile,
};

mod game;
mod tile;
