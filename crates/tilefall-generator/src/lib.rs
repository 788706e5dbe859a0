//! Level generation for mahjong-solitaire boards.
//!
//! This crate turns board parameters into a [`GeneratedLevel`] that is
//! proven solvable before a player ever sees it. Generation repeatedly:
//!
//! 1. enumerates the board topology and trims it to an even position count
//!    (dropping one random position if needed),
//! 2. runs the guaranteed-order search for a removal order witnessing
//!    solvability,
//! 3. runs the solution-counting search to reject boards with fewer than
//!    the configured number of structurally distinct solutions,
//!
//! until a board passes both searches, then assembles tiles: each pair of
//! the removal order receives a random sprite, the pair/sprite association
//! is shuffled, and tiles are placed in reverse removal order so that the
//! tiles found free last end up buried on the physical board.
//!
//! Randomness is used only for the odd-position drop, sprite assignment,
//! and pair shuffling - never for the searches, which are deterministic.
//! Generation is therefore reproducible from a [`LevelSeed`].
//!
//! # Examples
//!
//! ```
//! use tilefall_generator::{GeneratorConfig, LevelGenerator};
//!
//! let generator = LevelGenerator::new(GeneratorConfig {
//!     width: 4,
//!     height: 4,
//!     layers: 2,
//!     ..GeneratorConfig::default()
//! })?;
//!
//! let level = generator.generate()?;
//! assert_eq!(level.tiles.len() % 2, 0);
//! println!("seed: {}", level.seed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    config::{ConfigError, GeneratorConfig},
    generator::{GenerateError, LevelGenerator},
    level::{GeneratedLevel, LayoutPoint, PairId, PlacedTile, SpriteId},
    seed::{LevelSeed, ParseSeedError},
};

mod config;
mod generator;
mod level;
mod seed;
