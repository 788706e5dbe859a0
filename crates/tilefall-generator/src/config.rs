//! Generation parameters and their validation.

use derive_more::{Display, Error};
use tilefall_core::ShapeError;
use tilefall_solver::SearchLimits;

/// Error returned when a [`GeneratorConfig`] is rejected.
///
/// Configuration errors are fatal to the call and are reported before any
/// search starts; they are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// The board dimensions were rejected.
    #[display("{_0}")]
    Shape(ShapeError),
    /// The sprite catalogue was empty.
    #[display("sprite_count must be at least 1")]
    NoSprites,
    /// The acceptance threshold was zero.
    #[display("min_solutions must be at least 1")]
    ZeroMinSolutions,
    /// The retry budget was zero.
    #[display("max_attempts must be at least 1")]
    ZeroMaxAttempts,
}

impl From<ShapeError> for ConfigError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

/// Parameters of one level generator.
///
/// Larger `layers` increase roofing constraints and shrink the usable
/// footprint of each layer by one cell per axis; larger `min_solutions`
/// reject more boards and so cost more generation attempts.
///
/// # Examples
///
/// ```
/// use tilefall_generator::GeneratorConfig;
///
/// let config = GeneratorConfig {
///     width: 6,
///     height: 6,
///     layers: 2,
///     ..GeneratorConfig::default()
/// };
/// assert_eq!(config.min_solutions, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Base-layer board width.
    pub width: u8,
    /// Base-layer board height.
    pub height: u8,
    /// Number of pyramid layers.
    pub layers: u8,
    /// Number of distinct sprites available for pair assignment. Sprites
    /// may repeat across pairs, so any count from 1 up works.
    pub sprite_count: u16,
    /// Minimum number of structurally distinct solutions a board must
    /// admit to be accepted. `1` accepts every solvable board; `2` and up
    /// reject boards that force a single move sequence.
    pub min_solutions: usize,
    /// Maximum number of generation attempts before giving up.
    pub max_attempts: u32,
    /// Node budget for each solution-counting run.
    pub search_limits: SearchLimits,
}

impl Default for GeneratorConfig {
    /// Defaults match a mid-sized three-layer board: `10x10x3`, twelve
    /// sprites, at least two solutions.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            layers: 3,
            sprite_count: 12,
            min_solutions: 2,
            max_attempts: 64,
            search_limits: SearchLimits::default(),
        }
    }
}
