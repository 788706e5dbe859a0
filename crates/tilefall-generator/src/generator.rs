//! The generation loop: search, filter, retry, assemble.

use derive_more::{Display, Error};
use log::{debug, info};
use rand::{RngExt, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;
use tilefall_core::{BoardShape, Position, PositionPool};
use tilefall_solver::{RemovalOrder, build_guaranteed_order, has_at_least_n_solutions};

use crate::{
    ConfigError, GeneratedLevel, GeneratorConfig, LayoutPoint, LevelSeed, PairId, PlacedTile,
    SpriteId,
};

/// Error returned when level generation gives up.
///
/// Individual search failures are absorbed by the retry loop and never
/// reach the caller; only spending the whole retry budget does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GenerateError {
    /// No board passed both searches within the configured attempt budget.
    ///
    /// Usually means `min_solutions` is too high for the board size, or
    /// the board shape itself admits no solvable layout.
    #[display("no board accepted after {attempts} generation attempts")]
    AttemptsExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },
}

/// Generates verified mahjong-solitaire levels.
///
/// Each generation call repeats the search pipeline - topology, guaranteed
/// order, solution count - until a board passes, then assembles tiles with
/// randomized sprite pairs. All randomness of one call derives from a
/// single [`LevelSeed`], so any generated level can be reproduced from its
/// printed seed.
///
/// # Examples
///
/// ```
/// use tilefall_generator::{GeneratorConfig, LevelGenerator};
///
/// let generator = LevelGenerator::new(GeneratorConfig {
///     width: 4,
///     height: 4,
///     layers: 2,
///     ..GeneratorConfig::default()
/// })?;
///
/// let level = generator.generate()?;
///
/// // The level is reproducible from its seed
/// let again = generator.generate_with_seed(level.seed)?;
/// assert_eq!(level, again);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    config: GeneratorConfig,
    shape: BoardShape,
}

impl LevelGenerator {
    /// Creates a generator, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any dimension is zero, the sprite
    /// catalogue is empty, or the acceptance/retry budgets are zero.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let shape = BoardShape::new(config.width, config.height, config.layers)?;
        if config.sprite_count == 0 {
            return Err(ConfigError::NoSprites);
        }
        if config.min_solutions == 0 {
            return Err(ConfigError::ZeroMinSolutions);
        }
        if config.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        Ok(Self { config, shape })
    }

    /// Returns the validated configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the board shape levels are generated for.
    #[must_use]
    pub const fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Generates a level from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::AttemptsExhausted`] if no board passed
    /// both searches within the attempt budget.
    pub fn generate(&self) -> Result<GeneratedLevel, GenerateError> {
        self.generate_with_seed(LevelSeed::random(&mut rand::rng()))
    }

    /// Generates a level from the given seed.
    ///
    /// Deterministic: the same generator configuration and seed always
    /// produce the same level.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::AttemptsExhausted`] if no board passed
    /// both searches within the attempt budget.
    pub fn generate_with_seed(&self, seed: LevelSeed) -> Result<GeneratedLevel, GenerateError> {
        let mut rng = Pcg64::from_seed(*seed.as_bytes());

        for attempt in 1..=self.config.max_attempts {
            let pool = self.trimmed_pool(&mut rng);

            let Some(order) = build_guaranteed_order(&pool) else {
                debug!("attempt {attempt}: no guaranteed removal order for this layout");
                continue;
            };
            assert!(
                order.is_witness_for(&pool),
                "guaranteed order is not a valid removal witness"
            );

            if !has_at_least_n_solutions(
                &order,
                self.shape,
                self.config.min_solutions,
                &self.config.search_limits,
            ) {
                debug!(
                    "attempt {attempt}: fewer than {} distinct solutions",
                    self.config.min_solutions
                );
                continue;
            }

            info!(
                "accepted a {}-tile board after {attempt} attempt(s)",
                order.len()
            );
            return Ok(self.assemble(seed, order, &mut rng));
        }

        Err(GenerateError::AttemptsExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Builds the full topology pool, dropping one random position if the
    /// count is odd so tiles can pair 1:1.
    fn trimmed_pool(&self, rng: &mut Pcg64) -> PositionPool {
        let mut pool = PositionPool::full(self.shape);
        if pool.len() % 2 == 1 {
            let drop_index = rng.random_range(0..pool.len());
            let dropped = pool
                .iter()
                .nth(drop_index)
                .expect("drop index is within the pool");
            pool.remove(dropped);
            debug!("dropped {dropped} to even out {} positions", pool.len() + 1);
        }
        pool
    }

    /// Turns an accepted removal order into placed tiles.
    ///
    /// Pair `k` receives a random sprite; the pair/sprite association is
    /// then shuffled so sprite identity does not correlate with removal
    /// rank. Tiles are placed in reverse removal order: the pair found
    /// free last is placed first and ends up the most buried.
    fn assemble(&self, seed: LevelSeed, order: RemovalOrder, rng: &mut Pcg64) -> GeneratedLevel {
        let mut pair_sprites: Vec<SpriteId> = (0..order.pair_count())
            .map(|_| SpriteId::new(rng.random_range(0..self.config.sprite_count)))
            .collect();
        pair_sprites.shuffle(rng);

        let mut sprites = Vec::with_capacity(order.len());
        for &sprite in &pair_sprites {
            sprites.push(sprite);
            sprites.push(sprite);
        }

        let positions = order.positions();
        let mut tiles = Vec::with_capacity(positions.len());
        for (placement_index, &sprite) in sprites.iter().enumerate() {
            let order_index = positions.len() - 1 - placement_index;
            let position = positions[order_index];
            tiles.push(PlacedTile {
                position,
                sprite,
                pair: PairId::new(order_index / 2),
                layout: layout_point(position),
            });
        }
        center_layout(&mut tiles);

        GeneratedLevel {
            seed,
            shape: self.shape,
            removal_order: order,
            tiles,
        }
    }
}

/// Maps a cell to layout space: each layer is inset by half a cell on both
/// axes and drawn slightly closer to the camera.
fn layout_point(position: Position) -> LayoutPoint {
    let inset = 0.5 * f32::from(position.layer());
    LayoutPoint {
        x: f32::from(position.x()) + inset,
        y: f32::from(position.y()) + inset,
        depth: -0.1 * f32::from(position.layer()),
    }
}

/// Recenters the layout on the bounding box of all tiles.
fn center_layout(tiles: &mut [PlacedTile]) {
    let Some(first) = tiles.first() else {
        return;
    };
    let mut min_x = first.layout.x;
    let mut max_x = first.layout.x;
    let mut min_y = first.layout.y;
    let mut max_y = first.layout.y;
    for tile in tiles.iter() {
        min_x = min_x.min(tile.layout.x);
        max_x = max_x.max(tile.layout.x);
        min_y = min_y.min(tile.layout.y);
        max_y = max_y.max(tile.layout.y);
    }

    let center_x = (min_x + max_x) / 2.0;
    let center_y = (min_y + max_y) / 2.0;
    for tile in tiles {
        tile.layout.x -= center_x;
        tile.layout.y -= center_y;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn config(width: u8, height: u8, layers: u8) -> GeneratorConfig {
        GeneratorConfig {
            width,
            height,
            layers,
            sprite_count: 6,
            min_solutions: 2,
            max_attempts: 16,
            ..GeneratorConfig::default()
        }
    }

    fn seed(byte: u8) -> LevelSeed {
        LevelSeed::from_bytes([byte; 32])
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        assert!(matches!(
            LevelGenerator::new(GeneratorConfig {
                width: 0,
                ..config(4, 4, 1)
            }),
            Err(ConfigError::Shape(_))
        ));
        assert!(matches!(
            LevelGenerator::new(GeneratorConfig {
                sprite_count: 0,
                ..config(4, 4, 1)
            }),
            Err(ConfigError::NoSprites)
        ));
        assert!(matches!(
            LevelGenerator::new(GeneratorConfig {
                min_solutions: 0,
                ..config(4, 4, 1)
            }),
            Err(ConfigError::ZeroMinSolutions)
        ));
        assert!(matches!(
            LevelGenerator::new(GeneratorConfig {
                max_attempts: 0,
                ..config(4, 4, 1)
            }),
            Err(ConfigError::ZeroMaxAttempts)
        ));
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let generator = LevelGenerator::new(config(4, 4, 2)).unwrap();
        let first = generator.generate_with_seed(seed(42)).unwrap();
        let second = generator.generate_with_seed(seed(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_level_upholds_structural_invariants() {
        let generator = LevelGenerator::new(config(4, 4, 2)).unwrap();
        let level = generator.generate_with_seed(seed(7)).unwrap();

        // 25-position topology trimmed to an even 24
        assert_eq!(level.tiles.len(), 24);
        assert_eq!(level.removal_order.len(), 24);

        // The order is a replayable witness for its own position set
        let mut pool = PositionPool::empty(level.shape);
        for &pos in level.removal_order.positions() {
            pool.insert(pos);
        }
        assert!(level.removal_order.is_witness_for(&pool));

        // Every pair id owns exactly two tiles sharing one sprite
        let mut by_pair: HashMap<PairId, Vec<SpriteId>> = HashMap::new();
        for tile in &level.tiles {
            assert!(tile.sprite.index() < generator.config().sprite_count);
            by_pair.entry(tile.pair).or_default().push(tile.sprite);
        }
        assert_eq!(by_pair.len(), level.pair_count());
        for sprites in by_pair.values() {
            assert_eq!(sprites.len(), 2);
            assert_eq!(sprites[0], sprites[1]);
        }
    }

    #[test]
    fn test_tiles_are_placed_in_reverse_removal_order() {
        let generator = LevelGenerator::new(config(4, 4, 2)).unwrap();
        let level = generator.generate_with_seed(seed(3)).unwrap();

        let order = level.removal_order.positions();
        let placed: Vec<_> = level.tiles.iter().map(|tile| tile.position).collect();
        let reversed: Vec<_> = order.iter().rev().copied().collect();
        assert_eq!(placed, reversed);
    }

    #[test]
    fn test_layout_is_centered() {
        let generator = LevelGenerator::new(config(4, 4, 2)).unwrap();
        let level = generator.generate_with_seed(seed(9)).unwrap();

        let xs: Vec<f32> = level.tiles.iter().map(|tile| tile.layout.x).collect();
        let ys: Vec<f32> = level.tiles.iter().map(|tile| tile.layout.y).collect();
        let mid = |values: &[f32]| {
            let min = values.iter().copied().fold(f32::INFINITY, f32::min);
            let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            (min + max) / 2.0
        };
        assert!(mid(&xs).abs() < 1e-4);
        assert!(mid(&ys).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_board_exhausts_attempts() {
        // A 1x1x1 topology trims to an empty pool, which admits no
        // solution sequence at all; every attempt is rejected.
        let generator = LevelGenerator::new(GeneratorConfig {
            min_solutions: 1,
            max_attempts: 3,
            ..config(1, 1, 1)
        })
        .unwrap();
        assert_eq!(
            generator.generate_with_seed(seed(0)),
            Err(GenerateError::AttemptsExhausted { attempts: 3 })
        );
    }

    #[test]
    fn test_min_solutions_filter_rejects_forced_boards() {
        // A 4x1 row admits exactly one removal sequence (ends first, then
        // the middle pair), so it passes at min_solutions = 1 and is
        // rejected at 2.
        let accepted = LevelGenerator::new(GeneratorConfig {
            min_solutions: 1,
            ..config(4, 1, 1)
        })
        .unwrap();
        assert!(accepted.generate_with_seed(seed(1)).is_ok());

        let rejected = LevelGenerator::new(GeneratorConfig {
            min_solutions: 2,
            max_attempts: 5,
            ..config(4, 1, 1)
        })
        .unwrap();
        assert_eq!(
            rejected.generate_with_seed(seed(1)),
            Err(GenerateError::AttemptsExhausted { attempts: 5 })
        );
    }

    proptest! {
        #[test]
        fn prop_flat_levels_uphold_invariants(
            width in 2_u8..=5,
            height in 2_u8..=4,
            seed_byte in 0_u8..,
        ) {
            let generator = LevelGenerator::new(GeneratorConfig {
                min_solutions: 1,
                ..config(width, height, 1)
            })
            .unwrap();
            // Flat boards are always solvable, so generation cannot fail
            let level = generator.generate_with_seed(seed(seed_byte)).unwrap();

            prop_assert_eq!(level.tiles.len() % 2, 0);
            prop_assert_eq!(
                level.tiles.len(),
                (usize::from(width) * usize::from(height)) & !1
            );

            let mut pool = PositionPool::empty(level.shape);
            for &pos in level.removal_order.positions() {
                pool.insert(pos);
            }
            prop_assert!(level.removal_order.is_witness_for(&pool));

            let mut pair_tiles: HashMap<PairId, Vec<SpriteId>> = HashMap::new();
            for tile in &level.tiles {
                pair_tiles.entry(tile.pair).or_default().push(tile.sprite);
            }
            for sprites in pair_tiles.values() {
                prop_assert_eq!(sprites.len(), 2);
                prop_assert_eq!(sprites[0], sprites[1]);
            }
        }
    }
}
