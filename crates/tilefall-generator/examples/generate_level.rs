//! Example demonstrating basic level generation.
//!
//! This example shows how to:
//! - Create a `LevelGenerator` from board parameters
//! - Generate a random level, or reproduce one from a seed
//! - Display the board layer by layer together with its seed
//! - Estimate the first-attempt acceptance rate of a configuration
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_level
//! ```
//!
//! Reproduce a level from its printed seed:
//!
//! ```sh
//! cargo run --example generate_level -- --seed <64-hex-chars>
//! ```
//!
//! Pick board parameters:
//!
//! ```sh
//! cargo run --example generate_level -- --width 6 --height 6 --layers 2
//! ```
//!
//! Estimate how often a configuration passes both searches on the first
//! attempt (sampled in parallel):
//!
//! ```sh
//! cargo run --example generate_level -- --sample 1000
//! ```

use std::process;

use clap::Parser;
use rayon::prelude::*;
use tilefall_core::Position;
use tilefall_generator::{GeneratedLevel, GeneratorConfig, LevelGenerator, LevelSeed};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base-layer board width.
    #[arg(long, default_value_t = 6)]
    width: u8,

    /// Base-layer board height.
    #[arg(long, default_value_t = 6)]
    height: u8,

    /// Number of pyramid layers.
    #[arg(long, default_value_t = 2)]
    layers: u8,

    /// Number of distinct sprites.
    #[arg(long, default_value_t = 12)]
    sprites: u16,

    /// Minimum number of distinct solutions to accept a board.
    #[arg(long, default_value_t = 2)]
    min_solutions: usize,

    /// Seed to reproduce (64 hex characters); random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<LevelSeed>,

    /// Estimate first-attempt acceptance over this many random seeds.
    #[arg(long, value_name = "COUNT")]
    sample: Option<u32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let generator = match LevelGenerator::new(GeneratorConfig {
        width: args.width,
        height: args.height,
        layers: args.layers,
        sprite_count: args.sprites,
        min_solutions: args.min_solutions,
        ..GeneratorConfig::default()
    }) {
        Ok(generator) => generator,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            process::exit(2);
        }
    };

    if let Some(samples) = args.sample {
        sample_acceptance(&generator, samples);
        return;
    }

    let result = match args.seed {
        Some(seed) => generator.generate_with_seed(seed),
        None => generator.generate(),
    };
    match result {
        Ok(level) => print_level(&level),
        Err(err) => {
            eprintln!("generation failed: {err}");
            process::exit(1);
        }
    }
}

/// Runs `samples` independent single-attempt generations and reports how
/// many were accepted without a retry.
fn sample_acceptance(generator: &LevelGenerator, samples: u32) {
    let single_attempt = LevelGenerator::new(GeneratorConfig {
        max_attempts: 1,
        ..*generator.config()
    })
    .expect("validated config stays valid");

    let accepted = (0..samples)
        .into_par_iter()
        .filter(|_| single_attempt.generate().is_ok())
        .count();

    println!("Accepted {accepted} of {samples} first attempts");
    #[allow(clippy::cast_precision_loss)]
    let rate = accepted as f64 / f64::from(samples.max(1));
    println!("First-attempt acceptance rate: {:.1}%", rate * 100.0);
}

fn print_level(level: &GeneratedLevel) {
    println!("Seed:");
    println!("  {}", level.seed);
    println!();

    println!("Tiles: {} ({} pairs)", level.tiles.len(), level.pair_count());
    println!();

    for layer in 0..level.shape.layers() {
        println!("Layer {layer}:");
        for y in 0..level.shape.layer_height(layer) {
            print!("  ");
            for x in 0..level.shape.layer_width(layer) {
                match level.tile_at(Position::new(x, y, layer)) {
                    Some(tile) => print!("{:>3}", tile.sprite.index()),
                    None => print!("  ."),
                }
            }
            println!();
        }
        println!();
    }
}
