//! # Sprawl Main Entry Point
//!
//! Generates a city from the command line and prints one of its levels as
//! ASCII, or the whole world as JSON.

use clap::Parser;
use log::{error, info, LevelFilter};
use sprawl::generation::utils::create_rng;
use sprawl::{CityGenerator, GenerationConfig, SprawlError, SprawlResult};
use std::path::PathBuf;

/// Command line arguments for the Sprawl city generator.
#[derive(Parser, Debug)]
#[command(name = "sprawl")]
#[command(about = "Procedural city generator for a turn-based roguelike")]
#[command(version)]
struct Args {
    /// Random seed for city generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Map height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Number of levels, street level included
    #[arg(long)]
    levels: Option<usize>,

    /// Level to print
    #[arg(short, long, default_value_t = 0)]
    level: usize,

    /// Print the whole world as JSON instead of an ASCII level
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// Builds the generation config from the file and flag overrides.
fn load_config(args: &Args) -> SprawlResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.map_width = width;
    }
    if let Some(height) = args.height {
        config.map_height = height;
    }
    if let Some(levels) = args.levels {
        config.level_count = levels;
    }
    Ok(config)
}

fn run(args: &Args) -> SprawlResult<()> {
    info!("Starting Sprawl v{}", sprawl::VERSION);
    let config = load_config(args)?;
    let mut rng = create_rng(&config);
    let city = CityGenerator::new().generate_city(&config, &mut rng)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&city.world)?);
        return Ok(());
    }

    let level = city.world.get_level(args.level).ok_or_else(|| {
        SprawlError::InvalidConfig(format!(
            "level {} does not exist ({} levels)",
            args.level,
            city.world.levels.len()
        ))
    })?;
    print!("{}", level.render_ascii());
    info!(
        "Exit at {:?}, player starts at ({}, {}), {} stair shafts",
        city.world.exits,
        city.world.player_spawn.x,
        city.world.player_spawn.y,
        city.world.stairs.shaft_count()
    );
    for (purpose, count) in sprawl::generation::purpose_counts(&city.buildings) {
        info!("{:>16}: {}", purpose.name(), count);
    }
    Ok(())
}
