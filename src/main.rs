//! Stagehand headless runner.
//!
//! Loads a simulation config and a scene, then advances the world a fixed
//! number of ticks, logging what the controllers do along the way.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scene level.json --ticks 1200 --press-use-at 90
//! ```
//!
//! Without `--scene` the built-in demo level is used.

use bevy_ecs::prelude::*;
use clap::Parser;
use rustc_hash::FxHashSet;
use std::path::PathBuf;

use stagehand::components::mapposition::MapPosition;
use stagehand::components::rotation::Rotation;
use stagehand::game::{build_schedule, demo_scene, setup_world, spawn_scene, tick};
use stagehand::resources::cuepool::CuePool;
use stagehand::resources::scenelayout::SceneLayout;
use stagehand::resources::simconfig::SimConfig;
use stagehand::resources::worldtime::WorldTime;

/// Headless simulation of timed scene controllers
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI file with simulation settings. Missing files fall back to defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON scene layout. Defaults to the built-in demo level.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Override the number of ticks to run.
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the seconds per tick.
    #[arg(long)]
    dt: Option<f32>,

    /// Override the jitter seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Tick numbers on which the use button is held down.
    #[arg(long, value_name = "TICK", num_args = 1..)]
    press_use_at: Vec<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::with_path(path),
        None => SimConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(dt) = cli.dt {
        config.fixed_dt = dt;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let layout = match &cli.scene {
        Some(path) => match SceneLayout::load_from_file(&path.to_string_lossy()) {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("Failed to load scene {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => demo_scene(&config.player_tag),
    };

    let mut world = World::new();
    setup_world(&mut world, &config);
    let names = match spawn_scene(&mut world, &layout, &config.player_tag) {
        Ok(names) => names,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut update = build_schedule();
    update.initialize(&mut world).unwrap_or_else(|e| {
        log::error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    });

    let presses: FxHashSet<u64> = cli.press_use_at.iter().copied().collect();
    log::info!(
        "Running {} ticks of {}s ({} entities, {} scheduled presses)",
        config.ticks,
        config.fixed_dt,
        names.len(),
        presses.len()
    );

    for frame in 0..config.ticks {
        tick(
            &mut world,
            &mut update,
            config.fixed_dt,
            presses.contains(&frame),
        );
    }

    let elapsed = world.resource::<WorldTime>().elapsed;
    let dropped = world.resource::<CuePool>().dropped();
    log::info!("Finished at t={:.3}s, {} cues dropped", elapsed, dropped);

    let mut names: Vec<(&String, &Entity)> = names.iter().collect();
    names.sort();
    for (name, entity) in names {
        let Some(pos) = world.get::<MapPosition>(*entity) else {
            continue;
        };
        let degrees = world.get::<Rotation>(*entity).map_or(0.0, |r| r.degrees);
        log::info!(
            "{:>12}: ({:.3}, {:.3}, {:.3}) rot {:.2}",
            name,
            pos.pos.x,
            pos.pos.y,
            pos.pos.z,
            degrees
        );
    }
}
