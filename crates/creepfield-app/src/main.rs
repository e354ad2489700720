use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use creepfield_app::game_loop::{self, LoopOptions, DEFAULT_DT};
use creepfield_app::render::{Both, JsonLinesRenderer, LogRenderer};
use creepfield_app::script::InputScript;
use creepfield_app::{logging, AppError};
use creepfield_core::config::SimConfig;
use creepfield_sim::world_setup;
use creepfield_sim::World;
use creepfield_terrain::{GameMap, Room, TerrainGrid};

/// Headless CREEPFIELD arena run.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file. Missing fields use defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON input script: [{"frames": 60, "keys": ["d"]}, ...].
    #[arg(long)]
    script: Option<PathBuf>,

    /// Frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Override the config's RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Extra creeps scattered at random.
    #[arg(long, default_value_t = 0)]
    creeps: usize,

    /// Skip the terrain room.
    #[arg(long)]
    no_room: bool,

    /// Log the overlay every N frames.
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Write every snapshot to stdout as JSON lines.
    #[arg(long)]
    dump: bool,

    /// Pace frames to wall-clock time.
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::demo(),
    };

    let mut world = World::new(config)?;
    if !args.no_room {
        let mut map = GameMap::new(world.config().bounds.width, world.config().bounds.height);
        map.add_room("arena", Room::new(TerrainGrid::sample()));
        let walls = world_setup::spawn_current_room(&mut world, &map)?;
        log::info!("room {:?}: {} walls", map.current_room_name(), walls.len());
    }
    let player = world_setup::spawn_player(&mut world)?;
    world_setup::scatter_creeps(&mut world, args.creeps, 15.0)?;
    log::info!("player {player}, {} entities", world.entity_count());

    let options = LoopOptions {
        frames: args.frames,
        dt: DEFAULT_DT,
        realtime: args.realtime,
    };
    let mut log_renderer = LogRenderer::new(args.log_every);
    let (summary, last) = if args.dump {
        let stdout = std::io::stdout().lock();
        let mut renderer = Both(log_renderer, JsonLinesRenderer::new(stdout));
        game_loop::run(&mut world, &script, &options, &mut renderer)
    } else {
        game_loop::run(&mut world, &script, &options, &mut log_renderer)
    };

    log::info!(
        "done: {} frames, {} spawned, {} damaged, {} removed, {} update failures, {} left",
        summary.frames,
        summary.spawned,
        summary.damaged,
        summary.removed,
        summary.update_failures,
        last.stats.entity_count,
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
