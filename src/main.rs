//! gemquest headless driver.
//!
//! Runs the platformer gameplay core without an engine attached:
//!
//! 1. Load the gameplay tuning from an INI file (defaults if it is missing)
//! 2. Load the level's object layer from JSON
//! 3. Initialize and enter a [`GameSession`]
//! 4. Replay a scripted list of frames and overlaps, executing the emitted
//!    engine commands on a [`HeadlessEngine`] and logging each of them
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level assets/level1.json --replay assets/replay.json
//! ```

use clap::Parser;
use gemquest::game::GameSession;
use gemquest::replay::{HeadlessEngine, ReplayScript, run_replay};
use gemquest::resources::gameconfig::GameConfig;
use gemquest::resources::level::LevelLayout;
use glam::Vec2;
use log::{info, warn};
use std::path::PathBuf;

/// gemquest gameplay core
#[derive(Parser)]
#[command(
    version,
    about = "Replays scripted input against a gemquest level and logs the engine commands it produces."
)]
struct Cli {
    /// Gameplay configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level object layer, as JSON.
    #[arg(long, value_name = "PATH", default_value = "./assets/level1.json")]
    level: PathBuf,

    /// Replay script to run. Without one the level is only entered.
    #[arg(long, value_name = "PATH")]
    replay: Option<PathBuf>,

    /// Write a configuration file with the default values and exit.
    /// Optionally provide a path (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write the default configuration and quit
    if let Some(maybe_path) = cli.write_default_config {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("./config.ini"));
        if let Err(e) = GameConfig::with_path(&path).save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", path.display());
        return;
    }

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    let layout = match LevelLayout::load_from_file(&cli.level) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let script = match &cli.replay {
        Some(path) => match ReplayScript::load_from_file(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => ReplayScript::default(),
    };

    let spawn = Vec2::new(layout.player.x, layout.player.y);
    let mut session = GameSession::start(config, layout);
    let mut engine = HeadlessEngine::new(spawn);
    run_replay(&mut session, &script, &mut engine);

    for cmd in &engine.executed {
        info!("{:?}", cmd);
    }
    info!(
        "Finished after {:.2}s: state {:?}, score {}/{}, locked {}, {} engine commands",
        session.elapsed(),
        session.state(),
        session.score(),
        session.layout().target_score,
        session.is_locked(),
        engine.executed.len()
    );
}
