//! Sword Levels entry point
//!
//! Lists levels, plays one level headlessly with the autopilot, or resets the
//! saved profile.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sword_levels::autopilot::Autopilot;
use sword_levels::consts::FRUIT_STEP_MS;
use sword_levels::settings::SETTINGS_FILE;
use sword_levels::{App, Settings};

#[derive(Parser, Debug)]
#[command(name = "sword-levels")]
#[command(about = "Level-based fruit defence, played headlessly")]
struct Cli {
    /// Settings file (defaults apply when missing)
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    settings: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every level and whether it is unlocked
    Levels,
    /// Play one level with the autopilot
    Play {
        #[arg(long)]
        level: u32,
        /// Fixed RNG seed for fruit types
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Forget all progress
    ResetProfile,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings);
    let mut app = App::new(settings);

    match cli.command {
        Commands::Levels => {
            for entry in app.levels() {
                let state = if entry.unlocked { "unlocked" } else { "locked" };
                println!("Level {:>2}  {}", entry.level, state);
            }
        }
        Commands::Play { level, seed } => play(&mut app, level, seed)?,
        Commands::ResetProfile => {
            app.reset_profile().with_context(|| {
                format!(
                    "failed to reset profile at {}",
                    app.settings().profile_path.display()
                )
            })?;
            println!("Profile reset, only level 1 is unlocked");
        }
    }

    Ok(())
}

/// Drive one level to its end at fixed 50 ms frames
fn play(app: &mut App, level: u32, seed: Option<u64>) -> Result<()> {
    let session = app
        .start_level(level, seed)
        .with_context(|| format!("failed to start level {level}"))?;
    let mut pilot = Autopilot::new(*session.config());

    let mut frames = 0u64;
    while session.is_playing() {
        for input in pilot.inputs(&session.snapshot()) {
            session.handle_input(input);
        }
        session.advance(FRUIT_STEP_MS);
        frames += 1;
    }

    let snapshot = session.snapshot();
    let stats = session.stats();
    log::info!(
        "Level {} ended after {} frames with {} lives left",
        level,
        frames,
        snapshot.lives
    );

    let outcome = app
        .finish_session()
        .context("failed to save profile")?
        .context("session ended without an outcome")?;

    println!("{}", outcome.message);
    println!(
        "Fruit: {} spawned, {} destroyed, {} reached you, {} escaped",
        stats.spawned, stats.destroyed, stats.collided, stats.escaped
    );
    println!("Time left: {}", snapshot.time_label);
    println!("Highest unlocked level: {}", app.profile().highest_level);
    Ok(())
}
