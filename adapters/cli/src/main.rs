#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Turret Survivor session.

mod config;
mod headless;
mod picker;
mod session;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use turret_survivor_rendering::{Presentation, RenderingBackend, Scene, Theme};
use turret_survivor_simulation::Simulation;
use turret_survivor_world::query;

use config::SessionConfig;
use headless::HeadlessBackend;
use picker::PickerKind;
use session::Session;

/// Runs Turret Survivor without a window and reports how the run went.
#[derive(Debug, Parser)]
#[command(name = "turret-survivor", version, about)]
struct Args {
    /// TOML file with `[simulation]` and `[presentation]` tables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the spawn policy and skill draws; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Wall-clock duration of one frame in milliseconds.
    #[arg(long = "frame-ms", default_value_t = 16)]
    frame_ms: u64,
    /// Cosmetic theme (basic or cyber); overrides the config file.
    #[arg(long)]
    theme: Option<Theme>,
    /// How skill offers are answered.
    #[arg(long, value_enum, default_value_t = PickerKind::First)]
    picker: PickerKind,
    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Entry point for the Turret Survivor command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.spawning.seed = seed;
    }
    if let Some(theme) = args.theme {
        config.presentation.theme = theme;
    }

    let seed = config.simulation.spawning.seed;
    let theme = config.presentation.theme;
    let simulation =
        Simulation::new(config.simulation).context("simulation tuning was rejected")?;
    info!(
        seed,
        %theme,
        frames = args.frames,
        "{}",
        query::welcome_banner(simulation.world())
    );

    let scene = Scene::new(theme, query::hud(simulation.world()));
    let presentation = Presentation::new(config.presentation.window_title, scene);
    let mut session = Session::new(simulation, args.picker.build(seed));
    HeadlessBackend::new(args.frames, Duration::from_millis(args.frame_ms))
        .run(presentation, |dt, scene| session.advance(dt, scene))
        .context("headless session failed")?;

    let summary = session.summary(seed, theme);
    if args.json {
        let report =
            serde_json::to_string_pretty(&summary).context("failed to encode the summary")?;
        println!("{report}");
    } else {
        println!("{}", summary.render_text());
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
