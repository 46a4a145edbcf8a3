//! Deckflow CLI
//!
//! Inspect carousel slot layouts and replay wheel traces headlessly.

use anyhow::Result;
use clap::{Parser, Subcommand};
use deckflow_carousel::{slot_for, Carousel, Side, SlotKind};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod trace;

use config::{DeckflowConfig, DEFAULT_CONFIG_FILE};
use trace::SimulationOptions;

#[derive(Parser)]
#[command(name = "deckflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Deckflow stacked card carousel CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default deckflow.toml
    Init {
        /// Output path
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the resting slot of every card
    Slots {
        /// Config file (defaults to ./deckflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Active index
        #[arg(short, long, default_value = "0")]
        index: usize,
    },

    /// Replay a JSON event trace, printing one JSON line per frame
    Simulate {
        /// Config file (defaults to ./deckflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Trace file
        #[arg(short, long)]
        trace: PathBuf,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Stop after this time (defaults to the last event plus one transition)
        #[arg(long)]
        until_ms: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Frame lines own stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),

        Commands::Slots { config, index } => cmd_slots(config.as_deref(), index),

        Commands::Simulate {
            config,
            trace,
            fps,
            until_ms,
        } => cmd_simulate(
            config.as_deref(),
            &trace,
            SimulationOptions { fps, until_ms },
        ),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let content = DeckflowConfig::default().to_toml()?;
    fs::write(path, content)?;

    info!("Wrote {}", path.display());
    Ok(())
}

fn build_carousel(config: &DeckflowConfig) -> Result<Carousel> {
    let carousel = Carousel::new(config.deck()?, config.carousel.clone())?;
    Ok(carousel.with_viewport(config.viewport))
}

fn cmd_slots(config_path: Option<&Path>, index: usize) -> Result<()> {
    let config = DeckflowConfig::load_or_default(config_path)?;
    let carousel = build_carousel(&config)?;

    let len = carousel.deck().len();
    if index >= len {
        anyhow::bail!("Index {} out of range for a deck of {} cards", index, len);
    }

    let layout = carousel.layout();
    println!(
        "{:<4} {:<20} {:<16} {:>9} {:>8} {:>8} {:>7} {:>5}",
        "pos", "card", "slot", "y", "width", "height", "opacity", "z"
    );
    for (position, item) in carousel.deck().iter().enumerate() {
        let slot = slot_for(position, index, len);
        let g = layout.target(slot, Side::Above);
        let marker = if slot == SlotKind::Expanded { "*" } else { " " };
        println!(
            "{:<4} {:<20} {:<16} {:>9.1} {:>8.1} {:>8.1} {:>7.2} {:>5}",
            format!("{}{}", position, marker),
            item.label,
            slot.as_str(),
            g.y_offset,
            g.width,
            g.height,
            g.opacity,
            g.stack_depth
        );
    }

    Ok(())
}

fn cmd_simulate(
    config_path: Option<&Path>,
    trace: &Path,
    options: SimulationOptions,
) -> Result<()> {
    let config = DeckflowConfig::load_or_default(config_path)?;
    let carousel = build_carousel(&config)?;
    let events = trace::load_trace(trace)?;

    info!(
        "Replaying {} events against {} cards at {} fps",
        events.len(),
        carousel.deck().len(),
        options.fps
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let frames = trace::simulate(carousel, &events, options, &mut out)?;

    info!("Wrote {} frames", frames);
    Ok(())
}
