//! animframe CLI
//!
//! Plays animation descriptions in the terminal and inspects the easing
//! table.

mod config;
mod player;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use animframe_animation::Easing;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{AnimationFile, DisplayConfig};
use crate::player::PlayOptions;

#[derive(Parser)]
#[command(name = "animframe")]
#[command(author, version, about = "Drive single animations from the terminal", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an animation file
    Play {
        /// Path to the animation TOML file
        #[arg(default_value = "animation.toml")]
        path: PathBuf,

        /// Use the fixed-interval timer instead of display pacing
        #[arg(long)]
        timer_fallback: bool,

        /// Jump to the final frame after this many milliseconds
        #[arg(long, value_name = "MS")]
        stop_after: Option<u64>,
    },

    /// List every named easing curve
    Easings,

    /// Print evenly spaced samples of an easing curve
    Sample {
        /// Easing name, e.g. easeOutBounce
        name: String,

        /// Number of samples, including both endpoints
        #[arg(short, long, default_value_t = 11)]
        samples: usize,

        /// Bar width in cells
        #[arg(short, long, default_value_t = 40)]
        width: usize,
    },

    /// Write a starter animation file
    Init {
        #[arg(default_value = "animation.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play {
            path,
            timer_fallback,
            stop_after,
        } => {
            let file = AnimationFile::load(&path)?;
            let report = player::play(
                file,
                PlayOptions {
                    timer_fallback,
                    stop_after: stop_after.map(Duration::from_millis),
                },
            )?;
            tracing::info!(
                frames = report.frames,
                wall_ms = report.wall_time.as_millis() as u64,
                forced = report.forced,
                "playback complete"
            );
        }
        Commands::Easings => {
            for easing in Easing::ALL {
                println!("{}", easing);
            }
        }
        Commands::Sample {
            name,
            samples,
            width,
        } => {
            let easing: Easing = name.parse()?;
            let display = DisplayConfig {
                width,
                ..Default::default()
            };
            player::sample(easing, samples, &display);
        }
        Commands::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            fs::write(&path, AnimationFile::example().to_toml()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "created animation file");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
