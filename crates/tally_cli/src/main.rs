//! Tally CLI
//!
//! Run counting label animations in the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::thread;
use tally_animation::{AnimationScheduler, Easing, DEFAULT_TARGET_FPS};
use tally_widgets::{format_value, CountLabel, CountRequest, DisplayKind, TICK_PERIOD};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod terminal;

use config::{TallyConfig, CONFIG_FILE};
use terminal::TerminalDisplay;

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animated counting labels in the terminal", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count between two numbers
    Count {
        /// Start value
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        from: f32,

        /// End value
        #[arg(long, allow_negative_numbers = true)]
        to: f32,

        /// Duration in seconds
        #[arg(short, long, default_value = "1.0")]
        duration: f32,

        /// Easing curve (linear, ease-in, ease-out)
        #[arg(short, long, default_value = "linear")]
        easing: Easing,

        /// Display kind (integer, decimal)
        #[arg(long, default_value = "integer")]
        display: DisplayKind,

        /// Background tick rate
        #[arg(long, default_value_t = DEFAULT_TARGET_FPS)]
        fps: u32,
    },

    /// Count using a tally.toml file
    Run {
        /// Config file
        #[arg(short, long, default_value = CONFIG_FILE)]
        config: PathBuf,
    },

    /// Print a value the way a counter label renders it
    Format {
        #[arg(allow_negative_numbers = true)]
        value: f32,

        /// Display kind (integer, decimal)
        #[arg(long, default_value = "integer")]
        display: DisplayKind,
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

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Count {
            from,
            to,
            duration,
            easing,
            display,
            fps,
        } => {
            let request = CountRequest::new(from, to, duration)
                .easing(easing)
                .display(display);
            cmd_count(&request, fps)
        }

        Commands::Run { config } => cmd_run(&config),

        Commands::Format { value, display } => {
            println!("{}", format_value(value, display));
            Ok(())
        }
    }
}

fn cmd_run(path: &Path) -> Result<()> {
    let config = TallyConfig::load(path)?;
    debug!("Loaded {}", path.display());
    cmd_count(&config.counter, config.scheduler.fps)
}

fn cmd_count(request: &CountRequest, fps: u32) -> Result<()> {
    request.validate()?;

    let mut scheduler = AnimationScheduler::new();
    scheduler.set_target_fps(fps);
    scheduler.start_background();

    let label = CountLabel::new(scheduler.handle(), TerminalDisplay::new(""));

    info!(
        "Counting {} -> {} over {}s ({}, {})",
        request.from, request.to, request.duration, request.easing, request.display
    );
    label.start(request)?;

    while label.is_animating() {
        thread::sleep(TICK_PERIOD);
    }
    println!();

    drop(label);
    scheduler.stop_background();
    Ok(())
}
