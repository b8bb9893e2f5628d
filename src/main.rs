//! Face signal replay: pose gate, blink events and head direction from recorded landmarks.

use anyhow::{Context, Result};
use clap::Parser;
use face_signals::{
    app::{AppConfig, FrameSource, ReplayApp},
    config::{Config, Projection, EXAMPLE_CONFIG},
};
use log::{info, warn};
use std::{io, path::PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON lines file of detector frames ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Write notifications to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Canvas width override (switches to canvas projection)
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Canvas height override (switches to canvas projection)
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Median smoothing window override for blink scores
    #[arg(long)]
    smoothing: Option<usize>,

    /// Disable blink detection and lock reporting
    #[arg(long)]
    no_blink: bool,

    /// Disable head direction output
    #[arg(long)]
    no_direction: bool,

    /// Emit overlay geometry after each direction target
    #[arg(long)]
    overlay: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Load configuration if provided
    let mut pipeline = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let (Some(width), Some(height)) = (args.width, args.height) {
        pipeline.direction.projection = Projection::Canvas { width, height };
    }
    if let Some(smoothing) = args.smoothing {
        pipeline.blink.smoothing_frames = smoothing;
    }
    if args.no_blink {
        pipeline.coordinator.blink_enabled = false;
    }
    if args.no_direction {
        pipeline.coordinator.direction_enabled = false;
    }

    let config = AppConfig {
        source: if args.input == "-" {
            FrameSource::Stdin
        } else {
            FrameSource::File(PathBuf::from(&args.input))
        },
        pipeline,
        emit_overlay: args.overlay,
    };

    // Create and run application
    let mut app = ReplayApp::new(config)?;
    let summary = match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            app.run(io::BufWriter::new(file))?
        }
        None => app.run(io::stdout().lock())?,
    };

    info!(
        "Processed {} frames: {} blinks, {} face lost, {} rejected, {} skipped",
        summary.frames, summary.blinks, summary.face_lost_frames, summary.rejected_frames, summary.skipped_lines
    );

    Ok(())
}
