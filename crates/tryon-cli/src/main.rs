//! tryon CLI — synthetic sessions and config validation.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

#[derive(Parser)]
#[command(name = "tryon")]
#[command(version, about = "tryon — cloth simulation and compositing for garment try-on")]
struct Cli {
    /// Logging verbosity (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a session over a swaying synthetic body.
    Run {
        /// Session config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Frames to process.
        #[arg(short, long, default_value = "120")]
        frames: u32,

        /// Camera frame width.
        #[arg(long, default_value = "320")]
        width: u32,

        /// Camera frame height.
        #[arg(long, default_value = "240")]
        height: u32,

        /// Garment material (cotton, silk, denim, leather, velvet, wool, polyester, custom).
        #[arg(short, long, default_value = "cotton")]
        material: String,

        /// Write the last composited frame to this PNG file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a session config (.toml) or a garment mesh (.json).
    Validate {
        /// Path to config or mesh file.
        path: String,
    },

    /// Print the default session config as TOML.
    DefaultConfig,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install logger: {e}");
    }

    let result = match cli.command {
        Commands::Run {
            config,
            frames,
            width,
            height,
            material,
            output,
        } => commands::run(
            config.as_deref(),
            frames,
            width,
            height,
            &material,
            output.as_deref(),
        ),
        Commands::Validate { path } => commands::validate(&path),
        Commands::DefaultConfig => commands::default_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
