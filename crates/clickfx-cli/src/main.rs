//! clickfx CLI - headless playback of pointer effects

mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, render, simulate};

#[derive(Parser)]
#[command(name = "clickfx")]
#[command(about = "Simulate and render pointer particle effects without a browser", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and sample session into a directory
    Init {
        /// Target directory (created if missing)
        dir: String,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Replay a session script and print per-frame stats
    Simulate {
        /// Path to session script
        script: String,

        /// Path to effect configuration
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to run (default: until the last burst settles)
        #[arg(long)]
        frames: Option<u64>,

        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Print every Nth frame in text output
        #[arg(long, default_value = "10")]
        every: u64,
    },

    /// Replay a session script and save one frame as a PNG
    Render {
        /// Path to session script
        script: String,

        /// Frame index to capture
        #[arg(long)]
        frame: u64,

        /// Output PNG path
        #[arg(short, long, default_value = "frame.png")]
        output: String,

        /// Path to effect configuration
        #[arg(long)]
        config: Option<String>,

        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u32>,

        /// Background colour (#rrggbb); transparent when omitted
        #[arg(long)]
        background: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, force } => init::run(&dir, force),
        Commands::Simulate {
            script,
            config,
            frames,
            seed,
            format,
            every,
        } => simulate::run(simulate::SimulateArgs {
            script,
            config,
            frames,
            seed,
            format,
            every,
        }),
        Commands::Render {
            script,
            frame,
            output,
            config,
            seed,
            background,
        } => render::run(render::RenderArgs {
            script,
            frame,
            output,
            config,
            seed,
            background,
        }),
    }
}
