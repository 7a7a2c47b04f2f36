//! WAR command line tools

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{check_config, inspect, keys, render};

#[derive(Parser)]
#[command(name = "war")]
#[command(about = "Headless tools for WAR projects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a war.lua configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a project to a WAV file
    Render {
        /// Project file
        project: PathBuf,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Override the project bpm
        #[arg(long)]
        bpm: Option<f64>,

        /// Waveform (sine, saw, square, triangle, noise)
        #[arg(long, default_value = "sine")]
        waveform: String,

        /// Write 32-bit float samples instead of 16-bit PCM
        #[arg(long)]
        float: bool,
    },

    /// Print note and layer statistics for a project
    Inspect {
        /// Project file
        project: PathBuf,
    },

    /// Drive the editor with a key sequence
    Keys {
        /// Project file to start from, omit for an empty roll
        project: Option<PathBuf>,

        /// Key sequence in vim notation, e.g. "3z<space>hiv"
        #[arg(short, long)]
        keys: String,

        /// Write the resulting project here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the Lua config and print the effective values
    CheckConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = war_config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            project,
            output,
            bpm,
            waveform,
            float,
        } => render::run(&config, &project, &output, bpm, &waveform, float),
        Commands::Inspect { project } => inspect::run(&project),
        Commands::Keys {
            project,
            keys,
            output,
        } => keys::run(&config, project.as_deref(), &keys, output.as_deref()),
        Commands::CheckConfig => check_config::run(&config),
    }
}
