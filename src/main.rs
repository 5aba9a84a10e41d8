mod app;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ecopet")]
#[command(about = "A pet that grows when you log eco-actions")]
pub(crate) struct Cli {
    /// Directory holding the pet, history and settings files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Force monochrome output
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Show the pet (applies any pending mood decay)
    Status,
    /// Log an eco-action: recycle, walk or energySave
    Log {
        action: String,
        /// Free-form qualifier shown in history, e.g. "Long walk"
        #[arg(long)]
        detail: Option<String>,
    },
    /// Start over with a fresh egg
    Reset {
        /// Also wipe the action history
        #[arg(long, default_value_t = false)]
        clear_history: bool,
    },
    /// List logged actions, newest first
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show earned and locked achievements
    Achievements,
    /// Show cumulative environmental impact
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    app::run(Cli::parse())
}
