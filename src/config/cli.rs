use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Path to a feed configuration file; built-in defaults are used when omitted
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Directory for the manifest and persisted user state
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Seed for the normalizer's randomized defaults
    #[clap(long, env = "GAMEHUB_SEED")]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate the feeds, launch a game, and record it as recently played
    Play { title: String },
    /// Toggle a like for a title (clears a standing dislike)
    Like { title: String },
    /// Toggle a dislike for a title (clears a standing like)
    Dislike { title: String },
    /// Toggle a favorite for a title
    Favorite { title: String },
    /// Show the recently played history
    Recent,
    /// File a problem report for a title
    Report {
        title: String,
        reason: String,
        details: String,
    },
}
