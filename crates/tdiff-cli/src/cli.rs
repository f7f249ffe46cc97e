use std::path::PathBuf;

use clap::Parser;
use tdiff_engine::CleanupProfile;

#[derive(Parser, Debug)]
#[command(
    name = "tdiff",
    about = "Character and line level text diff with human-oriented cleanup",
    version
)]
pub struct Cli {
    /// Old file, or old text with --strings
    pub old: String,
    /// New file, or new text with --strings
    pub new: String,

    /// Treat OLD and NEW as literal text instead of paths
    #[arg(short, long)]
    pub strings: bool,

    /// TOML file with diff options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Time budget for the search in milliseconds
    #[arg(long, value_name = "MS", conflicts_with = "no_timeout")]
    pub timeout_ms: Option<u64>,

    /// Search without a time budget
    #[arg(long)]
    pub no_timeout: bool,

    /// Skip the line-level pre-pass
    #[arg(long)]
    pub no_line_mode: bool,

    /// Cleanup profile: none, merge, semantic, lossless or efficiency
    #[arg(long, value_name = "PROFILE")]
    pub cleanup: Option<CleanupProfile>,

    /// Edit cost used by the efficiency profile
    #[arg(long, value_name = "N")]
    pub edit_cost: Option<usize>,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Print edit distance and operation counts
    #[arg(long)]
    pub stats: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Delta,
    Views,
}
