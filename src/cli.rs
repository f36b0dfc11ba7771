use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "avmeta")]
#[command(
    author,
    version,
    about = "Convert NFO metadata next to videos into Video Station .vsmeta sidecars"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every NFO file under a directory into .vsmeta sidecars
    Nfo {
        /// Directory to scan (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Number of items converted at once
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,

        /// Do not download missing poster/fanart images
        #[arg(long)]
        no_artwork: bool,
    },

    /// List matched NFO/video pairs without writing anything
    Scan {
        /// Directory to scan (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Parse each NFO and print this template, e.g. "{number} {title}"
        #[arg(long)]
        format: Option<String>,
    },

    /// Decode a .vsmeta file and print its contents
    Inspect {
        /// Sidecar to decode
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
