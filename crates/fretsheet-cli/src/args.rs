//! Command-line argument definitions for the Fretsheet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input sheet, output path and
//! configuration file, override the sheet's display options, and control
//! logging verbosity.

use clap::Parser;

/// Command-line arguments for the Fretsheet chord sheet renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input chord sheet (TOML)
    #[arg(help = "Path to the input sheet")]
    pub input: String,

    /// Path to the output SVG file. Multi-page sheets write one file per
    /// page with the page number appended to the file stem.
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Draw diagrams mirrored for left-handed players
    #[arg(long)]
    pub mirror: bool,

    /// Print the sounding note under each string
    #[arg(long)]
    pub notes: bool,

    /// Hide finger numbers inside the dots
    #[arg(long)]
    pub no_fingers: bool,
}
