//! Command-line arguments.

use std::path::PathBuf;

use binclock_core::{DisplayMode, TimeComponents};
use clap::{Parser, ValueEnum};

/// Binary-coded-decimal clock for the terminal
#[derive(Parser, Debug)]
#[command(name = "binclock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output layout [default: emoji, or `display.mode` from the config file]
    #[arg(long, value_enum)]
    pub display: Option<DisplayArg>,

    /// Refresh continuously until Ctrl+C
    #[arg(long = "loop")]
    pub looping: bool,

    /// Show this time of day instead of the host clock
    #[arg(long, value_name = "HH:MM:SS")]
    pub time: Option<TimeComponents>,

    /// Path to a YAML configuration file
    #[arg(short, long, env = "BINCLOCK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Display layout selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayArg {
    /// Moon emojis (🌚 off, 🌝 on)
    Emoji,
    /// 0s and 1s
    Binary,
    /// JSON object with bit arrays
    Json,
    /// One line per refresh
    Compact,
    /// Per-digit bit counts, values, and bits
    Raw,
}

impl From<DisplayArg> for DisplayMode {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Emoji => Self::Emoji,
            DisplayArg::Binary => Self::Binary,
            DisplayArg::Json => Self::Json,
            DisplayArg::Compact => Self::Compact,
            DisplayArg::Raw => Self::Raw,
        }
    }
}
