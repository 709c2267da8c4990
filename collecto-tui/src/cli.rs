//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::logging::Verbosity;

#[derive(Debug, Parser)]
#[command(
    name = "collecto",
    version,
    about = "Waste collection days and sorting help for the communes of your metropolis"
)]
pub(crate) struct Cli {
    /// Configuration file (default: ./collecto.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Zone dataset to use instead of the configured or bundled one
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// More log output (repeat for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub(crate) enum Command {
    /// Browse communes interactively (default)
    Tui,
    /// List the communes in the dataset
    Communes,
    /// Show the collection days of a commune
    Info {
        /// Commune name, any case
        commune: String,
    },
    /// Show the collection days of the commune nearest to a position
    Near {
        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Show the collection days at the configured device position
    Locate,
    /// Recommend a bin for an item and count it in the statistics
    Sort {
        /// Item label, e.g. "plastic bottle"
        #[arg(required = true, num_args = 1..)]
        label: Vec<String>,
    },
    /// Show the tip of the day
    Tips {
        /// Show every tip instead
        #[arg(long)]
        all: bool,
    },
    /// Show how many items were sorted
    Stats,
}

impl Cli {
    pub(crate) fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    pub(crate) fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }
}
