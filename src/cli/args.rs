//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Coloured trees with propagated dominant colour
#[derive(Parser, Debug)]
#[command(name = "colourtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Extra config file layered over the global one
    #[arg(short, long, global = true, env = "COLOURTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Verify tree invariants after every mutating statement
    #[arg(long, global = true)]
    pub verify_each: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a tree script
    Run {
        /// Script file
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Run a bundled demo script
    Demo {
        /// Demo name (reference, swap)
        #[arg(default_value = "reference")]
        name: String,

        /// Print the script instead of running it
        #[arg(long)]
        print: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
