//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// In-memory course catalog: load course records, look them up, list them in order
#[derive(Parser, Debug)]
#[command(name = "coursetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default)
    Menu {
        /// Course data to load before the first prompt
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print every course in identifier order
    List {
        /// Course data
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print one course
    Show {
        /// Course data
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Course identifier, e.g. CSCI200
        id: String,
    },

    /// Show the catalog's tree shape
    Tree {
        /// Course data
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Time the catalog against Vec and HashMap baselines
    Bench {
        /// Course data (default: synthetic dataset)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Runs averaged per strategy (default: bench_repeat setting)
        #[arg(short, long)]
        repeat: Option<usize>,
        /// Size of the synthetic dataset
        #[arg(short, long, default_value_t = 1000, conflicts_with = "file")]
        size: usize,
        /// Synthetic sizes to compare, e.g. 100,1000,5000
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["file", "size"])]
        sizes: Vec<usize>,
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

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
