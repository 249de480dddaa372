//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Turn an indented plain-text outline into a directory tree of Markdown documents
#[derive(Parser, Debug)]
#[command(name = "outline-docs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Outline file (one entry per line, nesting by indentation)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output base directory (created if missing)
    #[arg(value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Delete dots and strip leading digits from names
    #[arg(long)]
    pub remove_digits: bool,

    /// Make leaves directories when a sibling has children
    #[arg(long)]
    pub allow_empty_folders: bool,

    /// Maximum characters per generated name (extension excluded)
    #[arg(long, value_name = "N")]
    pub max_name_length: Option<usize>,

    /// Print every node id with its output path
    #[arg(long)]
    pub print_map: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the parsed outline as tree
    Tree {
        /// Outline file
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
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
    Show {
        /// Directory whose local config is merged (default: cwd)
        #[arg(value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
