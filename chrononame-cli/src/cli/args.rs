use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Rename files by their true timestamps, with an auditable rollback log
#[derive(Parser, Debug)]
#[command(name = "chrononame")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "CHRONONAME_YES")]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview the rename plan for a directory without touching anything
    Plan {
        /// Target directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Descend into subdirectories (default from config)
        #[arg(long, overrides_with = "no_recursive")]
        recursive: bool,

        /// Only consider the directory's immediate files
        #[arg(long = "no-recursive", overrides_with = "recursive")]
        no_recursive: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Execute the rename plan and record it in the log
    Execute {
        /// Target directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Descend into subdirectories (default from config)
        #[arg(long, overrides_with = "no_recursive")]
        recursive: bool,

        /// Only consider the directory's immediate files
        #[arg(long = "no-recursive", overrides_with = "recursive")]
        no_recursive: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Reverse the most recent batch of renames from the log
    Rollback {
        /// Target directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}

/// Resolve the pair of recursion flags against the configured default.
pub fn effective_recursive(recursive: bool, no_recursive: bool, default: bool) -> bool {
    if recursive {
        true
    } else if no_recursive {
        false
    } else {
        default
    }
}
