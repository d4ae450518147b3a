//! Command-line interface definitions for fs-search.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # List everything under the current directory
//! fs-search
//!
//! # Files only, skipping logs and node_modules
//! fs-search -b ~/project -f -e log -E node_modules
//!
//! # Force a fresh walk and write relative paths to a file
//! fs-search -b ~/project --remake -r -o results.txt
//!
//! # Verbose mode for debugging
//! fs-search -v -b ~/project
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Search files and directories.
///
/// Walks a directory tree, skipping excluded extensions and directories, and
/// caches the results so an unchanged tree is not walked twice.
#[derive(Debug, Parser)]
#[command(name = "fs-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base path to start the search
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub base_path: PathBuf,

    /// File extensions to exclude (e.g., .log); can be repeated
    #[arg(short = 'e', long = "exclude", value_name = "EXT")]
    pub exclude: Vec<String>,

    /// Directory names to exclude (e.g., node_modules); can be repeated
    #[arg(short = 'E', long = "exclude-dirs", value_name = "DIR")]
    pub exclude_dirs: Vec<String>,

    /// Search only files
    #[arg(short, long)]
    pub files_only: bool,

    /// Search only folders
    #[arg(short = 'd', long)]
    pub folders_only: bool,

    /// File to save the results to instead of printing them
    #[arg(short, long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Display paths relative to the base path
    #[arg(short, long)]
    pub relative: bool,

    /// Path to the result cache file
    ///
    /// If not specified, a default platform-specific path is used.
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Disable result caching; the cache file is neither read nor written
    #[arg(long, conflicts_with_all = ["cache", "remake", "clear_cache"])]
    pub no_cache: bool,

    /// Discard cached results for this search and walk again
    #[arg(long)]
    pub remake: bool,

    /// Clear the whole result cache before searching
    #[arg(long)]
    pub clear_cache: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and results
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Do not show the progress spinner while walking
    #[arg(long)]
    pub no_progress: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
