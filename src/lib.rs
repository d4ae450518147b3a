//! fs-search - Cached File and Directory Search
//!
//! Lists the files and directories under a base path, skipping excluded
//! extensions and pruning excluded directory names. Results are cached on disk
//! keyed by the search parameters, and reused for as long as the base path's
//! modification time is unchanged.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod search;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use yansi::{Condition, Paint};

use crate::cache::CacheStore;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::search::{ensure_compatible_modes, SearchOptions, SearchParameters, SearchService};

/// Run one invocation of the command-line application.
///
/// # Errors
///
/// Returns the first error encountered. [`ExitCode::from_error`] maps it to
/// the process exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    } else {
        yansi::whenever(Condition::TTY_AND_COLOR);
    }

    ensure_compatible_modes(cli.files_only, cli.folders_only)?;

    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(path),
        None => Config::load(),
    };
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let mut service = open_service(&config, cli.clear_cache)?;

    let params = SearchParameters::resolve(
        &cli.base_path,
        &config.exclude,
        config.exclude_dirs.iter().cloned(),
        cli.files_only,
        cli.folders_only,
    )?;

    if !cli.quiet {
        eprintln!("{} {}", "Searching in:".bold(), params.base_path().green());
    }

    if !cli.quiet && !cli.no_progress {
        service = service.with_progress_callback(Arc::new(Progress::new()));
    }

    let options = SearchOptions {
        use_cache: config.use_cache,
        force_refresh: cli.remake,
    };
    let outcome = service.search(&params, options)?;
    log::info!(
        "Found {} entries (cache {})",
        outcome.results.len(),
        outcome.status
    );

    let results = if config.relative {
        output::to_relative(&outcome.results, params.base_path().as_path())
    } else {
        outcome.results
    };

    match cli.output_file {
        Some(ref path) => {
            output::save_results(path, &results)?;
            output::display_total(&mut io::stdout().lock(), results.len())?;
            if !cli.quiet {
                eprintln!("Results written to {}", path.display().cyan());
            }
        }
        None => output::display_results(&mut io::stdout().lock(), &results)?,
    }

    if !cli.quiet {
        eprintln!("{}", "Search completed!".green().bold());
    }

    Ok(ExitCode::Success)
}

/// Build the search service, touching the cache location only when it is
/// needed: caching is enabled or the cache is to be cleared.
fn open_service(config: &Config, clear_cache: bool) -> Result<SearchService> {
    if !config.use_cache && !clear_cache {
        return Ok(SearchService::without_cache());
    }

    let store = CacheStore::new(config.cache_file_path()?);
    if clear_cache {
        store.clear()?;
    }
    if config.use_cache {
        Ok(SearchService::new(store))
    } else {
        Ok(SearchService::without_cache())
    }
}
