//! Result presentation.
//!
//! Results are either printed to the terminal, one colored path per line
//! followed by a total, or written to a plain text file with one path per
//! line and nothing else. The total is printed in both cases.
//!
//! # Example
//!
//! ```no_run
//! use fs_search::output::{display_results, to_relative};
//! use std::path::Path;
//!
//! let results = vec!["/srv/data/a.txt".to_string()];
//! let relative = to_relative(&results, Path::new("/srv/data"));
//! display_results(&mut std::io::stdout(), &relative).unwrap();
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use yansi::Paint;

/// Print `results` followed by a "Total found" line.
///
/// Colors follow the global `yansi` setting, so callers that disabled color
/// get plain text.
///
/// # Errors
///
/// Returns any error from writing to `writer`.
pub fn display_results<W: Write>(writer: &mut W, results: &[String]) -> io::Result<()> {
    for path in results {
        writeln!(writer, "{}", path.cyan())?;
    }
    display_total(writer, results.len())
}

/// Print the "Total found" line on its own.
///
/// # Errors
///
/// Returns any error from writing to `writer`.
pub fn display_total<W: Write>(writer: &mut W, total: usize) -> io::Result<()> {
    let line = format!("Total found: {}", total);
    writeln!(writer, "{}", line.magenta().bold())
}

/// Write `results` to the file at `path`, one per line, replacing any
/// existing content.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn save_results(path: &Path, results: &[String]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for result in results {
        writeln!(writer, "{}", result)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    log::info!("Saved {} results to {}", results.len(), path.display());
    Ok(())
}

/// Rewrite `results` relative to `base`.
///
/// Paths that do not lie under `base` are returned unchanged.
#[must_use]
pub fn to_relative(results: &[String], base: &Path) -> Vec<String> {
    results
        .iter()
        .map(|result| match Path::new(result).strip_prefix(base) {
            Ok(relative) => relative.to_string_lossy().into_owned(),
            Err(_) => result.clone(),
        })
        .collect()
}
