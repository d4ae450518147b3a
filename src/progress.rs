//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to display a live spinner while a directory walk is
//! running. Cache hits never start a walk, so nothing is drawn for them.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for directory walks.
///
/// Implement this trait to observe a walk as it happens. Callbacks run inline
/// on the walking thread and must not assume anything about ordering beyond
/// the walk order itself.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "walking")
    /// * `total` - Total number of items to process, or 0 if unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each emitted entry.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of entries emitted so far (1-based)
    /// * `path` - Path that was just emitted
    fn on_progress(&self, current: usize, path: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Spinner-based progress reporter drawn on stderr.
#[derive(Default)]
pub struct Progress {
    walking: Mutex<Option<ProgressBar>>,
}

impl Progress {
    /// Create a new progress reporter. Nothing is drawn until a walk starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use fs_search::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} entries")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.walking.lock() {
            if let Some(ref pb) = *guard {
                f(pb);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, _total: usize) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::walking_style());
        pb.set_message(format!("{} directory", capitalize(phase)));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut walking) = self.walking.lock() {
            *walking = Some(pb);
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        self.with_bar(|pb| {
            pb.set_position(current as u64);
            pb.set_message(truncate_path(path, 40));
        });
    }

    fn on_phase_end(&self, _phase: &str) {
        if let Ok(mut walking) = self.walking.lock() {
            if let Some(pb) = walking.take() {
                pb.finish_and_clear();
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate a path for display in the spinner line.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{}", tail);
    }

    format!(".../{}", file_name)
}
