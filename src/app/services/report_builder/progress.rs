//! Progress reporting for render passes
//!
//! Wraps an optional progress bar so the builder can report per-station
//! advancement without branching on quiet mode at every call site.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Progress reporter over the stations of a render pass
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter; `enabled = false` makes every call a no-op
    pub fn new(enabled: bool, total_stations: usize) -> Self {
        if !enabled {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new(total_stations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} stations | {msg}",
                )
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        pb.set_message("Rendering");

        debug!("Progress bar initialized for {} stations", total_stations);
        Self {
            progress_bar: Some(pb),
        }
    }

    /// Name the group currently being rendered
    pub fn set_group(&self, slug: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(format!("Rendering group '{}'", slug));
        }
    }

    /// Record one completed station
    pub fn station_done(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
    }

    /// Finish reporting with a completion message
    pub fn finish(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }
}
