//! Render statistics for reporting

use std::time::Duration;

/// Statistics of one render pass
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Number of groups rendered
    pub groups_rendered: usize,

    /// Number of stations rendered
    pub stations_rendered: usize,

    /// Number of chart documents written
    pub charts_rendered: usize,

    /// Total number of documents written
    pub documents_written: usize,

    /// Wall-clock time of the pass
    pub render_time: Duration,

    /// Written document sizes in bytes, by relative path
    pub output_sizes: Vec<(String, u64)>,
}

impl RenderStats {
    /// Total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format a size in human-readable form
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
