//! Output tree writer
//!
//! Writes render context documents as pretty-printed UTF-8 JSON under the
//! output root:
//!
//! ```text
//! <root>/<slug>/index.json
//! <root>/<slug>/station/<station_id>/index.json
//! <root>/<slug>/chart/<timeseries_id>.json
//! ```

use super::context::{ChartContext, GroupContext, StationContext};
use crate::constants::{
    chart_filename, CHART_OUTPUT_DIR, GROUP_INDEX_FILENAME, STATION_INDEX_FILENAME,
    STATION_OUTPUT_DIR,
};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writer for the rendered JSON tree
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_root: PathBuf,
}

impl ReportWriter {
    /// Create a writer rooted at the output directory
    pub fn new(output_root: &Path) -> Self {
        Self {
            output_root: output_root.to_path_buf(),
        }
    }

    /// The output root
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Write a group overview document; returns (relative path, bytes)
    pub fn write_group_context(&self, context: &GroupContext) -> Result<(String, u64)> {
        let relative = format!("{}/{}", context.slug, GROUP_INDEX_FILENAME);
        let bytes = self.write_document(&relative, context)?;
        Ok((relative, bytes))
    }

    /// Write a per-station context document; returns (relative path, bytes)
    pub fn write_station_context(&self, context: &StationContext) -> Result<(String, u64)> {
        let relative = format!(
            "{}/{}/{}/{}",
            context.group_slug, STATION_OUTPUT_DIR, context.station_id, STATION_INDEX_FILENAME
        );
        let bytes = self.write_document(&relative, context)?;
        Ok((relative, bytes))
    }

    /// Write a chart data document; returns (relative path, bytes)
    pub fn write_chart(&self, group_slug: &str, chart: &ChartContext) -> Result<(String, u64)> {
        let relative = format!(
            "{}/{}/{}",
            group_slug,
            CHART_OUTPUT_DIR,
            chart_filename(chart.timeseries_id)
        );
        let bytes = self.write_document(&relative, chart)?;
        Ok((relative, bytes))
    }

    /// Serialize a document and write it below the output root
    ///
    /// Documents are always UTF-8, regardless of the system locale.
    fn write_document<T: Serialize>(&self, relative: &str, document: &T) -> Result<u64> {
        let path = self.output_root.join(relative);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create {}", parent.display()), e)
            })?;
        }

        let mut serialized = serde_json::to_vec_pretty(document)?;
        serialized.push(b'\n');
        let bytes = serialized.len() as u64;

        std::fs::write(&path, serialized)
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

        debug!("Wrote {} ({} bytes)", path.display(), bytes);
        Ok(bytes)
    }
}
