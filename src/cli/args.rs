//! Command-line argument definitions for the synoptic renderer
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the synoptic renderer
///
/// Renders static dashboard context for hydrological and meteorological
/// station networks: group overviews, per-station latest measurements, and
/// chart data, written as JSON documents for a downstream template renderer.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "synoptic-renderer",
    version,
    about = "Render static synoptic dashboards for monitoring station networks",
    long_about = "Groups monitoring stations into synoptic groups, evaluates the freshness of \
                  their latest measurements against per-group thresholds, and renders static \
                  dashboard context (JSON documents plus chart data) for a downstream template \
                  renderer and plotter."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the synoptic renderer
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run a render pass over the synoptic groups (main command)
    Render(RenderArgs),
    /// Report the configured groups and their stations
    Groups(GroupsArgs),
    /// Check configuration integrity and measurement data files
    Validate(ValidateArgs),
}

/// Arguments for the render command
#[derive(Debug, Clone, Parser)]
pub struct RenderArgs {
    /// Data directory holding synoptic.toml, stations.toml, timeseries.toml
    /// and the timeseries/ measurement files.
    /// If not specified, defaults to the platform data directory.
    #[arg(
        short = 'i',
        long = "data",
        value_name = "PATH",
        help = "Data directory with configuration and measurement files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Output root for the rendered JSON tree
    ///
    /// Will be created if it doesn't exist. If not specified, defaults to
    /// ./synoptic
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output root for the rendered JSON tree"
    )]
    pub output_root: Option<PathBuf>,

    /// Specific groups to render (comma-separated slugs)
    ///
    /// If not specified, every configured group is rendered.
    #[arg(
        short = 'g',
        long = "groups",
        value_name = "LIST",
        help = "Comma-separated list of group slugs to render"
    )]
    pub groups: Option<GroupList>,

    /// Repeat the render pass periodically
    ///
    /// Runs one pass immediately and then again every N seconds until
    /// interrupted. Each pass reloads the configuration.
    #[arg(
        long = "interval",
        value_name = "SECONDS",
        help = "Repeat the render pass every N seconds"
    )]
    pub interval: Option<u64>,

    /// Show what would be rendered without writing any output
    #[arg(
        long = "dry-run",
        help = "Show what would be rendered without writing output"
    )]
    pub dry_run: bool,

    /// Disable the progress bar
    #[arg(long = "no-progress", help = "Disable the progress bar")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short = 'q', long = "quiet", help = "Suppress non-error output")]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Log level"
    )]
    pub log_level: String,
}

impl RenderArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        if self.interval == Some(0) {
            return Err(Error::configuration(
                "--interval must be at least 1 second",
            ));
        }

        validate_log_level(&self.log_level)
    }

    /// Whether the progress bar should be displayed
    pub fn show_progress(&self) -> bool {
        !self.no_progress && !self.quiet
    }

    /// The selected group slugs, if any
    pub fn get_groups(&self) -> Option<Vec<String>> {
        self.groups.as_ref().map(|list| list.0.clone())
    }
}

/// Arguments for the groups command
#[derive(Debug, Clone, Parser)]
pub struct GroupsArgs {
    /// Data directory holding the configuration files
    #[arg(
        short = 'i',
        long = "data",
        value_name = "PATH",
        help = "Data directory with configuration and measurement files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Output format for the report
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format"
    )]
    pub format: OutputFormat,

    /// Include per-station freshness evaluated against the current time
    #[arg(long = "detailed", help = "Include per-station freshness")]
    pub detailed: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level"
    )]
    pub log_level: String,
}

impl GroupsArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        validate_log_level(&self.log_level)
    }
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Data directory holding the configuration files
    #[arg(
        short = 'i',
        long = "data",
        value_name = "PATH",
        help = "Data directory with configuration and measurement files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level"
    )]
    pub log_level: String,
}

impl ValidateArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> Result<()> {
        validate_log_level(&self.log_level)
    }
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Machine-readable JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// A comma-separated list of group slugs
#[derive(Debug, Clone)]
pub struct GroupList(pub Vec<String>);

impl FromStr for GroupList {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let slugs: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
            .collect();

        if slugs.is_empty() {
            return Err("expected at least one group slug".to_string());
        }

        Ok(GroupList(slugs))
    }
}

fn validate_log_level(level: &str) -> Result<()> {
    match level {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
        other => Err(Error::configuration(format!(
            "Invalid log level '{}': expected error, warn, info, debug or trace",
            other
        ))),
    }
}
