//! Shared components for CLI commands
//!
//! Logging setup, configuration resolution, and render summaries used across
//! the command implementations.

use crate::app::services::report_builder::RenderStats;
use crate::config::{default_data_dir, Config};
use crate::Result;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

/// Set up structured logging on stderr
///
/// The filter defaults to `synoptic_renderer=<level>` and is overridable via
/// `RUST_LOG`. Quiet mode drops timestamps and targets for compact output.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("synoptic_renderer={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Resolve the data directory: the CLI argument, or the platform default
pub fn resolve_data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.unwrap_or_else(default_data_dir)
}

/// Build and validate the render configuration from resolved arguments
pub fn build_config(
    data_dir: Option<PathBuf>,
    output_root: Option<PathBuf>,
    show_progress: bool,
) -> Result<Config> {
    let mut config = Config::new(
        resolve_data_dir(data_dir),
        output_root.unwrap_or_else(|| PathBuf::from(crate::constants::DEFAULT_OUTPUT_DIR)),
    );
    config.show_progress = show_progress;
    config.validate()?;
    Ok(config)
}

/// Print a render pass summary to stdout
pub fn print_render_summary(stats: &RenderStats) {
    println!();
    println!("{}", "Render pass complete".green().bold());
    println!("  Groups rendered:   {}", stats.groups_rendered);
    println!("  Stations rendered: {}", stats.stations_rendered);
    println!("  Charts rendered:   {}", stats.charts_rendered);
    println!("  Documents written: {}", stats.documents_written);
    println!(
        "  Output size:       {}",
        RenderStats::format_size(stats.total_output_size())
    );
    println!("  Elapsed:           {:.2?}", stats.render_time);
}
