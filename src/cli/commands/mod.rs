//! Command implementations for the synoptic renderer CLI
//!
//! Each command is implemented in its own module; shared helpers (logging
//! setup, configuration resolution, summaries) live in `shared`.

pub mod groups;
pub mod render;
pub mod shared;
pub mod validate;

use crate::app::services::report_builder::RenderStats;
use crate::cli::args::{Args, Commands};
use crate::Result;

/// Main command runner for the synoptic renderer
///
/// Dispatches to the subcommand handler based on CLI args:
/// - `render`: run the render pass (optionally on an interval)
/// - `groups`: registry report
/// - `validate`: configuration and data file checking
pub async fn run(args: Args) -> Result<RenderStats> {
    match args.command {
        Some(Commands::Render(render_args)) => render::run_render(render_args).await,
        Some(Commands::Groups(groups_args)) => groups::run_groups(groups_args).await,
        Some(Commands::Validate(validate_args)) => validate::run_validate(validate_args).await,
        None => Ok(RenderStats::default()),
    }
}
