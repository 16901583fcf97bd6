use clap::Parser;
use std::process;
use synoptic_renderer::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command until it completes or the user interrupts
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(synoptic_renderer::Error::render_interrupted(
                    "Rendering interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - summaries have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Synoptic Renderer - Static Dashboard Generator");
    println!("==============================================");
    println!();
    println!("Groups monitoring stations into synoptic groups and renders static");
    println!("dashboard context summarizing their latest measurements.");
    println!();
    println!("USAGE:");
    println!("    synoptic-renderer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    render      Run a render pass over the synoptic groups (main command)");
    println!("    groups      Report the configured groups and their stations");
    println!("    validate    Check configuration integrity and measurement data files");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Render every configured group:");
    println!("    synoptic-renderer render --data /var/lib/synoptic/data --output /srv/www/synoptic");
    println!();
    println!("    # Re-render two groups every five minutes:");
    println!("    synoptic-renderer render --groups arta,acheloos --interval 300");
    println!();
    println!("    # Report the configuration with per-station freshness:");
    println!("    synoptic-renderer groups --detailed");
    println!();
    println!("    # Check the configuration and measurement files:");
    println!("    synoptic-renderer validate --data /var/lib/synoptic/data");
    println!();
    println!("For detailed help on any command, use:");
    println!("    synoptic-renderer <COMMAND> --help");
}
