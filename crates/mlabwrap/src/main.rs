//! mlabwrap - MATLAB toolchain discovery for the mlabraw extension
//!
//! Finds a MATLAB installation, asks it for its version and architecture and
//! prints the compiler and linker settings needed to build `mlabraw`.

mod cli;
mod commands;
mod output;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    // Everything but `version` needs configuration and a platform profile
    let context = || Context::load(cli.config.as_deref(), cli.matlab_root.clone());

    match cli.command {
        Commands::Version(args) => commands::version::run(args),
        Commands::Locate => commands::locate::run(&context()?),
        Commands::Info(args) => commands::info::run(args, &context()?),
        Commands::Plan(args) => commands::plan::run(args, &context()?),
    }
}

/// Initialize tracing with appropriate verbosity. Logs go to stderr so
/// stdout stays clean for plan output.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
