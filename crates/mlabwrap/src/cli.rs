//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mlabwrap_build::PlanFormat;

/// mlabwrap - locate MATLAB and plan the mlabraw extension build
#[derive(Parser, Debug)]
#[command(name = "mlabwrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to mlabwrap.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// MATLAB installation root; skips discovery
    #[arg(long, global = true, env = "MATLAB_ROOT")]
    pub matlab_root: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the MATLAB installation root without running MATLAB
    Locate,

    /// Run MATLAB and show its version, release and architecture
    Info(InfoArgs),

    /// Print the extension build plan
    Plan(PlanArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = InfoFormat::Human)]
    pub format: InfoFormat,
}

/// Output format for `info`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InfoFormat {
    /// Aligned key/value listing
    Human,
    Json,
    Yaml,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = PlanFormatArg::Human)]
    pub format: PlanFormatArg,

    /// Write the plan to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
}

/// Output format for `plan`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormatArg {
    /// Readable listing
    Human,
    Json,
    Yaml,
    /// One compiler/linker flag per line
    Flags,
}

impl PlanFormatArg {
    /// Convert the CLI format to the renderer's format
    pub fn to_plan_format(self) -> PlanFormat {
        match self {
            PlanFormatArg::Human => PlanFormat::Human,
            PlanFormatArg::Json => PlanFormat::Json,
            PlanFormatArg::Yaml => PlanFormat::Yaml,
            PlanFormatArg::Flags => PlanFormat::Flags,
        }
    }
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
