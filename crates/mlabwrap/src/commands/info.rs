//! Info command - query MATLAB for its version and architecture

use std::path::PathBuf;

use anyhow::Result;
use mlabwrap_core::{HostOs, ProductMetadata};
use serde::Serialize;

use super::Context;
use crate::cli::{InfoArgs, InfoFormat};
use crate::output;

/// Metadata plus where it came from
#[derive(Debug, Serialize)]
struct InfoReport {
    root: PathBuf,
    platform: HostOs,
    #[serde(flatten)]
    metadata: ProductMetadata,
}

pub fn run(args: InfoArgs, context: &Context) -> Result<()> {
    let (root, metadata) = context.resolve()?;
    let report = InfoReport {
        root,
        platform: context.profile.os(),
        metadata,
    };

    match args.format {
        InfoFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        InfoFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&report)?),
        InfoFormat::Human => print_human(&report, context),
    }

    Ok(())
}

fn print_human(report: &InfoReport, context: &Context) {
    output::header(&report.metadata.to_string());
    output::kv("Root", &report.root.display().to_string());
    output::kv("Version", &report.metadata.version.to_string());
    output::kv("Release", &report.metadata.release);
    output::kv("Architecture", report.metadata.arch.as_str());
    output::kv(
        "Library subdirectory",
        &context.profile.arch_subdir(report.metadata.arch),
    );
    output::kv("Platform", &report.platform.to_string());
}
