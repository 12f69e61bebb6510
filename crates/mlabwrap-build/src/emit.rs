//! Build plan rendering
//!
//! Renders a [`BuildPlan`] for people (human), for tooling (JSON, YAML) or
//! as compiler and linker flags that build scripts can splice into a
//! command line.

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use mlabwrap_core::Result;

use crate::plan::BuildPlan;

/// Output format for a build plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFormat {
    /// Human-readable listing
    #[default]
    Human,
    /// JSON for machine consumption
    Json,
    /// YAML for machine consumption
    Yaml,
    /// One compiler/linker flag per line
    Flags,
}

/// Build plan renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanEmitter {
    color: bool,
}

impl PlanEmitter {
    /// Create an emitter; `color` enables ANSI styling of human output
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render the plan
    pub fn render(&self, plan: &BuildPlan, format: PlanFormat) -> Result<String> {
        match format {
            PlanFormat::Human => Ok(self.render_human(plan)),
            PlanFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
            PlanFormat::Yaml => Ok(serde_yaml_ng::to_string(plan)?),
            PlanFormat::Flags => Ok(render_flags(plan)),
        }
    }

    fn render_human(&self, plan: &BuildPlan) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            self.heading("Extension:"),
            plan.extension_name
        ));
        output.push_str(&self.list("Sources", plan.sources.iter().map(String::as_str)));
        output.push_str(&self.list("Include directories", display_paths(&plan.include_dirs)));
        output.push_str(&self.list("Library directories", display_paths(&plan.library_dirs)));
        output.push_str(&self.list(
            "Runtime library directories",
            display_paths(&plan.runtime_library_dirs),
        ));
        output.push_str(&self.list("Libraries", plan.libraries.iter().map(String::as_str)));

        let defines: Vec<String> = plan.define_macros.iter().map(|m| m.to_string()).collect();
        output.push_str(&self.list("Defines", defines.iter().map(String::as_str)));

        output
    }

    fn list<I, S>(&self, title: &str, items: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut section = format!("{}\n", self.heading(&format!("{}:", title)));
        let mut empty = true;
        for item in items {
            empty = false;
            section.push_str(&format!("  {}\n", item.as_ref()));
        }
        if empty {
            section.push_str(&format!("  {}\n", self.dim("(none)")));
        }
        section
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> impl Iterator<Item = String> + '_ {
    paths.iter().map(|p| p.display().to_string())
}

fn render_flags(plan: &BuildPlan) -> String {
    let mut flags: Vec<String> = Vec::new();
    flags.extend(plan.include_dirs.iter().map(|d| path_flag("-I", d)));
    flags.extend(plan.library_dirs.iter().map(|d| path_flag("-L", d)));
    flags.extend(
        plan.runtime_library_dirs
            .iter()
            .map(|d| path_flag("-Wl,-rpath,", d)),
    );
    flags.extend(plan.libraries.iter().map(|l| format!("-l{}", l)));
    flags.extend(plan.define_macros.iter().map(|m| format!("-D{}", m)));

    let mut output = flags.join("\n");
    output.push('\n');
    output
}

fn path_flag(prefix: &str, path: &Path) -> String {
    format!("{}{}", prefix, path.display())
}
