//! Plan command - emit the extension build plan

use std::fs;

use anyhow::{Context as _, Result};
use mlabwrap_build::{BuildPlanBuilder, PlanEmitter, PlanFormat};

use super::Context;
use crate::cli::PlanArgs;
use crate::output;

pub fn run(args: PlanArgs, context: &Context) -> Result<()> {
    let (root, metadata) = context.resolve()?;

    let plan = BuildPlanBuilder::new(context.profile, context.invoker())
        .with_config(context.config.build().clone())
        .build(&root, &metadata, |name| context.env_var(name))?;

    let format = args.format.to_plan_format();

    match &args.output {
        Some(path) => {
            let rendered = PlanEmitter::new(false).render(&plan, format)?;
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write build plan to {}", path))?;
            output::success(&format!("Wrote build plan for {} to {}", metadata, path));
        }
        None => {
            let color = format == PlanFormat::Human && console::colors_enabled();
            print!("{}", PlanEmitter::new(color).render(&plan, format)?);
        }
    }

    Ok(())
}
