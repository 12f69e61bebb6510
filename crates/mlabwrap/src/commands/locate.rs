//! Locate command - print the installation root

use anyhow::Result;

use super::Context;

/// Print the root on stdout so scripts can capture it
pub fn run(context: &Context) -> Result<()> {
    let (root, source) = context.installation_root()?;
    tracing::info!("MATLAB root from {}", source);
    println!("{}", root.display());
    Ok(())
}
