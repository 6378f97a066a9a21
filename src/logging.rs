use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Routes `log` records to `path`. The terminal belongs to the game, so
/// nothing is logged unless a file is given.
pub fn init_to_file(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialized")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
