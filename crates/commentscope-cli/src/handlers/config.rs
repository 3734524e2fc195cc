use anyhow::{Context, Result};
use commentscope_runtime::Config;
use std::path::Path;

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save_to(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub fn show(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

pub fn path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}
