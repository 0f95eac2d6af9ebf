use std::path::Path;

use anyhow::{bail, Context, Result};

use marquee_core::AppConfig;

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    AppConfig::default()
        .save_to(config_path)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

pub fn check(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        println!(
            "No config file at {}; built-in defaults apply.",
            config_path.display()
        );
    }

    let config = AppConfig::load_from(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    config.validate()?;

    println!("Configuration OK: {} section(s)", config.sections.len());
    Ok(())
}
