//! Config subcommands handler

use std::path::Path;

use anyhow::{bail, Result};

use readalong::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path`.
///
/// Refuses to replace an existing file unless `force` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
