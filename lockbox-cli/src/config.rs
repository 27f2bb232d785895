use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lockbox_core::MatchConfig;

pub const DEFAULT_CONFIG_FILE: &str = "lockbox.toml";

/// Load the run configuration. An explicit path must exist; otherwise
/// `lockbox.toml` in the working directory is used when present, and
/// built-in defaults apply when it is not.
pub fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(MatchConfig::default());
            }
            p
        }
    };

    let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(cfg: &MatchConfig, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(&MatchConfig::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
