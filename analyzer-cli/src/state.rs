use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Config directory: `$ANALYZER_HOME` if set, else `$HOME/.analyzer`
pub fn analyzer_home() -> Result<PathBuf> {
    resolve_home(
        std::env::var("ANALYZER_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve_home(analyzer_home: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = analyzer_home.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home.context("neither ANALYZER_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".analyzer"))
}

pub fn ensure_analyzer_home() -> Result<PathBuf> {
    let dir = analyzer_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
