use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::DqnConfig;

/// Agent metadata lives next to the weights, `dqn.pt` -> `dqn.json`.
pub fn metadata_path(checkpoint: &Path) -> PathBuf {
    checkpoint.with_extension("json")
}

pub fn read_metadata(checkpoint: &Path) -> anyhow::Result<Option<DqnConfig>> {
    let path = metadata_path(checkpoint);
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(&path)
        .with_context(|| format!("failed to open checkpoint metadata {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse checkpoint metadata {}", path.display()))?;
    Ok(Some(config))
}

pub fn write_metadata(checkpoint: &Path, config: &DqnConfig) -> anyhow::Result<()> {
    let path = metadata_path(checkpoint);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)
        .with_context(|| format!("failed to create checkpoint metadata {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), config)?;
    Ok(())
}
