use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write a JSON artifact: pretty-printed, non-ASCII preserved. Callers pass
/// ordered maps, so keys come out sorted.
pub fn write_json_artifact<T: Serialize>(data: &T, path: &Path, label: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .with_context(|| format!("Failed to serialize {}", label))?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("{} written to {}", label, path.display());
    Ok(())
}
