//! Overflow artifact persistence
//!
//! One plain UTF-8 file per truncated call, named with a time and a random
//! component to avoid collision. Nothing here reads the file back or deletes
//! it; the path in the truncation notice is the only index.

use anyhow::{Context, Result};
use rand::Rng;
use std::path::{Path, PathBuf};

/// Subfolder of the system temp directory holding overflow artifacts.
pub const OVERFLOW_SUBDIR: &str = "webtools";

/// The fixed artifact directory.
pub fn overflow_dir() -> PathBuf {
    std::env::temp_dir().join(OVERFLOW_SUBDIR)
}

/// Persist untruncated content for later retrieval.
pub async fn persist_overflow(tool: &str, content: &str) -> Result<PathBuf> {
    persist_overflow_in(&overflow_dir(), tool, content).await
}

/// Persist into an explicit directory.
pub async fn persist_overflow_in(dir: &Path, tool: &str, content: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create overflow directory {}", dir.display()))?;

    let stamp = chrono::Utc::now().timestamp_millis();
    let entropy: u32 = rand::thread_rng().gen();
    let path = dir.join(format!("{}-{}-{:08x}.txt", tool, stamp, entropy));

    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write overflow artifact {}", path.display()))?;

    Ok(path)
}

/// Human-readable size, e.g. `512B`, `12KB`, `1.2MB`.
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;

    if bytes < KB {
        format!("{}B", bytes)
    } else if bytes < MB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    }
}
