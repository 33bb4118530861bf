use std::{io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

/// Replaces `path` with the pretty printed json of `value`.
///
/// The data is written to a sibling temporary file, synced and then renamed over the target, so
/// a crash in the middle leaves either the old or the new file in place.
pub async fn write_json_atomic(path: &Path, value: &impl Serialize) -> Result<()> {
    let buffer = serde_json::to_vec_pretty(value)?;
    let temporary = path.with_extension("json.tmp");

    let mut file = File::create(&temporary)
        .await
        .with_context(|| format!("Failed to create {temporary:?}"))?;
    file.write_all(&buffer).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(&temporary, path)
        .await
        .with_context(|| format!("Failed to replace {path:?}"))?;
    debug!("Wrote {} bytes into {path:?}", buffer.len());
    Ok(())
}

/// Reads json from `path`. A file that doesn't exist yet reads as the default value.
pub async fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match tokio::fs::read(path).await {
        Ok(content) if content.iter().all(u8::is_ascii_whitespace) => Ok(T::default()),
        Ok(content) => serde_json::from_slice(&content)
            .with_context(|| format!("File {path:?} doesn't contain valid data")),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {path:?}")),
    }
}

/// Writes `value` only if nothing exists at `path` yet.
pub async fn write_json_if_missing(path: &Path, value: &impl Serialize) -> Result<()> {
    if tokio::fs::try_exists(path).await? {
        return Ok(());
    }
    write_json_atomic(path, value).await
}
