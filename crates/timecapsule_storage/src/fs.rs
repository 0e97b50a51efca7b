//! Async file helpers with storage error mapping.

use serde::Serialize;
use std::path::Path;
use timecapsule_error::{StorageError, StorageErrorKind, TimeCapsuleResult};

pub(crate) async fn ensure_dir(path: &Path) -> TimeCapsuleResult<()> {
    tokio::fs::create_dir_all(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `DirectoryCreation` or `FileWrite` on I/O failure.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub async fn write_text(path: &Path, contents: &str) -> TimeCapsuleResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    tokio::fs::write(path, contents).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    tracing::debug!("Wrote file");
    Ok(())
}

/// Write `value` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns `FileWrite` if serialization or the write fails.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> TimeCapsuleResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: cannot serialize: {}",
            path.display(),
            e
        )))
    })?;
    write_text(path, &json).await
}

/// Read a UTF-8 text file.
///
/// # Errors
///
/// Returns `NotFound` if `path` does not exist and `FileRead` for any other
/// I/O failure.
pub async fn read_text(path: &Path) -> TimeCapsuleResult<String> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
        } else {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        }
    })?;
    Ok(text)
}
