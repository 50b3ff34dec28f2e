//! Loads the seed task list from a directory of JSON files.
//!
//! Each regular file in the directory holds exactly one task. Files are
//! read in file-name order and the first read or parse failure aborts the
//! whole batch: callers get every task or an error naming the bad file.

use std::path::{Path, PathBuf};

use taskboard_core::Task;

/// Errors that abort a task directory load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The directory could not be listed.
    #[error("failed to read task directory {path}: {source}")]
    ReadDir {
        /// Directory that was listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A task file could not be read.
    #[error("failed to read task file {path}: {source}")]
    ReadFile {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A task file did not contain a valid task.
    #[error("failed to parse task file {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl LoadError {
    /// The directory or file the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadDir { path, .. } | Self::ReadFile { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }
}

/// Reads every task file in `dir`.
///
/// Subdirectories are skipped.
///
/// # Errors
///
/// Returns [`LoadError`] for the first directory, read, or parse failure;
/// no partial result is returned.
pub async fn load_all(dir: &Path) -> Result<Vec<Task>, LoadError> {
    let read_dir_err = |source: std::io::Error| LoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|source| LoadError::ReadFile {
                path: path.clone(),
                source,
            })?;
        if file_type.is_dir() {
            tracing::debug!(path = %path.display(), "skipping subdirectory");
            continue;
        }
        files.push(path);
    }
    files.sort();

    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        tasks.push(load_file(&path).await?);
    }

    tracing::debug!(dir = %dir.display(), count = tasks.len(), "task directory loaded");
    Ok(tasks)
}

/// Reads and parses a single task file.
async fn load_file(path: &Path) -> Result<Task, LoadError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
