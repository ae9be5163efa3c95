//! Directory operations

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::errors::FetchError;

/// A directory wrapper with path
#[derive(Debug, Clone)]
pub struct Dir {
    path: PathBuf,
}

impl Dir {
    /// Create a new directory reference
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory (and parents)
    pub async fn create(&self) -> Result<(), FetchError> {
        fs::create_dir_all(&self.path).await?;
        Ok(())
    }

    /// Create only this directory, failing if the parent is missing.
    ///
    /// Returns `false` when something already exists at the path.
    pub async fn create_if_absent(&self) -> Result<bool, FetchError> {
        match fs::create_dir(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete whatever is at the path: the directory and all contents, or a
    /// file or symlink standing in its place
    pub async fn delete(&self) -> Result<(), FetchError> {
        match fs::symlink_metadata(&self.path).await {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&self.path).await?,
            Ok(_) => fs::remove_file(&self.path).await?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Delete the directory if present, then create it empty
    pub async fn reset(&self) -> Result<(), FetchError> {
        self.delete().await?;
        self.create().await
    }
}
