//! FileSystem port - abstraction over the file operations tasks perform
//!
//! Lets the executor and the deploy pipeline touch files without depending on
//! a concrete implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type FsResult<T> = Result<T, FsError>;

/// A failed file operation, always carrying the path involved.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied on {}", .0.display())]
    PermissionDenied(PathBuf),
    /// Target exists and overwriting was not requested
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Attach `path` to an I/O error, classifying the common kinds.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            _ => FsError::Io { path, source: err },
        }
    }
}

/// The file operations tasks need. `LocalFs` is the only real implementation.
pub trait FileSystem {
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Append content, creating the file when missing
    fn append(&self, path: &Path, content: &str) -> FsResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a file, or a directory with everything in it
    fn remove(&self, path: &Path) -> FsResult<()>;

    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Create an empty file if missing, leaving existing content alone
    fn touch(&self, path: &Path) -> FsResult<()>;

    /// Set unix permission bits. No-op where unsupported.
    fn set_mode(&self, path: &Path, mode: u32) -> FsResult<()>;
}
