//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temp file in the target directory and are renamed into
/// place.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> FsResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(|e| FsError::io(parent, e))
            }
            _ => Ok(()),
        }
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        Self::ensure_parent(path)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::io(dir, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| FsError::io(path, e))?;
        // keep the mode of the file being replaced (hooks must stay executable)
        if let Ok(meta) = std::fs::metadata(path) {
            std::fs::set_permissions(temp.path(), meta.permissions())
                .map_err(|e| FsError::io(path, e))?;
        }
        temp.persist(path).map_err(|e| FsError::io(path, e.error))?;
        Ok(())
    }

    fn append(&self, path: &Path, content: &str) -> FsResult<()> {
        Self::ensure_parent(path)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FsError::io(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| FsError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let meta = std::fs::symlink_metadata(path).map_err(|e| FsError::io(path, e))?;
        if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
        .map_err(|e| FsError::io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::io(path, e))
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        Self::ensure_parent(to)?;
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::io(from, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        Self::ensure_parent(to)?;
        std::fs::rename(from, to).map_err(|e| FsError::io(from, e))
    }

    fn touch(&self, path: &Path) -> FsResult<()> {
        Self::ensure_parent(path)?;
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|_| ())
            .map_err(|e| FsError::io(path, e))
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> FsResult<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .map_err(|e| FsError::io(path, e))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, _mode: u32) -> FsResult<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(FsError::NotFound(path.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "hello world").unwrap();
        assert_eq!(fs.read(&file).unwrap(), "hello world");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("test.txt");
        LocalFs::new().write(&file, "content").unwrap();
        assert!(file.exists());
    }

    #[test]
    fn local_fs_append_creates_then_extends() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("env");
        let fs = LocalFs::new();
        fs.append(&file, "A=1\n").unwrap();
        fs.append(&file, "B=2\n").unwrap();
        assert_eq!(fs.read(&file).unwrap(), "A=1\nB=2\n");
    }

    #[test]
    fn local_fs_remove_handles_files_and_trees() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        let tree = dir.path().join("vendor/pkg/.git");
        fs.create_dir_all(&tree.join("objects")).unwrap();
        fs.write(&tree.join("HEAD"), "ref").unwrap();
        let file = dir.path().join("CHANGELOG.txt");
        fs.write(&file, "log").unwrap();

        fs.remove(&tree).unwrap();
        fs.remove(&file).unwrap();
        assert!(!tree.exists());
        assert!(!file.exists());
    }

    #[test]
    fn local_fs_remove_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LocalFs::new().remove(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    }

    #[test]
    fn local_fs_touch_keeps_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("known_hosts");
        let fs = LocalFs::new();
        fs.write(&file, "github.com ssh-rsa AAA\n").unwrap();
        fs.touch(&file).unwrap();
        assert_eq!(fs.read(&file).unwrap(), "github.com ssh-rsa AAA\n");
    }

    #[cfg(unix)]
    #[test]
    fn local_fs_write_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let file = dir.path().join("commit-msg");
        let fs = LocalFs::new();
        fs.write(&file, "#!/bin/sh\n{key}\n").unwrap();
        fs.set_mode(&file, 0o755).unwrap();
        fs.write(&file, "#!/bin/sh\nACME\n").unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn local_fs_set_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let file = dir.path().join("id_rsa");
        let fs = LocalFs::new();
        fs.write(&file, "key").unwrap();
        fs.set_mode(&file, 0o600).unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
