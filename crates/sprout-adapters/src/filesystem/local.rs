//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::DirEntry,
    error::{SproutError, SproutResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> SproutResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_dir(&self, path: &Path) -> SproutResult<Vec<DirEntry>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;

        entries
            .map(|entry| {
                let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
                let name = entry.file_name().to_string_lossy().into_owned();
                let is_dir = entry
                    .file_type()
                    .map_err(|e| map_io_error(&entry.path(), e, "get file type"))?
                    .is_dir();
                Ok(if is_dir {
                    DirEntry::directory(name)
                } else {
                    DirEntry::file(name)
                })
            })
            .collect()
    }

    fn list_files(&self, root: &Path) -> SproutResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                let reason = e.to_string();
                SproutError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {reason}"),
                })
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            // Every walked path starts with root.
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> SproutResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> SproutResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SproutError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
