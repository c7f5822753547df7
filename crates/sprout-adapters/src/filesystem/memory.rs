//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sprout_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::DirEntry,
    error::{SproutError, SproutResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can keep a handle while the
/// service owns a boxed copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    failing_writes: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dir_chain(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Make every later write to `path` fail (testing helper).
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(path.as_ref().to_path_buf());
        }
    }

    /// A file's content as text, if present and UTF-8 (testing helper).
    pub fn file_text(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        let bytes = inner.files.get(path.as_ref())?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// Every stored file path.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> SproutResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_poisoned())
    }

    fn write(&self) -> SproutResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_poisoned())
    }
}

impl MemoryFilesystemInner {
    fn add_dir_chain(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> SproutResult<()> {
        self.write()?.add_dir_chain(path);
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> SproutResult<Vec<DirEntry>> {
        let inner = self.read()?;
        if !inner.is_dir(path) {
            return Err(not_found(path));
        }

        let dirs = inner
            .directories
            .iter()
            .filter(|d| d.parent() == Some(path))
            .filter_map(|d| d.file_name())
            .map(|name| DirEntry::directory(name.to_string_lossy()));
        let files = inner
            .files
            .keys()
            .filter(|f| f.parent() == Some(path))
            .filter_map(|f| f.file_name())
            .map(|name| DirEntry::file(name.to_string_lossy()));

        Ok(dirs.chain(files).collect())
    }

    fn list_files(&self, root: &Path) -> SproutResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.is_dir(root) {
            return Err(not_found(root));
        }

        Ok(inner
            .files
            .keys()
            .filter_map(|f| f.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .collect())
    }

    fn read_file(&self, path: &Path) -> SproutResult<Vec<u8>> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> SproutResult<()> {
        let mut inner = self.write()?;

        if inner.failing_writes.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Simulated write failure".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.is_dir(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> SproutResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.is_dir(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> SproutResult<()> {
        let mut inner = self.write()?;
        if !inner.is_dir(path) {
            return Err(not_found(path));
        }

        inner.directories.retain(|d| !d.starts_with(path));
        inner.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }
}

fn not_found(path: &Path) -> SproutError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
    .into()
}

fn lock_poisoned() -> SproutError {
    SproutError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), b"x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), b"x").unwrap();
        assert_eq!(fs.file_text("/a/b.txt").as_deref(), Some("x"));
    }

    #[test]
    fn read_dir_lists_immediate_children_only() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/.git/HEAD", "ref");
        fs.insert_file("/p/README.md", "# p");

        let mut entries = fs.read_dir(Path::new("/p")).unwrap();
        entries.sort();
        assert_eq!(
            entries,
            vec![DirEntry::directory(".git"), DirEntry::file("README.md")]
        );
    }

    #[test]
    fn remove_dir_all_drops_subtree() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/tmp/a.txt", "a");
        fs.insert_file("/p/keep.txt", "k");

        fs.remove_dir_all(Path::new("/p/tmp")).unwrap();

        assert!(!fs.exists(Path::new("/p/tmp")));
        assert!(!fs.exists(Path::new("/p/tmp/a.txt")));
        assert!(fs.exists(Path::new("/p/keep.txt")));
    }

    #[test]
    fn list_files_is_relative() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/t/src/index.js", "");
        fs.insert_file("/t/package.json", "");
        fs.insert_file("/other/x", "");

        assert_eq!(
            fs.list_files(Path::new("/t")).unwrap(),
            vec![PathBuf::from("package.json"), PathBuf::from("src/index.js")]
        );
    }
}
