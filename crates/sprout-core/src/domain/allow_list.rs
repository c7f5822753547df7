//! Entries tolerated inside a target directory that already exists.
//!
//! A fresh clone of a repository usually carries version-control metadata,
//! CI config, a licence and a readme. Scaffolding on top of those is fine;
//! anything else could be overwritten or intermixed with generated files.

use std::fmt;

/// Names that may already exist in the target directory.
pub const ALLOWED_ENTRIES: &[&str] = &[
    ".DS_Store",
    ".git",
    ".gitattributes",
    ".gitignore",
    ".gitlab-ci.yml",
    ".hg",
    ".hgcheck",
    ".hgignore",
    ".idea",
    ".npmignore",
    ".travis.yml",
    "docs",
    "LICENSE",
    "README.md",
    "mkdocs.yml",
    "Thumbs.db",
];

/// Whether `name` is on the allow-list. Comparison is exact.
pub fn is_allowed(name: &str) -> bool {
    ALLOWED_ENTRIES.contains(&name)
}

/// An immediate child of a directory, as reported by the filesystem port.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dir {
            write!(f, "{}/", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Every entry that is not allow-listed, sorted by name.
pub fn find_conflicts(entries: impl IntoIterator<Item = DirEntry>) -> Vec<DirEntry> {
    let mut conflicts: Vec<DirEntry> = entries
        .into_iter()
        .filter(|entry| !is_allowed(&entry.name))
        .collect();
    conflicts.sort();
    conflicts
}
