//! Directory safety gate.
//!
//! Runs strictly before the first write of a scaffold run and never mutates
//! anything.

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{DomainError, find_conflicts},
    error::SproutResult,
};

/// Refuses target directories holding anything outside the allow-list.
pub struct SafetyChecker<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> SafetyChecker<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Succeed when `root` is absent, empty, or holds only allow-listed
    /// entries; otherwise fail with every conflicting entry.
    #[instrument(skip(self, root), fields(root = %root.display()))]
    pub fn check_safe(&self, root: &Path) -> SproutResult<()> {
        if !self.filesystem.exists(root) {
            debug!("Target directory does not exist yet");
            return Ok(());
        }

        let conflicts = find_conflicts(self.filesystem.read_dir(root)?);
        if conflicts.is_empty() {
            debug!("Target directory is safe");
            return Ok(());
        }

        warn!(count = conflicts.len(), "Target directory has conflicting entries");
        Err(DomainError::UnsafeDirectory {
            path: root.to_path_buf(),
            conflicts,
        }
        .into())
    }
}
