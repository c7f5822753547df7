//! Name of the scratch directory a template is downloaded into.
//!
//! The directory is created inside the project and removed after the run,
//! so the name must resolve to exactly one fresh child of the project root.

use std::path::{Component, Path};

use crate::domain::{DomainError, is_allowed};

/// Reject names that would make cleanup remove anything but a child of the project.
pub fn check_temp_dir_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if is_allowed(name) {
        Some("must not name an entry kept in the project directory")
    } else {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => None,
            (Some(Component::ParentDir), _) => Some("must not refer to a parent directory"),
            (Some(Component::CurDir), _) => Some("must not refer to the project directory"),
            _ => Some("must be a single directory name"),
        }
    };

    match reason {
        None => Ok(()),
        Some(reason) => Err(DomainError::InvalidTempDir {
            name: name.to_string(),
            reason: reason.into(),
        }),
    }
}
