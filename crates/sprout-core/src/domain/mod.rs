//! Core domain layer for Sprout.
//!
//! Pure rules with no I/O: what a valid project name is, which entries may
//! already sit in a target directory, which templates exist and what
//! variables they need. Filesystem, network and process concerns are reached
//! through the ports in `crate::application`.

pub mod allow_list;
pub mod error;
pub mod metadata;
pub mod project_name;
pub mod template;
pub mod temp_dir;

pub use allow_list::{ALLOWED_ENTRIES, DirEntry, find_conflicts, is_allowed};
pub use error::DomainError;
pub use metadata::{Metadata, RenderContext};
pub use project_name::{ProjectName, RESERVED_NAMES, naming_problems};
pub use temp_dir::check_temp_dir_name;
pub use template::{MetadataField, MetadataSchema, OPAQUE_EXTENSIONS, TemplateKind, is_opaque};
