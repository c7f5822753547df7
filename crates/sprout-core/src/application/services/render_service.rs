//! Render Service - turns a fetched template tree into project files.
//!
//! The steps are linear and never loop back:
//! 1. Validate the source tree exists and holds files
//! 2. Transform every file in memory (render text, copy opaque binaries)
//! 3. Materialize the transformed files under the destination
//! 4. Remove the source tree, whatever happened before
//!
//! Transforming everything before the first write means a template error
//! leaves no output behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{Metadata, RenderContext, is_opaque},
    error::SproutResult,
};

/// A file ready to be written, relative to the destination.
#[derive(Debug)]
struct RenderedFile {
    path: PathBuf,
    content: Vec<u8>,
}

/// Renders a [`RenderContext`] into its destination directory.
pub struct RenderService<'a> {
    filesystem: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> RenderService<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, renderer: &'a dyn TemplateRenderer) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    /// Render the template tree and return the finished project directory.
    ///
    /// The source tree is removed on every path out of this function. On
    /// failure the first error is returned after that cleanup ran.
    #[instrument(
        skip_all,
        fields(
            source = %context.source().display(),
            destination = %context.destination().display()
        )
    )]
    pub fn render(&self, context: RenderContext) -> SproutResult<PathBuf> {
        let (metadata, source, destination) = context.into_parts();

        let result = self
            .validate_source(&source)
            .and_then(|files| self.transform(&source, &files, &metadata))
            .and_then(|rendered| self.materialize(&destination, &rendered));

        let cleanup = self.cleanup(&source);

        result?;
        cleanup?;
        info!("Template rendered");
        Ok(destination)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validate_source(&self, source: &Path) -> SproutResult<Vec<PathBuf>> {
        let missing = || ApplicationError::MissingSource {
            path: source.to_path_buf(),
        };

        if !self.filesystem.exists(source) {
            return Err(missing().into());
        }

        let files = self.filesystem.list_files(source)?;
        if files.is_empty() {
            return Err(missing().into());
        }

        debug!(files = files.len(), "Template source found");
        Ok(files)
    }

    fn transform(
        &self,
        source: &Path,
        files: &[PathBuf],
        metadata: &Metadata,
    ) -> SproutResult<Vec<RenderedFile>> {
        files
            .iter()
            .map(|relative| self.transform_file(source, relative, metadata))
            .collect()
    }

    fn transform_file(
        &self,
        source: &Path,
        relative: &Path,
        metadata: &Metadata,
    ) -> SproutResult<RenderedFile> {
        let bytes = self.filesystem.read_file(&source.join(relative))?;

        if is_opaque(relative) {
            debug!(file = %relative.display(), "Copying binary file");
            return Ok(RenderedFile {
                path: relative.to_path_buf(),
                content: bytes,
            });
        }

        let content = match String::from_utf8(bytes) {
            Ok(text) => {
                let name = relative.to_string_lossy();
                debug!(file = %name, "Rendering");
                self.renderer.render(&name, &text, metadata)?.into_bytes()
            }
            Err(e) => {
                warn!(file = %relative.display(), "Not UTF-8, copying verbatim");
                e.into_bytes()
            }
        };

        Ok(RenderedFile {
            path: relative.to_path_buf(),
            content,
        })
    }

    /// Write every file; on failure remove the files this run created.
    fn materialize(&self, destination: &Path, files: &[RenderedFile]) -> SproutResult<()> {
        let mut created: Vec<PathBuf> = Vec::with_capacity(files.len());

        for file in files {
            let path = destination.join(&file.path);
            let existed = self.filesystem.exists(&path);

            if let Err(e) = self.write_one(&path, &file.content) {
                warn!(error = %e, path = %path.display(), "Write failed, removing created files");
                self.rollback(&created);
                return Err(e);
            }

            if !existed {
                created.push(path);
            }
        }

        info!(files = files.len(), "Files written");
        Ok(())
    }

    fn write_one(&self, path: &Path, content: &[u8]) -> SproutResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)
    }

    /// Best-effort: a failed removal is logged, never raised.
    fn rollback(&self, created: &[PathBuf]) {
        for path in created.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(error = %e, path = %path.display(), "Rollback failed");
            }
        }
    }

    fn cleanup(&self, source: &Path) -> SproutResult<()> {
        if !self.filesystem.exists(source) {
            return Ok(());
        }

        match self.filesystem.remove_dir_all(source) {
            Ok(()) => {
                debug!(source = %source.display(), "Template source removed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, source = %source.display(), "Failed to remove template source");
                Err(e)
            }
        }
    }
}
