//! Scaffold Service - writes a rendered blueprint to disk.
//!
//! Workflow:
//! 1. Validate the spec (invalid names fail before any filesystem call)
//! 2. Render the blueprint for the spec's flavor
//! 3. Write entries in order through the `Filesystem` port
//!
//! There is no rollback. Files written before a failure stay on disk, and a
//! re-run overwrites them.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        DomainValidator as validator, Flavor, FsEntry, ProjectStructure, RouterStyle,
        ScaffoldSpec, blueprint,
    },
    error::{StencilError, StencilResult},
};

/// Information about a flavor for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlavorInfo {
    pub id: String,
    pub name: String,
    pub generator: String,
    pub routers: Vec<String>,
    /// Files produced with default options (TypeScript, Tailwind, App router).
    pub files: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given filesystem adapter.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use stencil_core::application::{ScaffoldService, ports::Filesystem};
    ///
    /// # fn demo(filesystem: Box<dyn Filesystem>) {
    /// let service = ScaffoldService::new(filesystem);
    /// # }
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Render and validate the plan for `spec` without writing anything.
    #[instrument(skip_all, fields(spec = %spec))]
    pub fn plan(&self, spec: &ScaffoldSpec) -> StencilResult<ProjectStructure> {
        validator::validate_spec(spec)?;
        let structure = blueprint::render(spec)?;
        validator::validate_project_structure(&structure)?;

        debug!(
            files = structure.file_count(),
            entries = structure.entry_count(),
            "Blueprint rendered"
        );
        Ok(structure)
    }

    /// Scaffold a new project and return its root path.
    ///
    /// Returns the root even when the folder already existed: existing files
    /// with the same names are overwritten, other files are left alone.
    #[instrument(
        skip_all,
        fields(
            spec = %spec,
            root = %spec.project_root().display()
        )
    )]
    pub fn scaffold(&self, spec: &ScaffoldSpec) -> StencilResult<PathBuf> {
        info!(
            flavor = %spec.flavor(),
            package_manager = %spec.package_manager(),
            "Scaffolding {} project",
            spec.flavor().display_name()
        );

        let structure = self.plan(spec)?;
        let root = structure.root().to_path_buf();

        if self.filesystem.exists(&root) {
            debug!(path = %root.display(), "Project root exists, files will be overwritten");
        }

        self.write_all(&structure)?;

        info!(files = structure.file_count(), "Scaffold completed successfully");
        Ok(root)
    }

    /// Describe every flavor with the files its default options produce.
    pub fn list_flavors(&self) -> StencilResult<Vec<FlavorInfo>> {
        Flavor::ALL
            .iter()
            .map(|&flavor| -> StencilResult<FlavorInfo> {
                let spec = ScaffoldSpec::builder("app", flavor).build()?;
                let routers = if flavor.uses_router() {
                    [RouterStyle::App, RouterStyle::Pages]
                        .iter()
                        .map(|r| r.to_string())
                        .collect()
                } else {
                    Vec::new()
                };

                Ok(FlavorInfo {
                    id: flavor.to_string(),
                    name: flavor.display_name().to_string(),
                    generator: flavor.generator_name().to_string(),
                    routers,
                    files: blueprint::planned_paths(&spec)?,
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write all entries in order. Stops at the first failure.
    fn write_all(&self, structure: &ProjectStructure) -> StencilResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        let mut written = 0usize;
        for entry in structure.entries() {
            let path = root.join(entry.path());
            let result = match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path),
                FsEntry::File(file) => path
                    .parent()
                    .map_or(Ok(()), |parent| self.filesystem.create_dir_all(parent))
                    .and_then(|()| self.filesystem.write_file(&path, &file.content)),
            };

            if let Err(e) = result {
                if written == 0 {
                    return Err(e);
                }
                warn!(
                    written,
                    path = %path.display(),
                    error = %e,
                    "Scaffold stopped part-way, written files are kept"
                );
                return Err(StencilError::Application(ApplicationError::PartialWrite {
                    written,
                    path,
                    reason: e.to_string(),
                }));
            }

            if let FsEntry::File(file) = entry {
                written += 1;
                debug!(path = %file.path, bytes = file.size(), "Wrote file");
            }
        }

        Ok(())
    }
}
