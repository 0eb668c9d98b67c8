//! The `ScaffoldSpec` input and its builder.
//!
//! A `ScaffoldSpec` is the immutable, validated description of one scaffold
//! call. The name is checked at `build()`, so a spec that exists is always
//! safe to hand to the filesystem.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::project_name::ProjectName,
    error::DomainError,
    value_objects::{Flavor, PackageManager, RouterStyle, SourceExt, Styling},
};

/// Default folder that receives generated projects.
pub const DEFAULT_TARGET_ROOT: &str = "output";

/// A fully-validated scaffold request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldSpec {
    project_name: ProjectName,
    flavor: Flavor,
    use_typescript: bool,
    use_styling_framework: bool,
    package_manager: PackageManager,
    target_root: PathBuf,
    router_style: RouterStyle,
}

impl ScaffoldSpec {
    /// Start building a spec. Name validation is deferred to `build()`.
    pub fn builder(project_name: impl Into<String>, flavor: Flavor) -> ScaffoldSpecBuilder {
        ScaffoldSpecBuilder::new(project_name.into(), flavor)
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }
    pub const fn flavor(&self) -> Flavor {
        self.flavor
    }
    pub const fn use_typescript(&self) -> bool {
        self.use_typescript
    }
    pub const fn use_styling_framework(&self) -> bool {
        self.use_styling_framework
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }
    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Router style as requested. Only meaningful when `flavor.uses_router()`.
    pub const fn router_style(&self) -> RouterStyle {
        self.router_style
    }

    pub const fn styling(&self) -> Styling {
        Styling::from_flag(self.use_styling_framework)
    }

    pub const fn source_ext(&self) -> SourceExt {
        SourceExt::for_typescript(self.use_typescript)
    }

    /// `<target_root>/<project_name>`.
    pub fn project_root(&self) -> PathBuf {
        self.target_root.join(self.project_name.as_str())
    }

    /// Re-run validation, e.g. after construction from deserialized parts.
    pub fn validate(&self) -> Result<(), DomainError> {
        ProjectName::parse(self.project_name.as_str()).map(|_| ())
    }
}

impl fmt::Display for ScaffoldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.flavor,
            self.project_name,
            if self.use_typescript { "ts" } else { "js" },
            if self.use_styling_framework {
                "tailwind"
            } else {
                "plain css"
            }
        )?;
        if self.flavor.uses_router() {
            write!(f, " [{}]", self.router_style.display_name())?;
        }
        Ok(())
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`ScaffoldSpec`]. Defaults: TypeScript on, Tailwind on, npm,
/// `output/` target root, App router.
#[derive(Debug, Clone)]
pub struct ScaffoldSpecBuilder {
    project_name: String,
    flavor: Flavor,
    use_typescript: bool,
    use_styling_framework: bool,
    package_manager: PackageManager,
    target_root: PathBuf,
    router_style: RouterStyle,
}

impl ScaffoldSpecBuilder {
    fn new(project_name: String, flavor: Flavor) -> Self {
        Self {
            project_name,
            flavor,
            use_typescript: true,
            use_styling_framework: true,
            package_manager: PackageManager::default(),
            target_root: PathBuf::from(DEFAULT_TARGET_ROOT),
            router_style: RouterStyle::default(),
        }
    }

    pub fn typescript(mut self, enabled: bool) -> Self {
        self.use_typescript = enabled;
        self
    }

    pub fn styling_framework(mut self, enabled: bool) -> Self {
        self.use_styling_framework = enabled;
        self
    }

    pub fn package_manager(mut self, pm: PackageManager) -> Self {
        self.package_manager = pm;
        self
    }

    pub fn target_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.target_root = root.into();
        self
    }

    pub fn router_style(mut self, style: RouterStyle) -> Self {
        self.router_style = style;
        self
    }

    pub fn build(self) -> Result<ScaffoldSpec, DomainError> {
        let project_name = ProjectName::parse(&self.project_name)?;

        Ok(ScaffoldSpec {
            project_name,
            flavor: self.flavor,
            use_typescript: self.use_typescript,
            use_styling_framework: self.use_styling_framework,
            package_manager: self.package_manager,
            target_root: self.target_root,
            router_style: self.router_style,
        })
    }
}
