//! Blueprints: the decision table from a [`ScaffoldSpec`] to a
//! [`ProjectStructure`].
//!
//! A blueprint is a pure function. It never touches the filesystem and the
//! same spec always yields the same entries in the same order. Entry order is
//! write order, so `package.json` is always first and `README_GEN.md` last.
//!
//! # Layout
//!
//! - [`react_vite`]: single `src/` tree served by Vite.
//! - [`nextjs`]: `app/` or `pages/` tree, selected by [`RouterStyle`].
//! - `shared`: `package.json`, Tailwind configs, stylesheets and the README.
//!
//! [`RouterStyle`]: crate::domain::value_objects::RouterStyle
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

mod shared;

pub mod nextjs;
pub mod react_vite;

use crate::domain::{
    entities::{project_structure::ProjectStructure, scaffold_spec::ScaffoldSpec},
    error::DomainError,
    value_objects::Flavor,
};

/// Render the file plan for `spec` and validate it.
///
/// # Errors
///
/// Returns [`DomainError::BlueprintRender`] if `package.json` cannot be
/// serialized, or a structure error if the plan is empty or repeats a path.
/// Both indicate a defect in the blueprint rather than bad input.
pub fn render(spec: &ScaffoldSpec) -> Result<ProjectStructure, DomainError> {
    let structure = match spec.flavor() {
        Flavor::ReactVite => react_vite::render(spec)?,
        Flavor::NextJs => nextjs::render(spec)?,
    };

    structure.validate()?;
    Ok(structure)
}

/// Relative paths a spec would produce, in write order. Directories end in `/`.
pub fn planned_paths(spec: &ScaffoldSpec) -> Result<Vec<String>, DomainError> {
    use crate::domain::entities::project_structure::FsEntry;

    Ok(render(spec)?
        .entries()
        .iter()
        .map(|entry| match entry {
            FsEntry::File(f) => f.path.to_slash_string(),
            FsEntry::Directory(d) => format!("{}/", d.path.to_slash_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{PackageManager, RouterStyle};

    fn spec(flavor: Flavor) -> crate::domain::entities::scaffold_spec::ScaffoldSpecBuilder {
        ScaffoldSpec::builder("web", flavor)
    }

    fn all_combinations() -> Vec<ScaffoldSpec> {
        let mut out = Vec::new();
        for flavor in Flavor::ALL {
            for ts in [true, false] {
                for tw in [true, false] {
                    for router in [RouterStyle::App, RouterStyle::Pages] {
                        out.push(
                            spec(flavor)
                                .typescript(ts)
                                .styling_framework(tw)
                                .router_style(router)
                                .build()
                                .unwrap(),
                        );
                    }
                }
            }
        }
        out
    }

    #[test]
    fn every_combination_renders_a_valid_plan() {
        for spec in all_combinations() {
            let structure = render(&spec).unwrap();
            assert!(structure.file("package.json").is_some(), "{spec}");
            assert!(structure.file("README_GEN.md").is_some(), "{spec}");
        }
    }

    #[test]
    fn tsconfig_exists_iff_typescript() {
        for spec in all_combinations() {
            let structure = render(&spec).unwrap();
            assert_eq!(
                structure.file("tsconfig.json").is_some(),
                spec.use_typescript(),
                "{spec}"
            );
        }
    }

    #[test]
    fn no_typed_sources_without_typescript() {
        for spec in all_combinations().into_iter().filter(|s| !s.use_typescript()) {
            let structure = render(&spec).unwrap();
            let typed = structure.files().any(|f| {
                let p = f.path.to_slash_string();
                p.ends_with(".ts") || p.ends_with(".tsx")
            });
            assert!(!typed, "{spec}");
        }
    }

    #[test]
    fn tailwind_configs_iff_styling_framework() {
        for spec in all_combinations() {
            let structure = render(&spec).unwrap();
            assert_eq!(
                structure.file("tailwind.config.js").is_some(),
                spec.use_styling_framework()
            );
            assert_eq!(
                structure.file("postcss.config.js").is_some(),
                spec.use_styling_framework()
            );
        }
    }

    #[test]
    fn render_is_deterministic() {
        let spec = spec(Flavor::NextJs)
            .package_manager(PackageManager::Pnpm)
            .build()
            .unwrap();
        assert_eq!(render(&spec).unwrap(), render(&spec).unwrap());
    }

    #[test]
    fn package_json_first_readme_last() {
        for spec in all_combinations() {
            let paths = planned_paths(&spec).unwrap();
            assert_eq!(paths.first().map(String::as_str), Some("package.json"));
            assert_eq!(paths.last().map(String::as_str), Some("README_GEN.md"));
        }
    }

    #[test]
    fn planned_paths_mark_directories() {
        let spec = spec(Flavor::NextJs).build().unwrap();
        let paths = planned_paths(&spec).unwrap();
        assert!(paths.contains(&"app/styles/".to_string()));
    }
}
