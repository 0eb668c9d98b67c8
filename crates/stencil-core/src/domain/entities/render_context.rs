use std::collections::HashMap;

use crate::domain::entities::scaffold_spec::ScaffoldSpec;

/// Context for rendering parameterized blueprint files.
///
/// Immutable after creation.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | "dashboard" |
/// | `PACKAGE_MANAGER` | "pnpm" |
/// | `GENERATOR` | "NextJsScaffoldTool" |
/// | `TAILWIND` | "enabled" / "disabled" |
/// | `TYPESCRIPT` | "enabled" / "disabled" |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(spec: &ScaffoldSpec) -> Self {
        let toggle = |on: bool| if on { "enabled" } else { "disabled" };

        let mut vars = HashMap::new();
        vars.insert("PROJECT_NAME".to_string(), spec.project_name().to_string());
        vars.insert(
            "PACKAGE_MANAGER".to_string(),
            spec.package_manager().to_string(),
        );
        vars.insert(
            "GENERATOR".to_string(),
            spec.flavor().generator_name().to_string(),
        );
        vars.insert(
            "TAILWIND".to_string(),
            toggle(spec.use_styling_framework()).to_string(),
        );
        vars.insert(
            "TYPESCRIPT".to_string(),
            toggle(spec.use_typescript()).to_string(),
        );

        Self { variables: vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Replace `{{VARIABLE}}` placeholders. Unknown placeholders are left as-is.
    ///
    /// Single left-to-right pass: substituted values are never rescanned, so a
    /// project name that itself looks like a placeholder renders verbatim.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match self.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Flavor, PackageManager};

    fn spec() -> ScaffoldSpec {
        ScaffoldSpec::builder("shop", Flavor::NextJs)
            .package_manager(PackageManager::Yarn)
            .styling_framework(false)
            .build()
            .unwrap()
    }

    #[test]
    fn standard_variables() {
        let ctx = RenderContext::new(&spec());

        assert_eq!(ctx.get("PROJECT_NAME"), Some("shop"));
        assert_eq!(ctx.get("PACKAGE_MANAGER"), Some("yarn"));
        assert_eq!(ctx.get("TAILWIND"), Some("disabled"));
        assert_eq!(ctx.get("TYPESCRIPT"), Some("enabled"));
    }

    #[test]
    fn renders_and_leaves_unknown_placeholders() {
        let ctx = RenderContext::new(&spec());
        let out = ctx.render("{{PROJECT_NAME}} via {{PACKAGE_MANAGER}} {{NOPE}}");

        assert_eq!(out, "shop via yarn {{NOPE}}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let spec = ScaffoldSpec::builder("{{TAILWIND}}", Flavor::ReactVite)
            .build()
            .unwrap();
        let ctx = RenderContext::new(&spec);

        assert_eq!(ctx.render("# {{PROJECT_NAME}}"), "# {{TAILWIND}}");
    }

    #[test]
    fn unterminated_placeholder_is_kept() {
        let ctx = RenderContext::new(&spec());
        assert_eq!(ctx.render("a {{PROJECT_NAME"), "a {{PROJECT_NAME");
    }
}
