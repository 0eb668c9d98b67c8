//! Files common to every flavor.

use serde::{Serialize, Serializer};

use crate::domain::{
    entities::{render_context::RenderContext, scaffold_spec::ScaffoldSpec},
    error::DomainError,
};

pub(super) const POSTCSS_CONFIG: &str =
    "module.exports = { plugins: { tailwindcss: {}, autoprefixer: {} } };\n";

pub(super) const TAILWIND_DIRECTIVES: &str =
    "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

pub(super) const PLAIN_RESET: &str = "* { box-sizing: border-box; }\n\
body { margin: 0; font-family: ui-sans-serif, system-ui, -apple-system; }\n";

const README_TEMPLATE: &str = "# {{PROJECT_NAME}}

This project was scaffolded by {{GENERATOR}}.

## Getting Started

1. Install dependencies:

   {{PACKAGE_MANAGER}} install

2. Run the development server:

   {{PACKAGE_MANAGER}} run dev

## Notes
- Tailwind: {{TAILWIND}}
- TypeScript: {{TYPESCRIPT}}
";

/// Tailwind config with the given content globs, one per line.
pub(super) fn tailwind_config(content_globs: &[&str]) -> String {
    let globs: String = content_globs
        .iter()
        .map(|glob| format!("    \"{glob}\",\n"))
        .collect();

    format!(
        "/** @type {{import('tailwindcss').Config}} */\n\
module.exports = {{\n  content: [\n{globs}  ],\n  theme: {{ extend: {{}} }},\n  plugins: [],\n}};\n"
    )
}

/// `package.json` with scripts in declaration order.
pub(super) fn package_json(scripts: &[(&str, &str)]) -> Result<String, DomainError> {
    let manifest = PackageManifest {
        name: "app",
        version: "0.1.0",
        private: true,
        kind: "module",
        scripts: OrderedScripts(scripts),
    };

    let mut out = serde_json::to_string_pretty(&manifest)
        .map_err(|e| DomainError::BlueprintRender(format!("package.json: {e}")))?;
    out.push('\n');
    Ok(out)
}

/// `README_GEN.md`. `extra_notes` are appended to the Notes list verbatim.
pub(super) fn readme(spec: &ScaffoldSpec, extra_notes: &[String]) -> String {
    let mut out = RenderContext::new(spec).render(README_TEMPLATE);
    for note in extra_notes {
        out.push_str("- ");
        out.push_str(note);
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
struct PackageManifest<'a> {
    name: &'a str,
    version: &'a str,
    private: bool,
    #[serde(rename = "type")]
    kind: &'a str,
    scripts: OrderedScripts<'a>,
}

struct OrderedScripts<'a>(&'a [(&'a str, &'a str)]);

impl Serialize for OrderedScripts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}
