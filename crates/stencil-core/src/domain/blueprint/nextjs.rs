//! Next.js blueprint, App or Pages router.

use super::shared;
use crate::domain::{
    entities::{project_structure::ProjectStructure, scaffold_spec::ScaffoldSpec},
    error::DomainError,
    value_objects::{RouterStyle, Styling},
};

const NEXT_CONFIG: &str = "/** @type {import('next').NextConfig} */
const nextConfig = { reactStrictMode: true };
module.exports = nextConfig;
";

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "lib": ["dom", "dom.iterable", "esnext"],
    "allowJs": false,
    "skipLibCheck": true,
    "strict": true,
    "noEmit": true,
    "esModuleInterop": true,
    "module": "esnext",
    "moduleResolution": "bundler",
    "resolveJsonModule": true,
    "isolatedModules": true,
    "jsx": "preserve",
    "incremental": true,
    "plugins": [{ "name": "next" }]
  },
  "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx"],
  "exclude": ["node_modules"]
}
"#;

const NEXT_ENV: &str = "/// <reference types=\"next\" />
/// <reference types=\"next/image-types/global\" />
// NOTE: This file should not be edited
";

const JSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "lib": ["dom", "dom.iterable", "esnext"],
    "allowJs": true,
    "skipLibCheck": true,
    "strict": false,
    "noEmit": true,
    "module": "esnext",
    "moduleResolution": "bundler",
    "resolveJsonModule": true,
    "isolatedModules": true,
    "jsx": "preserve"
  },
  "include": ["**/*.js", "**/*.jsx"],
  "exclude": ["node_modules"]
}
"#;

const TAILWIND_CONTENT: [&str; 3] = [
    "./app/**/*.{js,ts,jsx,tsx}",
    "./pages/**/*.{js,ts,jsx,tsx}",
    "./components/**/*.{js,ts,jsx,tsx}",
];

/// Render the Next.js plan.
pub fn render(spec: &ScaffoldSpec) -> Result<ProjectStructure, DomainError> {
    let ext = spec.source_ext();
    let router = spec.router_style();
    let styling = spec.styling();
    let mut s = ProjectStructure::new(spec.project_root());

    let mut scripts = vec![
        ("dev", "next dev"),
        ("build", "next build"),
        ("start", "next start"),
        ("lint", "next lint"),
    ];
    if styling == Styling::Tailwind {
        scripts.push(("format", "prettier --write ."));
    }
    s.add_file("package.json", shared::package_json(&scripts)?);

    s.add_file("next.config.js", NEXT_CONFIG);
    if spec.use_typescript() {
        s.add_file("tsconfig.json", TSCONFIG);
        s.add_file("next-env.d.ts", NEXT_ENV);
    } else {
        s.add_file("jsconfig.json", JSCONFIG);
    }

    let stylesheet = match router {
        RouterStyle::App => {
            s.add_directory("app/styles");
            s.add_file(format!("app/page.{}", ext.component), page(router));
            "app/globals.css"
        }
        RouterStyle::Pages => {
            s.add_directory("pages");
            s.add_file(format!("pages/index.{}", ext.component), page(router));
            "styles/globals.css"
        }
    };

    match styling {
        Styling::Tailwind => {
            s.add_file("postcss.config.js", shared::POSTCSS_CONFIG);
            s.add_file(
                "tailwind.config.js",
                shared::tailwind_config(&TAILWIND_CONTENT),
            );
            s.add_file(stylesheet, tailwind_stylesheet());
        }
        Styling::Plain => s.add_file(stylesheet, shared::PLAIN_RESET),
    }

    let router_note = format!("Router: {}", router.display_name());
    s.add_file("README_GEN.md", shared::readme(spec, &[router_note]));
    Ok(s)
}

fn page(router: RouterStyle) -> String {
    let heading = match router {
        RouterStyle::App => "Next.js App Router",
        RouterStyle::Pages => "Next.js Pages Router",
    };

    format!(
        "export default function Home() {{
  return (
    <main style={{{{ padding: 24 }}}}>
      <h1>{heading}</h1>
      <p>Scaffolded project is ready.</p>
    </main>
  );
}}
"
    )
}

fn tailwind_stylesheet() -> String {
    format!(
        "{}\nbody {{\n  @apply antialiased;\n}}\n",
        shared::TAILWIND_DIRECTIVES
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Flavor;

    fn build(ts: bool, tailwind: bool, router: RouterStyle) -> ProjectStructure {
        let spec = ScaffoldSpec::builder("next-app", Flavor::NextJs)
            .typescript(ts)
            .styling_framework(tailwind)
            .router_style(router)
            .build()
            .unwrap();
        render(&spec).unwrap()
    }

    #[test]
    fn app_router_layout() {
        let s = build(true, true, RouterStyle::App);

        assert!(s.file("app/page.tsx").is_some());
        assert!(s.file("app/globals.css").is_some());
        assert!(s.file("pages/index.tsx").is_none());
        assert!(s.directories().any(|d| d.path.to_slash_string() == "app/styles"));
        assert!(
            s.file("app/page.tsx")
                .unwrap()
                .content
                .contains("<h1>Next.js App Router</h1>")
        );
    }

    #[test]
    fn pages_router_layout() {
        let s = build(false, true, RouterStyle::Pages);

        assert!(s.file("pages/index.jsx").is_some());
        assert!(s.file("styles/globals.css").is_some());
        assert!(s.file("app/page.jsx").is_none());
        assert!(
            s.file("README_GEN.md")
                .unwrap()
                .content
                .ends_with("- Router: Pages Router\n")
        );
    }

    #[test]
    fn page_component_keeps_jsx_style_braces() {
        let s = build(true, false, RouterStyle::App);
        assert!(
            s.file("app/page.tsx")
                .unwrap()
                .content
                .contains("<main style={{ padding: 24 }}>")
        );
    }

    #[test]
    fn typescript_adds_env_declarations() {
        let ts = build(true, true, RouterStyle::App);
        let js = build(false, true, RouterStyle::App);

        assert!(ts.file("next-env.d.ts").is_some());
        assert!(ts.file("jsconfig.json").is_none());
        assert!(js.file("jsconfig.json").is_some());
        assert!(js.file("next-env.d.ts").is_none());
    }

    #[test]
    fn format_script_only_with_tailwind() {
        let with = build(true, true, RouterStyle::App);
        let without = build(true, false, RouterStyle::App);

        assert!(
            with.file("package.json")
                .unwrap()
                .content
                .contains("\"format\": \"prettier --write .\"")
        );
        assert!(!without.file("package.json").unwrap().content.contains("format"));
    }

    #[test]
    fn tailwind_stylesheet_applies_antialiasing() {
        let s = build(true, true, RouterStyle::Pages);
        assert_eq!(
            s.file("styles/globals.css").unwrap().content,
            "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n\nbody {\n  @apply antialiased;\n}\n"
        );
    }

    #[test]
    fn plain_stylesheet_is_reset() {
        let s = build(false, false, RouterStyle::App);
        assert_eq!(s.file("app/globals.css").unwrap().content, shared::PLAIN_RESET);
        assert_eq!(s.file_count(), 6);
    }
}
