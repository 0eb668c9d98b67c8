//! React + Vite blueprint.

use super::shared;
use crate::domain::{
    entities::{project_structure::ProjectStructure, scaffold_spec::ScaffoldSpec},
    error::DomainError,
    value_objects::Styling,
};

const VITE_CONFIG: &str = "import { defineConfig } from 'vite'\n\
import react from '@vitejs/plugin-react'\n\
\n\
export default defineConfig({ plugins: [react()] })\n";

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "useDefineForClassFields": true,
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "skipLibCheck": true,
    "jsx": "react-jsx",
    "moduleResolution": "Bundler",
    "resolveJsonModule": true,
    "isolatedModules": true,
    "noEmit": true,
    "strict": true
  },
  "include": ["src"]
}
"#;

const APP_COMPONENT: &str = "export default function App() {
  return (
    <div style={{ padding: 24 }}>
      <h1>React + Vite</h1>
      <p>Scaffolded project is ready.</p>
    </div>
  )
}
";

const TAILWIND_CONTENT: [&str; 2] = ["./index.html", "./src/**/*.{js,ts,jsx,tsx}"];

/// Render the React + Vite plan.
pub fn render(spec: &ScaffoldSpec) -> Result<ProjectStructure, DomainError> {
    let ts = spec.use_typescript();
    let ext = spec.source_ext();
    let mut s = ProjectStructure::new(spec.project_root());

    let build = if ts { "tsc -b && vite build" } else { "vite build" };
    s.add_file(
        "package.json",
        shared::package_json(&[("dev", "vite"), ("build", build), ("preview", "vite preview")])?,
    );

    s.add_file(format!("vite.config.{}", ext.module), VITE_CONFIG);
    if ts {
        s.add_file("tsconfig.json", TSCONFIG);
    }

    s.add_file("index.html", index_html(ext.component));

    s.add_directory("src");
    s.add_file(format!("src/main.{}", ext.component), main_entry(ts));
    s.add_file(format!("src/App.{}", ext.component), APP_COMPONENT);

    match spec.styling() {
        Styling::Tailwind => {
            s.add_file("postcss.config.js", shared::POSTCSS_CONFIG);
            s.add_file(
                "tailwind.config.js",
                shared::tailwind_config(&TAILWIND_CONTENT),
            );
            s.add_file("src/index.css", shared::TAILWIND_DIRECTIVES);
        }
        Styling::Plain => s.add_file("src/index.css", shared::PLAIN_RESET),
    }

    s.add_file("README_GEN.md", shared::readme(spec, &[]));
    Ok(s)
}

fn index_html(entry_ext: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>React + Vite</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.{entry_ext}"></script>
  </body>
</html>
"#
    )
}

fn main_entry(typescript: bool) -> String {
    // The non-null assertion only type-checks in TS.
    let root = if typescript {
        "document.getElementById('root')!"
    } else {
        "document.getElementById('root')"
    };

    format!(
        "import React from 'react'
import ReactDOM from 'react-dom/client'
import App from './App'
import './index.css'

ReactDOM.createRoot({root}).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
)
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Flavor;

    fn build(ts: bool, tailwind: bool) -> ProjectStructure {
        let spec = ScaffoldSpec::builder("vite-app", Flavor::ReactVite)
            .typescript(ts)
            .styling_framework(tailwind)
            .build()
            .unwrap();
        render(&spec).unwrap()
    }

    #[test]
    fn typescript_layout() {
        let s = build(true, true);

        assert!(s.file("vite.config.ts").is_some());
        assert!(s.file("tsconfig.json").is_some());
        assert!(s.file("src/App.tsx").is_some());
        assert!(
            s.file("src/main.tsx")
                .unwrap()
                .content
                .contains("getElementById('root')!")
        );
        assert!(
            s.file("index.html")
                .unwrap()
                .content
                .contains(r#"src="/src/main.tsx""#)
        );
        assert!(
            s.file("package.json")
                .unwrap()
                .content
                .contains("\"build\": \"tsc -b && vite build\"")
        );
    }

    #[test]
    fn javascript_layout() {
        let s = build(false, true);

        assert!(s.file("vite.config.js").is_some());
        assert!(s.file("vite.config.ts").is_none());
        assert!(s.file("tsconfig.json").is_none());
        assert!(!s.file("src/main.jsx").unwrap().content.contains("')!"));
        assert!(
            s.file("index.html")
                .unwrap()
                .content
                .contains(r#"src="/src/main.jsx""#)
        );
        assert!(
            s.file("package.json")
                .unwrap()
                .content
                .contains("\"build\": \"vite build\"")
        );
    }

    #[test]
    fn tailwind_adds_configs_and_directives() {
        let s = build(true, true);

        assert_eq!(s.file_count(), 10);
        assert_eq!(
            s.file("src/index.css").unwrap().content,
            shared::TAILWIND_DIRECTIVES
        );
        assert!(
            s.file("tailwind.config.js")
                .unwrap()
                .content
                .contains("\"./index.html\"")
        );
    }

    #[test]
    fn plain_styling_uses_reset() {
        let s = build(false, false);

        assert_eq!(s.file_count(), 7);
        assert!(s.file("postcss.config.js").is_none());
        assert_eq!(s.file("src/index.css").unwrap().content, shared::PLAIN_RESET);
    }

    #[test]
    fn readme_has_no_router_note() {
        let s = build(true, true);
        assert!(!s.file("README_GEN.md").unwrap().content.contains("Router"));
    }
}
