//! Domain value objects: Flavor, PackageManager, RouterStyle, Styling.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold no file-layout logic. Everything that decides which files get
//! written lives in `blueprint`. This file defines the types, their string
//! representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Flavor ───────────────────────────────────────────────────────────────────

/// The kind of front-end project to scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    /// Bundler + framework app: a single `src` tree served by Vite.
    ReactVite,
    /// Meta-framework app: `app/` or `pages/` tree plus a config root.
    NextJs,
}

impl Flavor {
    pub const ALL: [Flavor; 2] = [Flavor::ReactVite, Flavor::NextJs];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReactVite => "react-vite",
            Self::NextJs => "nextjs",
        }
    }

    /// Human-readable name used in generated READMEs and page headings.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::ReactVite => "React + Vite",
            Self::NextJs => "Next.js",
        }
    }

    /// Name of the generator credited in `README_GEN.md`.
    pub const fn generator_name(&self) -> &'static str {
        match self {
            Self::ReactVite => "ReactViteScaffoldTool",
            Self::NextJs => "NextJsScaffoldTool",
        }
    }

    /// Whether the router style dimension applies to this flavor.
    pub const fn uses_router(&self) -> bool {
        matches!(self, Self::NextJs)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "react-vite" | "vite" | "react" => Ok(Self::ReactVite),
            "nextjs" | "next" | "next-js" => Ok(Self::NextJs),
            other => Err(DomainError::InvalidSpec(format!("unknown flavor: {other}"))),
        }
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// Package manager named in the generated README instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    pub fn run_command(&self, script: &str) -> String {
        format!("{} run {}", self.as_str(), script)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::InvalidSpec(format!(
                "unknown package manager: {other} (expected npm, yarn or pnpm)"
            ))),
        }
    }
}

// ── RouterStyle ──────────────────────────────────────────────────────────────

/// Next.js routing layout. Ignored by every other flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterStyle {
    /// `app/page.tsx` entry with `app/globals.css`.
    #[default]
    App,
    /// `pages/index.tsx` entry with `styles/globals.css`.
    Pages,
}

impl RouterStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Pages => "pages",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::App => "App Router",
            Self::Pages => "Pages Router",
        }
    }
}

impl fmt::Display for RouterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouterStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "app" | "app-router" => Ok(Self::App),
            "pages" | "pages-router" => Ok(Self::Pages),
            other => Err(DomainError::InvalidSpec(format!(
                "unknown router style: {other}"
            ))),
        }
    }
}

// ── Styling ──────────────────────────────────────────────────────────────────

/// Stylesheet strategy derived from the styling flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Styling {
    /// Utility-first framework: PostCSS + Tailwind configs and directives.
    Tailwind,
    /// A small reset stylesheet and nothing else.
    Plain,
}

impl Styling {
    pub const fn from_flag(use_styling_framework: bool) -> Self {
        if use_styling_framework {
            Self::Tailwind
        } else {
            Self::Plain
        }
    }
}

/// Source-file extensions for a TypeScript/JavaScript choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceExt {
    /// Component files: `tsx` or `jsx`.
    pub component: &'static str,
    /// Plain module files: `ts` or `js`.
    pub module: &'static str,
}

impl SourceExt {
    pub const fn for_typescript(use_typescript: bool) -> Self {
        if use_typescript {
            Self {
                component: "tsx",
                module: "ts",
            }
        } else {
            Self {
                component: "jsx",
                module: "js",
            }
        }
    }
}
