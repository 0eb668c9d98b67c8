//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use stencil_core::domain::{Flavor, PackageManager, RouterStyle};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Front-end scaffolding and a practice trading ledger",
    long_about = "Stencil writes React + Vite or Next.js project skeletons \
                  and runs an in-memory trading account session.",
    after_help = "EXAMPLES:\n\
        \x20 stencil new shop --flavor vite\n\
        \x20 stencil new docs --flavor next --router pages --js --no-tailwind\n\
        \x20 stencil ledger --deposit 1000 --script trades.txt\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a new front-end project.
    #[command(
        visible_alias = "n",
        about = "Create a new front-end project",
        after_help = "EXAMPLES:\n\
            \x20 stencil new shop   --flavor vite\n\
            \x20 stencil new blog   --flavor next --router pages\n\
            \x20 stencil new widget --flavor vite --js --pm pnpm --output ./apps\n\
            \x20 stencil new shop   --flavor next --dry-run"
    )]
    New(NewArgs),

    /// List the supported flavors.
    #[command(
        visible_alias = "ls",
        about = "List supported project flavors",
        after_help = "EXAMPLES:\n\
            \x20 stencil flavors\n\
            \x20 stencil flavors --format json"
    )]
    Flavors(FlavorsArgs),

    /// Run a trading ledger session.
    #[command(
        about = "Run an in-memory trading account session",
        after_help = "SESSION COMMANDS (one per line, '#' starts a comment):\n\
            \x20 deposit AMOUNT      withdraw AMOUNT\n\
            \x20 buy SYMBOL QTY      sell SYMBOL QTY\n\
            \x20 balance  holdings  value  pnl  history\n\n\
            EXAMPLES:\n\
            \x20 stencil ledger --deposit 1000 --script trades.txt\n\
            \x20 echo 'buy AAPL 2' | stencil ledger --deposit 1000 --format json"
    )]
    Ledger(LedgerArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init           # default location\n\
            \x20 stencil init --local   # .stencil.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration introspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get scaffold.package_manager\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stencil new`.
///
/// Unset toggles fall back to the `[scaffold]` config section.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Bare project folder name, created under the output directory.
    #[arg(value_name = "NAME", help = "Project folder name")]
    pub name: String,

    /// Project flavor.
    #[arg(
        short = 'f',
        long = "flavor",
        value_name = "FLAVOR",
        value_enum,
        help = "Project flavor"
    )]
    pub flavor: FlavorArg,

    /// Generate JavaScript sources instead of TypeScript.
    #[arg(long = "js", conflicts_with = "ts", help = "Use JavaScript")]
    pub js: bool,

    /// Generate TypeScript sources.
    #[arg(long = "ts", help = "Use TypeScript")]
    pub ts: bool,

    /// Add Tailwind CSS configs and directives.
    #[arg(
        long = "tailwind",
        conflicts_with = "no_tailwind",
        help = "Enable Tailwind CSS"
    )]
    pub tailwind: bool,

    /// Write a plain CSS reset instead of Tailwind.
    #[arg(long = "no-tailwind", help = "Disable Tailwind CSS")]
    pub no_tailwind: bool,

    /// Package manager named in the generated README.
    #[arg(long = "pm", value_name = "PM", value_enum, help = "Package manager")]
    pub package_manager: Option<PackageManagerArg>,

    /// Next.js router layout.
    #[arg(
        short = 'r',
        long = "router",
        value_name = "ROUTER",
        value_enum,
        help = "Router layout (Next.js only)"
    )]
    pub router: Option<RouterArg>,

    /// Directory the project folder is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: config target_root)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

impl NewArgs {
    /// Tri-state TypeScript flag: `None` when neither `--js` nor `--ts` was given.
    pub fn typescript(&self) -> Option<bool> {
        match (self.ts, self.js) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Tri-state Tailwind flag.
    pub fn tailwind(&self) -> Option<bool> {
        match (self.tailwind, self.no_tailwind) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// ── flavors ───────────────────────────────────────────────────────────────────

/// Arguments for `stencil flavors`.
#[derive(Debug, Args)]
pub struct FlavorsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `flavors` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── ledger ────────────────────────────────────────────────────────────────────

/// Arguments for `stencil ledger`.
#[derive(Debug, Args)]
pub struct LedgerArgs {
    /// Account owner name (default: config `ledger.owner_name`).
    #[arg(long = "owner", value_name = "NAME", help = "Account owner name")]
    pub owner: Option<String>,

    /// Account owner email (default: config `ledger.owner_email`).
    #[arg(long = "email", value_name = "EMAIL", help = "Account owner email")]
    pub email: Option<String>,

    /// Opening deposit recorded before the session starts.
    #[arg(long = "deposit", value_name = "AMOUNT", help = "Opening deposit")]
    pub deposit: Option<Decimal>,

    /// Read session commands from a file instead of stdin.
    #[arg(short = 's', long = "script", value_name = "FILE", help = "Command script")]
    pub script: Option<PathBuf>,

    /// Override or add a quoted price.
    #[arg(
        short = 'p',
        long = "price",
        value_name = "SYMBOL=PRICE",
        value_parser = parse_price,
        help = "Override a unit price (repeatable)"
    )]
    pub prices: Vec<(String, Decimal)>,

    /// How results are reported.
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        help = "Session output format"
    )]
    pub format: LedgerFormat,
}

/// Output format for the `ledger` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LedgerFormat {
    /// One line per command.
    Text,
    /// Only the final account summary, as JSON.
    Json,
}

fn parse_price(raw: &str) -> Result<(String, Decimal), String> {
    let (symbol, price) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=PRICE, got '{raw}'"))?;
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err("symbol cannot be empty".into());
    }
    let price: Decimal = price
        .trim()
        .parse()
        .map_err(|e| format!("invalid price '{price}': {e}"))?;
    if price <= Decimal::ZERO {
        return Err(format!("price must be positive, got {price}"));
    }
    Ok((symbol.to_ascii_uppercase(), price))
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stencil.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `scaffold.package_manager`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported flavors as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlavorArg {
    /// React + Vite. Also accepted as `react` or `react-vite`.
    #[value(alias = "react", alias = "react-vite")]
    Vite,
    /// Next.js. Also accepted as `nextjs`.
    #[value(alias = "nextjs", alias = "next-js")]
    Next,
}

impl From<FlavorArg> for Flavor {
    fn from(value: FlavorArg) -> Self {
        match value {
            FlavorArg::Vite => Flavor::ReactVite,
            FlavorArg::Next => Flavor::NextJs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(value: PackageManagerArg) -> Self {
        match value {
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
            PackageManagerArg::Pnpm => PackageManager::Pnpm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouterArg {
    App,
    Pages,
}

impl From<RouterArg> for RouterStyle {
    fn from(value: RouterArg) -> Self {
        match value {
            RouterArg::App => RouterStyle::App,
            RouterArg::Pages => RouterStyle::Pages,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
