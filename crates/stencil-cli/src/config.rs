//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STENCIL_*` environment variables, `__` between section and key
//!    (`STENCIL_SCAFFOLD__PACKAGE_MANAGER=pnpm`)
//! 3. Config file: `--config` if given, otherwise the user config dir and
//!    then `.stencil.toml` in the working directory
//! 4. Built-in defaults (always present)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ::config::{Config, Environment, File, FileFormat, FileSourceFile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stencil_core::domain::{DEFAULT_TARGET_ROOT, PackageManager};

use crate::cli::OutputFormat;

/// Local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".stencil.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `stencil new`.
    pub scaffold: ScaffoldDefaults,
    /// Defaults for `stencil ledger`.
    pub ledger: LedgerDefaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldDefaults {
    pub package_manager: PackageManager,
    pub typescript: bool,
    pub tailwind: bool,
    pub target_root: PathBuf,
}

impl Default for ScaffoldDefaults {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::Npm,
            typescript: true,
            tailwind: true,
            target_root: PathBuf::from(DEFAULT_TARGET_ROOT),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerDefaults {
    pub owner_name: String,
    pub owner_email: String,
    /// Merged onto the reference price table. Symbols are upper-cased.
    pub prices: BTreeMap<String, Decimal>,
}

impl Default for LedgerDefaults {
    fn default() -> Self {
        Self {
            owner_name: "Trader".into(),
            owner_email: "trader@example.com".into(),
            prices: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration: defaults, then a file, then the environment.
    ///
    /// An explicit `config_file` must exist. The implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to seed default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(toml_file(path).required(true)),
            None => builder
                .add_source(toml_file(&Self::config_path()).required(false))
                .add_source(toml_file(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix("STENCIL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.normalised()
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Upper-case price symbols and reject non-positive prices.
    fn normalised(mut self) -> anyhow::Result<Self> {
        if let Some((symbol, price)) = self
            .ledger
            .prices
            .iter()
            .find(|(_, price)| **price <= Decimal::ZERO)
        {
            anyhow::bail!("ledger price for '{symbol}' must be positive, got {price}");
        }

        self.ledger.prices = std::mem::take(&mut self.ledger.prices)
            .into_iter()
            .map(|(symbol, price)| (symbol.to_ascii_uppercase(), price))
            .collect();
        Ok(self)
    }
}

fn toml_file(path: &Path) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}
