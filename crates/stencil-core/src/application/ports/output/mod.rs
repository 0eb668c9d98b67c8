//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use rust_decimal::Decimal;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` overwrites; the last write to a path wins
/// - `create_dir_all` is idempotent
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for share prices.
///
/// Implemented by:
/// - `stencil_adapters::pricing::FixedPriceTable` (reference prices)
#[cfg_attr(test, automock)]
pub trait PriceSource: Send + Sync {
    /// Current price of one share of `symbol`.
    ///
    /// Fails with `DomainError::UnknownSymbol` for symbols the source does
    /// not quote.
    fn unit_price(&self, symbol: &str) -> StencilResult<Decimal>;
}
