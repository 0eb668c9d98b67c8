//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, LedgerService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{AccountSummary, FlavorInfo, HoldingLine, LedgerService, ScaffoldService};

pub use ports::{Filesystem, PriceSource};

pub use error::ApplicationError;
