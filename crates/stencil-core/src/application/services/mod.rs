//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "buy shares".

pub mod ledger_service;
pub mod scaffold_service;

pub use ledger_service::{AccountSummary, HoldingLine, LedgerService};
pub use scaffold_service::{FlavorInfo, ScaffoldService};
