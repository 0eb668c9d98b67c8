//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stencil: a
//! front-end project scaffolder and an in-memory trading ledger, following
//! hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stencil-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ScaffoldService, LedgerService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │      (Driven: Filesystem, PriceSource)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, FixedPriceTable, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (ScaffoldSpec, blueprint, Account)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_core::prelude::*;
//! # fn demo(fs: Box<dyn Filesystem>, prices: Box<dyn PriceSource>) -> StencilResult<()> {
//! use rust_decimal::Decimal;
//!
//! let spec = ScaffoldSpec::builder("dashboard", Flavor::NextJs)
//!     .package_manager(PackageManager::Pnpm)
//!     .build()?;
//! let root = ScaffoldService::new(fs).scaffold(&spec)?;
//!
//! let account = Account::with_initial_deposit("Ada", "ada@example.com", Decimal::from(1000))?;
//! let mut ledger = LedgerService::new(account, prices);
//! ledger.buy("AAPL", Decimal::from(2))?;
//! # let _ = root;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AccountSummary, LedgerService, ScaffoldService,
        ports::{Filesystem, PriceSource},
    };
    pub use crate::domain::{
        Account, Flavor, PackageManager, ProjectStructure, RouterStyle, ScaffoldSpec, Transaction,
        TransactionKind,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
