//! Core domain layer for Stencil.
//!
//! Pure logic for both components: the scaffold blueprints and the ledger
//! account. All I/O (filesystem, price lookups) is reached through ports
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem or network calls
//! - **No tracing**: Events are emitted by the application services
//! - **Immutable inputs**: `ScaffoldSpec` and `ProjectStructure` are plain values
//! - **Guarded mutation**: `Account` only changes after its guard chain passes
//!
pub mod blueprint;
pub mod entities;
pub mod error;
pub mod guards;
pub mod value_objects;

mod validation;

pub use entities::{
    account::{Account, LedgerState, Transaction, TransactionKind},
    project_name::ProjectName,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    render_context::RenderContext,
    scaffold_spec::{DEFAULT_TARGET_ROOT, ScaffoldSpec, ScaffoldSpecBuilder},
};

pub use error::{DomainError, ErrorCategory};
pub use guards::{Guard, Quantity};
pub use value_objects::{Flavor, PackageManager, RouterStyle, SourceExt, Styling};

pub use entities::common::RelativePath;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    // ========================================================================
    // Cross-module scaffold checks
    // ========================================================================

    #[test]
    fn invalid_names_never_reach_the_blueprint() {
        for bad in ["a/b", "a\\b", "c:d", "tab\there", "new\nline", "", "  ", ".."] {
            let result = ScaffoldSpec::builder(bad, Flavor::ReactVite).build();
            assert!(
                matches!(result, Err(DomainError::InvalidName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn validator_accepts_rendered_plan() {
        let spec = ScaffoldSpec::builder("ok", Flavor::NextJs).build().unwrap();
        DomainValidator::validate_spec(&spec).unwrap();

        let structure = blueprint::render(&spec).unwrap();
        DomainValidator::validate_project_structure(&structure).unwrap();
    }

    #[test]
    fn rendered_root_is_project_root() {
        let spec = ScaffoldSpec::builder("site", Flavor::ReactVite)
            .target_root("out")
            .build()
            .unwrap();
        let structure = blueprint::render(&spec).unwrap();
        assert_eq!(structure.root(), spec.project_root());
    }

    // ========================================================================
    // Ledger log checks
    // ========================================================================

    #[test]
    fn account_log_passes_validation() {
        let mut acct = Account::with_initial_deposit("Ada", "ada@example.com", dec!(1000)).unwrap();
        acct.buy("TSLA", Quantity::whole(dec!(1)).unwrap(), dec!(700))
            .unwrap();
        acct.withdraw(dec!(300)).unwrap();

        DomainValidator::validate_transaction_log(acct.transactions()).unwrap();
    }

    #[test]
    fn overdrawn_log_is_rejected() {
        let mut rich = Account::with_initial_deposit("Ada", "ada@example.com", dec!(500)).unwrap();
        rich.withdraw(dec!(400)).unwrap();

        // Drop the opening deposit so the withdrawal overdraws.
        let log = &rich.transactions()[1..];
        assert_eq!(
            DomainValidator::validate_transaction_log(log),
            Err(DomainError::InsufficientBalance {
                requested: dec!(400),
                available: dec!(0),
            })
        );
    }

    #[test]
    fn guard_names_are_stable() {
        assert_eq!(Guard::PositiveAmount(dec!(1)).name(), "positive-amount");
        assert_eq!(
            Guard::SufficientShares {
                symbol: "AAPL",
                quantity: 1
            }
            .name(),
            "sufficient-shares"
        );
    }
}
