use rust_decimal::Decimal;

use crate::domain::{
    entities::{LedgerState, ProjectStructure, ScaffoldSpec, Transaction},
    error::DomainError,
};

/// Validation entry points used by the application services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_spec(spec: &ScaffoldSpec) -> Result<(), DomainError> {
        spec.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }

    /// Reject a log whose replay would drive the balance below zero.
    pub fn validate_transaction_log(log: &[Transaction]) -> Result<(), DomainError> {
        let mut state = LedgerState::default();
        for tx in log {
            let available = state.balance;
            state.apply(tx)?;
            if state.balance < Decimal::ZERO {
                return Err(DomainError::InsufficientBalance {
                    requested: tx.amount,
                    available,
                });
            }
        }
        Ok(())
    }
}
