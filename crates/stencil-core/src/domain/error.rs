// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use rust_decimal::Decimal;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so callers can keep them in a session log)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Scaffold input
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid scaffold specification: {0}")]
    InvalidSpec(String),

    #[error("Project structure is empty")]
    EmptyStructure,

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Blueprint rendering failed: {0}")]
    BlueprintRender(String),

    // ========================================================================
    // Ledger guards
    // ========================================================================
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Decimal, reason: String },

    #[error("Invalid quantity {quantity}: must be a positive whole number of shares")]
    InvalidQuantity { quantity: Decimal },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Insufficient shares of {symbol} to sell {requested} units (held: {held})")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        held: u64,
    },

    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("Invalid price {price} for {symbol}: must be greater than zero")]
    InvalidPrice { symbol: String, price: Decimal },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { .. } => vec![
                "Use a bare folder name without path separators".into(),
                "Characters /, \\, : and control characters are not allowed".into(),
                "Examples: my-app, dashboard, web_client".into(),
            ],
            Self::InvalidSpec(msg) => vec![
                "Check your scaffold options".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidAmount { .. } => vec![
                "Amounts must be greater than zero".into(),
                "Totals must stay within the supported decimal range".into(),
            ],
            Self::InvalidQuantity { .. } => vec![
                "Shares are traded in whole units".into(),
                "Example: buy AAPL 2".into(),
            ],
            Self::InsufficientBalance { available, .. } => vec![
                format!("Available cash: {}", available),
                "Deposit more funds or reduce the order size".into(),
            ],
            Self::InsufficientShares { symbol, held, .. } => vec![
                format!("You currently hold {} share(s) of {}", held, symbol),
                "Use 'holdings' to list current positions".into(),
            ],
            Self::UnknownSymbol { .. } => vec![
                "The price source does not quote this symbol".into(),
                "Reference symbols: AAPL, TSLA, GOOGL".into(),
            ],
            Self::InvalidPrice { symbol, .. } => vec![
                format!("Check the configured price for {}", symbol),
                "Prices in [ledger.prices] and --price must be positive".into(),
            ],
            Self::EmptyStructure
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::BlueprintRender(_) => {
                vec!["This is a blueprint defect, please report it".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::InvalidSpec(_)
            | Self::InvalidAmount { .. }
            | Self::InvalidQuantity { .. }
            | Self::InvalidPrice { .. } => ErrorCategory::Validation,
            Self::InsufficientBalance { .. } | Self::InsufficientShares { .. } => {
                ErrorCategory::Rejected
            }
            Self::UnknownSymbol { .. } => ErrorCategory::NotFound,
            Self::EmptyStructure
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::BlueprintRender(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Rejected,
    NotFound,
    Internal,
}
