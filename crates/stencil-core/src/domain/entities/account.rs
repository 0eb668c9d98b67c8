//! The `Account` entity: cash, holdings and an append-only transaction log.
//!
//! Every mutating method runs its guard chain first and appends exactly one
//! transaction on success. A rejected operation leaves balance, holdings and
//! the log untouched.
//!
//! Prices are supplied by the caller. Looking them up is an application
//! concern (see `application::ports::PriceSource`).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    guards::{Guard, Quantity, check_all, in_range},
};

// ── Transaction ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Buy,
    Sell,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry in the ledger. Cash movements carry only `amount`; trades also
/// carry the symbol and share count, with `amount` being the cost or revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    fn cash(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            symbol: None,
            quantity: None,
            amount,
            timestamp: Utc::now(),
        }
    }

    fn trade(kind: TransactionKind, symbol: &str, quantity: u64, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            symbol: Some(symbol.to_string()),
            quantity: Some(quantity),
            amount,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:<8}", self.timestamp.format("%Y-%m-%d %H:%M:%S"), self.kind)?;
        if let (Some(symbol), Some(qty)) = (&self.symbol, self.quantity) {
            write!(f, " {qty} x {symbol}")?;
        }
        write!(f, " {}", self.amount)
    }
}

// ── Replay ────────────────────────────────────────────────────────────────────

/// Balance and holdings recomputed from a transaction log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub balance: Decimal,
    pub holdings: BTreeMap<String, u64>,
}

impl LedgerState {
    /// Fold a log into state.
    pub fn replay(transactions: &[Transaction]) -> Result<Self, DomainError> {
        let mut state = Self::default();
        for tx in transactions {
            state.apply(tx)?;
        }
        Ok(state)
    }

    /// Apply one entry. Entries are trusted: a sell of shares that are not
    /// held clamps the position at zero. Only arithmetic overflow fails.
    pub fn apply(&mut self, tx: &Transaction) -> Result<(), DomainError> {
        match tx.kind {
            TransactionKind::Deposit => {
                self.balance = in_range(self.balance.checked_add(tx.amount), tx.amount)?;
            }
            TransactionKind::Withdraw => {
                self.balance = in_range(self.balance.checked_sub(tx.amount), tx.amount)?;
            }
            TransactionKind::Buy => {
                self.balance = in_range(self.balance.checked_sub(tx.amount), tx.amount)?;
                if let (Some(sym), Some(qty)) = (&tx.symbol, tx.quantity) {
                    let held = self.holdings.get(sym).copied().unwrap_or(0);
                    let total = held
                        .checked_add(qty)
                        .ok_or(DomainError::InvalidQuantity {
                            quantity: Decimal::from(qty),
                        })?;
                    self.holdings.insert(sym.clone(), total);
                }
            }
            TransactionKind::Sell => {
                self.balance = in_range(self.balance.checked_add(tx.amount), tx.amount)?;
                if let (Some(sym), Some(qty)) = (&tx.symbol, tx.quantity) {
                    let remaining = self
                        .holdings
                        .get(sym)
                        .map_or(0, |h| h.saturating_sub(qty));
                    if remaining == 0 {
                        self.holdings.remove(sym);
                    } else {
                        self.holdings.insert(sym.clone(), remaining);
                    }
                }
            }
        }
        Ok(())
    }
}

// ── Account ───────────────────────────────────────────────────────────────────

/// A single-owner trading account.
///
/// Not synchronised: wrap in a lock if shared, since every operation is a
/// check followed by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    owner_name: String,
    owner_email: String,
    balance: Decimal,
    holdings: BTreeMap<String, u64>,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Open an empty account.
    pub fn open(owner_name: impl Into<String>, owner_email: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            owner_email: owner_email.into(),
            balance: Decimal::ZERO,
            holdings: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Open an account and record the opening deposit as its first transaction.
    pub fn with_initial_deposit(
        owner_name: impl Into<String>,
        owner_email: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, DomainError> {
        let mut account = Self::open(owner_name, owner_email);
        account.deposit(amount)?;
        Ok(account)
    }

    // ── reads ────────────────────────────────────────────────────────────

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Snapshot of current holdings. Mutating it does not affect the account.
    pub fn holdings(&self) -> BTreeMap<String, u64> {
        self.holdings.clone()
    }

    pub fn shares_of(&self, symbol: &str) -> u64 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Amount of the first deposit in the log, or zero.
    pub fn initial_deposit(&self) -> Decimal {
        self.transactions
            .iter()
            .find(|tx| tx.kind == TransactionKind::Deposit)
            .map_or(Decimal::ZERO, |tx| tx.amount)
    }

    /// Recompute state from the log.
    pub fn replay(&self) -> Result<LedgerState, DomainError> {
        LedgerState::replay(&self.transactions)
    }

    /// Run guards against the current state without mutating anything.
    pub fn check(&self, guards: &[Guard<'_>]) -> Result<(), DomainError> {
        check_all(guards, self)
    }

    // ── operations ───────────────────────────────────────────────────────

    /// Add cash. Non-positive amounts and totals past `Decimal::MAX` are
    /// rejected.
    pub fn deposit(&mut self, amount: Decimal) -> Result<&Transaction, DomainError> {
        self.check(&[Guard::PositiveAmount(amount)])?;

        self.balance = in_range(self.balance.checked_add(amount), amount)?;
        Ok(self.record(Transaction::cash(TransactionKind::Deposit, amount)))
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<&Transaction, DomainError> {
        self.check(&[
            Guard::PositiveAmount(amount),
            Guard::SufficientBalance(amount),
        ])?;

        self.balance -= amount;
        Ok(self.record(Transaction::cash(TransactionKind::Withdraw, amount)))
    }

    /// Buy `quantity` shares at `unit_price`.
    pub fn buy(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        unit_price: Decimal,
    ) -> Result<&Transaction, DomainError> {
        self.check(&[Guard::PositivePrice {
            symbol,
            price: unit_price,
        }])?;
        let cost = in_range(unit_price.checked_mul(quantity.into()), unit_price)?;
        self.check(&[Guard::SufficientBalance(cost)])?;
        let held = self
            .shares_of(symbol)
            .checked_add(quantity.get())
            .ok_or(DomainError::InvalidQuantity {
                quantity: quantity.into(),
            })?;

        self.balance -= cost;
        self.holdings.insert(symbol.to_string(), held);
        Ok(self.record(Transaction::trade(
            TransactionKind::Buy,
            symbol,
            quantity.get(),
            cost,
        )))
    }

    /// Sell `quantity` shares at `unit_price`. The position is dropped when
    /// it reaches zero.
    pub fn sell(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        unit_price: Decimal,
    ) -> Result<&Transaction, DomainError> {
        self.check(&[
            Guard::SufficientShares {
                symbol,
                quantity: quantity.get(),
            },
            Guard::PositivePrice {
                symbol,
                price: unit_price,
            },
        ])?;
        let revenue = in_range(unit_price.checked_mul(quantity.into()), unit_price)?;
        let balance = in_range(self.balance.checked_add(revenue), revenue)?;

        self.balance = balance;

        let remaining = self.shares_of(symbol) - quantity.get();
        if remaining == 0 {
            self.holdings.remove(symbol);
        } else {
            self.holdings.insert(symbol.to_string(), remaining);
        }

        Ok(self.record(Transaction::trade(
            TransactionKind::Sell,
            symbol,
            quantity.get(),
            revenue,
        )))
    }

    fn record(&mut self, tx: Transaction) -> &Transaction {
        self.transactions.push(tx);
        &self.transactions[self.transactions.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn qty(n: u64) -> Quantity {
        Quantity::whole(Decimal::from(n)).unwrap()
    }

    fn account() -> Account {
        Account::with_initial_deposit("Ada", "ada@example.com", dec!(1000)).unwrap()
    }

    #[test]
    fn opening_deposit_is_logged() {
        let acct = account();
        assert_eq!(acct.balance(), dec!(1000));
        assert_eq!(acct.transactions().len(), 1);
        assert_eq!(acct.transactions()[0].kind, TransactionKind::Deposit);
        assert_eq!(acct.initial_deposit(), dec!(1000));
    }

    #[test]
    fn open_starts_empty() {
        let acct = Account::open("Ada", "ada@example.com");
        assert_eq!(acct.balance(), Decimal::ZERO);
        assert!(acct.transactions().is_empty());
        assert_eq!(acct.initial_deposit(), Decimal::ZERO);
    }

    #[test]
    fn deposit_larger_than_balance_is_allowed() {
        let mut acct = account();
        acct.deposit(dec!(5000)).unwrap();
        assert_eq!(acct.balance(), dec!(6000));
    }

    #[test]
    fn withdraw_beyond_balance_is_rejected_without_side_effects() {
        let mut acct = account();
        let before = acct.clone();

        assert!(matches!(
            acct.withdraw(dec!(1000.01)),
            Err(DomainError::InsufficientBalance { .. })
        ));
        assert_eq!(acct, before);
    }

    #[test]
    fn buy_then_sell_round_trip() {
        let mut acct = account();
        acct.buy("TSLA", qty(1), dec!(700)).unwrap();
        assert_eq!(acct.balance(), dec!(300));
        assert_eq!(acct.shares_of("TSLA"), 1);

        acct.sell("TSLA", qty(1), dec!(700)).unwrap();
        assert_eq!(acct.balance(), dec!(1000));
        assert!(acct.holdings().is_empty());
    }

    #[test]
    fn partial_sell_keeps_position() {
        let mut acct = account();
        acct.buy("AAPL", qty(3), dec!(150)).unwrap();
        acct.sell("AAPL", qty(1), dec!(150)).unwrap();
        assert_eq!(acct.shares_of("AAPL"), 2);
    }

    #[test]
    fn holdings_are_a_defensive_copy() {
        let mut acct = account();
        acct.buy("AAPL", qty(1), dec!(150)).unwrap();

        let mut copy = acct.holdings();
        copy.insert("GOOGL".into(), 99);

        assert!(!acct.holdings().contains_key("GOOGL"));
    }

    #[test]
    fn replay_matches_running_totals() {
        let mut acct = account();
        acct.buy("AAPL", qty(2), dec!(150)).unwrap();
        acct.withdraw(dec!(100)).unwrap();
        acct.sell("AAPL", qty(2), dec!(160)).unwrap();
        acct.deposit(dec!(25.5)).unwrap();

        let state = acct.replay().unwrap();
        assert_eq!(state.balance, acct.balance());
        assert_eq!(state.holdings, acct.holdings());
    }

    #[test]
    fn deposit_past_decimal_max_is_rejected_without_side_effects() {
        let mut acct = Account::with_initial_deposit("Ada", "ada@example.com", Decimal::MAX)
            .unwrap();
        let before = acct.clone();

        assert!(matches!(
            acct.deposit(dec!(1)),
            Err(DomainError::InvalidAmount { ref reason, .. }) if reason == "amount out of range"
        ));
        assert_eq!(acct, before);
    }

    #[test]
    fn trade_cost_overflow_is_rejected() {
        let mut acct = account();
        let before = acct.clone();

        assert!(matches!(
            acct.buy("AAPL", qty(u64::MAX), Decimal::MAX),
            Err(DomainError::InvalidAmount { .. })
        ));
        assert_eq!(acct, before);
    }

    #[test]
    fn sell_revenue_overflowing_balance_is_rejected() {
        let mut acct = Account::with_initial_deposit("Ada", "ada@example.com", Decimal::MAX)
            .unwrap();
        acct.buy("AAPL", qty(1), dec!(1)).unwrap();
        acct.deposit(dec!(1)).unwrap();
        let before = acct.clone();

        assert!(matches!(
            acct.sell("AAPL", qty(1), dec!(2)),
            Err(DomainError::InvalidAmount { .. })
        ));
        assert_eq!(acct, before);
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        let mut acct = account();
        let before = acct.clone();

        assert!(matches!(
            acct.buy("AAPL", qty(1), dec!(-150)),
            Err(DomainError::InvalidPrice { .. })
        ));
        acct.buy("AAPL", qty(1), dec!(10)).unwrap();
        assert!(matches!(
            acct.sell("AAPL", qty(1), dec!(0)),
            Err(DomainError::InvalidPrice { .. })
        ));
        assert_eq!(acct.balance(), before.balance() - dec!(10));
        assert_eq!(acct.shares_of("AAPL"), 1);
    }

    #[test]
    fn transaction_serializes_without_empty_trade_fields() {
        let acct = account();
        let json = serde_json::to_value(&acct.transactions()[0]).unwrap();
        assert_eq!(json["kind"], "deposit");
        assert!(json.get("symbol").is_none());
    }
}
