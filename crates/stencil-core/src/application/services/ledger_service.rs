//! Ledger Service - trading operations against an account.
//!
//! The service owns one [`Account`] and a [`PriceSource`]. Guards that need
//! no price run before any lookup, so an invalid quantity never costs a
//! quote. A failed operation leaves the account untouched.
//!
//! Single-threaded by construction: every mutating method takes `&mut self`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::PriceSource,
    domain::{Account, DomainError, DomainValidator, Guard, Quantity, Transaction, guards::in_range},
    error::StencilResult,
};

/// One position valued at the current price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoldingLine {
    pub symbol: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub value: Decimal,
}

/// Read-only snapshot of an account for display and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub owner_name: String,
    pub owner_email: String,
    pub balance: Decimal,
    pub holdings: Vec<HoldingLine>,
    pub portfolio_value: Decimal,
    pub initial_deposit: Decimal,
    pub profit_loss: Decimal,
    pub net_profit_loss: Decimal,
    pub transactions: Vec<Transaction>,
}

/// Trading service over a single account.
pub struct LedgerService {
    account: Account,
    prices: Box<dyn PriceSource>,
}

impl LedgerService {
    pub fn new(account: Account, prices: Box<dyn PriceSource>) -> Self {
        Self { account, prices }
    }

    // ── operations ───────────────────────────────────────────────────────

    #[instrument(skip(self), fields(owner = %self.account.owner_name()))]
    pub fn deposit(&mut self, amount: Decimal) -> StencilResult<Transaction> {
        let tx = self
            .account
            .deposit(amount)
            .inspect_err(|e| info!(error = %e, "Deposit rejected"))?
            .clone();

        info!(id = %tx.id, balance = %self.account.balance(), "Deposited");
        Ok(tx)
    }

    #[instrument(skip(self), fields(owner = %self.account.owner_name()))]
    pub fn withdraw(&mut self, amount: Decimal) -> StencilResult<Transaction> {
        let tx = self
            .account
            .withdraw(amount)
            .inspect_err(|e| info!(error = %e, "Withdrawal rejected"))?
            .clone();

        info!(id = %tx.id, balance = %self.account.balance(), "Withdrew");
        Ok(tx)
    }

    /// Buy whole shares at the current price.
    ///
    /// Order of checks: whole quantity, known symbol, sufficient balance.
    #[instrument(skip(self), fields(owner = %self.account.owner_name()))]
    pub fn buy(&mut self, symbol: &str, quantity: Decimal) -> StencilResult<Transaction> {
        let quantity = Quantity::whole(quantity)
            .inspect_err(|e| info!(error = %e, "Buy rejected"))?;
        let unit_price = self.quote(symbol)?;

        let tx = self
            .account
            .buy(symbol, quantity, unit_price)
            .inspect_err(|e| info!(error = %e, "Buy rejected"))?
            .clone();

        info!(
            id = %tx.id,
            cost = %tx.amount,
            balance = %self.account.balance(),
            "Bought"
        );
        Ok(tx)
    }

    /// Sell whole shares at the current price.
    ///
    /// Order of checks: whole quantity, shares held, known symbol.
    #[instrument(skip(self), fields(owner = %self.account.owner_name()))]
    pub fn sell(&mut self, symbol: &str, quantity: Decimal) -> StencilResult<Transaction> {
        let quantity = Quantity::whole(quantity)
            .inspect_err(|e| info!(error = %e, "Sell rejected"))?;
        self.account
            .check(&[Guard::SufficientShares {
                symbol,
                quantity: quantity.get(),
            }])
            .inspect_err(|e| info!(error = %e, "Sell rejected"))?;
        let unit_price = self.quote(symbol)?;

        let tx = self.account.sell(symbol, quantity, unit_price)?.clone();

        info!(
            id = %tx.id,
            revenue = %tx.amount,
            balance = %self.account.balance(),
            "Sold"
        );
        Ok(tx)
    }

    // ── valuation ────────────────────────────────────────────────────────

    /// Sum of quantity × current price over all holdings.
    pub fn portfolio_value(&self) -> StencilResult<Decimal> {
        Ok(total_value(&self.holding_lines()?)?)
    }

    /// Portfolio value minus the initial deposit. Cash is not counted.
    pub fn profit_loss(&self) -> StencilResult<Decimal> {
        let value = self.portfolio_value()?;
        Ok(self.gross_profit_loss(value)?)
    }

    /// Cash plus portfolio value minus the initial deposit.
    pub fn net_profit_loss(&self) -> StencilResult<Decimal> {
        let value = self.portfolio_value()?;
        Ok(self.net_of_cash(value)?)
    }

    // ── reads ────────────────────────────────────────────────────────────

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    pub fn holdings(&self) -> BTreeMap<String, u64> {
        self.account.holdings()
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.account.transactions()
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Snapshot of the account. The log is checked to replay without
    /// overdrawing before anything is valued.
    pub fn summary(&self) -> StencilResult<AccountSummary> {
        DomainValidator::validate_transaction_log(self.account.transactions())?;

        let holdings = self.holding_lines()?;
        let portfolio_value = total_value(&holdings)?;

        Ok(AccountSummary {
            owner_name: self.account.owner_name().to_string(),
            owner_email: self.account.owner_email().to_string(),
            balance: self.account.balance(),
            holdings,
            portfolio_value,
            initial_deposit: self.account.initial_deposit(),
            profit_loss: self.gross_profit_loss(portfolio_value)?,
            net_profit_loss: self.net_of_cash(portfolio_value)?,
            transactions: self.account.transactions().to_vec(),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Current price of `symbol`. Non-positive quotes are refused.
    fn quote(&self, symbol: &str) -> StencilResult<Decimal> {
        let price = self
            .prices
            .unit_price(symbol)
            .inspect_err(|e| info!(symbol, error = %e, "Price lookup failed"))?;
        self.account
            .check(&[Guard::PositivePrice { symbol, price }])
            .inspect_err(|e| info!(error = %e, "Quote rejected"))?;
        debug!(symbol, %price, "Quoted");
        Ok(price)
    }

    fn gross_profit_loss(&self, portfolio_value: Decimal) -> Result<Decimal, DomainError> {
        let initial = self.account.initial_deposit();
        in_range(portfolio_value.checked_sub(initial), initial)
    }

    fn net_of_cash(&self, portfolio_value: Decimal) -> Result<Decimal, DomainError> {
        let balance = self.account.balance();
        let worth = in_range(balance.checked_add(portfolio_value), portfolio_value)?;
        let initial = self.account.initial_deposit();
        in_range(worth.checked_sub(initial), initial)
    }

    fn holding_lines(&self) -> StencilResult<Vec<HoldingLine>> {
        self.account
            .holdings()
            .into_iter()
            .map(|(symbol, quantity)| -> StencilResult<HoldingLine> {
                let unit_price = self.quote(&symbol)?;
                Ok(HoldingLine {
                    value: in_range(
                        unit_price.checked_mul(Decimal::from(quantity)),
                        unit_price,
                    )?,
                    symbol,
                    quantity,
                    unit_price,
                })
            })
            .collect()
    }
}

fn total_value(lines: &[HoldingLine]) -> Result<Decimal, DomainError> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        in_range(total.checked_add(line.value), line.value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockPriceSource;
    use crate::domain::{DomainError, TransactionKind};
    use crate::error::StencilError;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn funded(amount: Decimal, prices: MockPriceSource) -> LedgerService {
        let account = Account::with_initial_deposit("Ada", "ada@example.com", amount).unwrap();
        LedgerService::new(account, Box::new(prices))
    }

    fn domain(err: StencilError) -> DomainError {
        match err {
            StencilError::Domain(e) => e,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[test]
    fn fractional_buy_never_asks_for_a_price() {
        let mut prices = MockPriceSource::new();
        prices.expect_unit_price().never();

        let mut ledger = funded(dec!(1000), prices);
        let err = domain(ledger.buy("AAPL", dec!(1.5)).unwrap_err());

        assert_eq!(err, DomainError::InvalidQuantity { quantity: dec!(1.5) });
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn selling_unheld_shares_never_asks_for_a_price() {
        let mut prices = MockPriceSource::new();
        prices.expect_unit_price().never();

        let mut ledger = funded(dec!(1000), prices);
        let err = domain(ledger.sell("AAPL", dec!(1)).unwrap_err());

        assert!(matches!(err, DomainError::InsufficientShares { held: 0, .. }));
        assert_eq!(ledger.balance(), dec!(1000));
    }

    #[test]
    fn unknown_symbol_leaves_account_untouched() {
        let mut prices = MockPriceSource::new();
        prices
            .expect_unit_price()
            .with(eq("NOPE"))
            .returning(|s| {
                Err(DomainError::UnknownSymbol {
                    symbol: s.to_string(),
                }
                .into())
            });

        let mut ledger = funded(dec!(1000), prices);
        let before = ledger.account().clone();

        assert!(ledger.buy("NOPE", dec!(1)).is_err());
        assert_eq!(ledger.account(), &before);
    }

    #[test]
    fn buy_uses_quoted_price() {
        let mut prices = MockPriceSource::new();
        prices
            .expect_unit_price()
            .with(eq("TSLA"))
            .returning(|_| Ok(dec!(700)));

        let mut ledger = funded(dec!(1000), prices);
        let tx = ledger.buy("TSLA", dec!(1)).unwrap();

        assert_eq!(tx.kind, TransactionKind::Buy);
        assert_eq!(tx.amount, dec!(700));
        assert_eq!(ledger.balance(), dec!(300));
    }

    #[test]
    fn sell_uses_current_price_not_purchase_price() {
        let mut prices = MockPriceSource::new();
        let mut seq = mockall::Sequence::new();
        prices
            .expect_unit_price()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(dec!(100)));
        prices
            .expect_unit_price()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(dec!(130)));

        let mut ledger = funded(dec!(500), prices);
        ledger.buy("AAPL", dec!(2)).unwrap();
        let tx = ledger.sell("AAPL", dec!(2)).unwrap();

        assert_eq!(tx.amount, dec!(260));
        assert_eq!(ledger.balance(), dec!(560));
    }

    #[test]
    fn profit_loss_ignores_cash() {
        let mut prices = MockPriceSource::new();
        prices.expect_unit_price().returning(|_| Ok(dec!(150)));

        let mut ledger = funded(dec!(1000), prices);
        ledger.buy("AAPL", dec!(2)).unwrap();

        assert_eq!(ledger.portfolio_value().unwrap(), dec!(300));
        assert_eq!(ledger.profit_loss().unwrap(), dec!(-700));
        assert_eq!(ledger.net_profit_loss().unwrap(), dec!(0));
    }

    #[test]
    fn deposit_overflow_is_a_typed_error() {
        let mut ledger = funded(Decimal::MAX, MockPriceSource::new());

        let err = domain(ledger.deposit(dec!(1)).unwrap_err());

        assert!(
            matches!(err, DomainError::InvalidAmount { ref reason, .. } if reason == "amount out of range")
        );
        assert_eq!(ledger.balance(), Decimal::MAX);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn negative_quote_cannot_overdraw_on_sell() {
        let mut prices = MockPriceSource::new();
        let mut seq = mockall::Sequence::new();
        prices
            .expect_unit_price()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(dec!(10)));
        prices
            .expect_unit_price()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(dec!(-500)));

        let mut ledger = funded(dec!(10), prices);
        ledger.buy("X", dec!(1)).unwrap();
        let err = domain(ledger.sell("X", dec!(1)).unwrap_err());

        assert_eq!(
            err,
            DomainError::InvalidPrice {
                symbol: "X".into(),
                price: dec!(-500),
            }
        );
        assert_eq!(ledger.balance(), dec!(0));
        assert_eq!(ledger.holdings().get("X"), Some(&1));
    }

    #[test]
    fn zero_quote_is_refused_for_buy() {
        let mut prices = MockPriceSource::new();
        prices.expect_unit_price().returning(|_| Ok(dec!(0)));

        let mut ledger = funded(dec!(100), prices);

        assert!(matches!(
            domain(ledger.buy("FREE", dec!(1)).unwrap_err()),
            DomainError::InvalidPrice { .. }
        ));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut prices = MockPriceSource::new();
        prices.expect_unit_price().returning(|_| Ok(dec!(150)));

        let mut ledger = funded(dec!(1000), prices);
        ledger.buy("AAPL", dec!(2)).unwrap();

        let summary = ledger.summary().unwrap();
        assert_eq!(summary.holdings.len(), 1);
        assert_eq!(summary.holdings[0].value, dec!(300));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["owner_name"], "Ada");
        assert_eq!(json["balance"], "700");
        assert_eq!(json["transactions"].as_array().unwrap().len(), 2);
    }
}
