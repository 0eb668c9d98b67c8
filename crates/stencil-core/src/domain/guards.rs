//! Ordered precondition checks for ledger operations.
//!
//! Each ledger operation declares its guards as a slice and runs them in
//! order before touching any state. The first failing guard wins, so the
//! order of the slice is part of the operation's contract.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::domain::{entities::account::Account, error::DomainError};

/// A single precondition with a typed failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard<'a> {
    /// Amount must be strictly positive.
    PositiveAmount(Decimal),
    /// Quantity must be a positive whole number.
    WholeQuantity(Decimal),
    /// Cash balance must cover the amount.
    SufficientBalance(Decimal),
    /// Holdings of `symbol` must cover `quantity`.
    SufficientShares { symbol: &'a str, quantity: u64 },
    /// A quoted unit price must be strictly positive.
    PositivePrice { symbol: &'a str, price: Decimal },
}

impl Guard<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PositiveAmount(_) => "positive-amount",
            Self::WholeQuantity(_) => "whole-quantity",
            Self::SufficientBalance(_) => "sufficient-balance",
            Self::SufficientShares { .. } => "sufficient-shares",
            Self::PositivePrice { .. } => "positive-price",
        }
    }

    pub fn check(&self, account: &Account) -> Result<(), DomainError> {
        match *self {
            Self::PositiveAmount(amount) => {
                if amount <= Decimal::ZERO {
                    return Err(DomainError::InvalidAmount {
                        amount,
                        reason: "amount must be greater than zero".into(),
                    });
                }
                Ok(())
            }
            Self::WholeQuantity(quantity) => Quantity::whole(quantity).map(|_| ()),
            Self::SufficientBalance(requested) => {
                let available = account.balance();
                if requested > available {
                    return Err(DomainError::InsufficientBalance {
                        requested,
                        available,
                    });
                }
                Ok(())
            }
            Self::SufficientShares { symbol, quantity } => {
                let held = account.shares_of(symbol);
                if held < quantity {
                    return Err(DomainError::InsufficientShares {
                        symbol: symbol.to_string(),
                        requested: quantity,
                        held,
                    });
                }
                Ok(())
            }
            Self::PositivePrice { symbol, price } => {
                if price <= Decimal::ZERO {
                    return Err(DomainError::InvalidPrice {
                        symbol: symbol.to_string(),
                        price,
                    });
                }
                Ok(())
            }
        }
    }
}

/// Run guards in order, stopping at the first failure.
pub fn check_all(guards: &[Guard<'_>], account: &Account) -> Result<(), DomainError> {
    guards.iter().try_for_each(|guard| {
        guard
            .check(account)
            .inspect_err(|e| debug!(guard = guard.name(), error = %e, "Guard failed"))
    })
}

/// Turn the `None` of a checked `Decimal` operation into a typed error.
pub fn in_range(result: Option<Decimal>, amount: Decimal) -> Result<Decimal, DomainError> {
    result.ok_or_else(|| DomainError::InvalidAmount {
        amount,
        reason: "amount out of range".into(),
    })
}

/// A share count that passed the whole-quantity guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u64);

impl Quantity {
    /// Accept only positive whole numbers that fit in a `u64`.
    pub fn whole(quantity: Decimal) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidQuantity { quantity };

        if quantity <= Decimal::ZERO || !quantity.fract().is_zero() {
            return Err(invalid());
        }
        quantity.to_u64().map(Self).ok_or_else(invalid)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<Quantity> for Decimal {
    fn from(q: Quantity) -> Self {
        Decimal::from(q.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn funded(amount: Decimal) -> Account {
        Account::with_initial_deposit("Ada", "ada@example.com", amount).unwrap()
    }

    #[test]
    fn positive_amount_rejects_zero_and_negative() {
        let acct = funded(dec!(10));
        assert!(Guard::PositiveAmount(dec!(0)).check(&acct).is_err());
        assert!(Guard::PositiveAmount(dec!(-5)).check(&acct).is_err());
        assert!(Guard::PositiveAmount(dec!(0.01)).check(&acct).is_ok());
    }

    #[test]
    fn sufficient_balance_compares_against_cash() {
        let acct = funded(dec!(100));
        assert!(Guard::SufficientBalance(dec!(100)).check(&acct).is_ok());
        assert_eq!(
            Guard::SufficientBalance(dec!(100.01)).check(&acct),
            Err(DomainError::InsufficientBalance {
                requested: dec!(100.01),
                available: dec!(100),
            })
        );
    }

    #[test]
    fn sufficient_shares_reports_held_count() {
        let acct = funded(dec!(100));
        let err = Guard::SufficientShares {
            symbol: "AAPL",
            quantity: 1,
        }
        .check(&acct)
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientShares {
                symbol: "AAPL".into(),
                requested: 1,
                held: 0,
            }
        );
    }

    #[test]
    fn check_all_stops_at_first_failure() {
        let acct = funded(dec!(10));
        let err = check_all(
            &[
                Guard::PositiveAmount(dec!(-1)),
                Guard::SufficientBalance(dec!(1000)),
            ],
            &acct,
        )
        .unwrap_err();

        assert!(matches!(err, DomainError::InvalidAmount { .. }));
    }

    #[test]
    fn positive_price_rejects_zero_and_negative() {
        let acct = funded(dec!(10));
        for price in [dec!(0), dec!(-150)] {
            assert_eq!(
                Guard::PositivePrice {
                    symbol: "AAPL",
                    price
                }
                .check(&acct),
                Err(DomainError::InvalidPrice {
                    symbol: "AAPL".into(),
                    price,
                })
            );
        }
        assert!(
            Guard::PositivePrice {
                symbol: "AAPL",
                price: dec!(0.01)
            }
            .check(&acct)
            .is_ok()
        );
    }

    #[test]
    fn in_range_maps_overflow_to_invalid_amount() {
        assert_eq!(in_range(dec!(1).checked_add(dec!(2)), dec!(2)), Ok(dec!(3)));
        assert!(matches!(
            in_range(Decimal::MAX.checked_add(dec!(1)), dec!(1)),
            Err(DomainError::InvalidAmount { ref reason, .. }) if reason == "amount out of range"
        ));
    }

    #[test]
    fn quantity_must_be_whole_and_positive() {
        assert_eq!(Quantity::whole(dec!(3)).unwrap().get(), 3);
        assert_eq!(Quantity::whole(dec!(2.000)).unwrap().get(), 2);
        assert!(Quantity::whole(dec!(1.5)).is_err());
        assert!(Quantity::whole(dec!(0)).is_err());
        assert!(Quantity::whole(dec!(-2)).is_err());
    }
}
