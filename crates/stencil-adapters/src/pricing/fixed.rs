//! Static price table.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::trace;

use stencil_core::{application::ports::PriceSource, domain::DomainError, error::StencilResult};

/// Price source backed by a fixed symbol → price map.
///
/// Symbols are case-sensitive: `aapl` is not `AAPL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedPriceTable {
    prices: HashMap<String, Decimal>,
}

impl FixedPriceTable {
    /// An empty table. Every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// AAPL 150, TSLA 700, GOOGL 2800.
    pub fn reference() -> Self {
        Self::new()
            .with_price("AAPL", Decimal::from(150))
            .with_price("TSLA", Decimal::from(700))
            .with_price("GOOGL", Decimal::from(2800))
    }

    /// Add a symbol or replace its price.
    pub fn with_price(mut self, symbol: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(symbol.into(), price);
        self
    }

    /// Known symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.prices.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for FixedPriceTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (symbol, price)| table.with_price(symbol, price))
    }
}

impl PriceSource for FixedPriceTable {
    fn unit_price(&self, symbol: &str) -> StencilResult<Decimal> {
        trace!(symbol, "unit_price");
        self.prices.get(symbol).copied().ok_or_else(|| {
            DomainError::UnknownSymbol {
                symbol: symbol.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stencil_core::error::StencilError;

    #[test]
    fn reference_prices() {
        let table = FixedPriceTable::reference();
        assert_eq!(table.unit_price("AAPL").unwrap(), dec!(150));
        assert_eq!(table.unit_price("TSLA").unwrap(), dec!(700));
        assert_eq!(table.unit_price("GOOGL").unwrap(), dec!(2800));
        assert_eq!(table.symbols(), vec!["AAPL", "GOOGL", "TSLA"]);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let err = FixedPriceTable::reference().unit_price("aapl").unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::UnknownSymbol { ref symbol }) if symbol == "aapl"
        ));
    }

    #[test]
    fn with_price_overrides() {
        let table = FixedPriceTable::reference()
            .with_price("AAPL", dec!(151.25))
            .with_price("MSFT", dec!(400));
        assert_eq!(table.unit_price("AAPL").unwrap(), dec!(151.25));
        assert_eq!(table.unit_price("MSFT").unwrap(), dec!(400));
    }

    #[test]
    fn collects_from_pairs() {
        let table: FixedPriceTable = [("X", dec!(1)), ("Y", dec!(2))].into_iter().collect();
        assert_eq!(table.symbols(), vec!["X", "Y"]);
    }
}
