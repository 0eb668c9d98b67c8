//! Price source adapters.

mod fixed;

pub use fixed::FixedPriceTable;
