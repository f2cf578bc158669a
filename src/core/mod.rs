//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod format;
pub mod log;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, CurrencyPair};
pub use currency::{CurrencyList, CurrencyListProvider, CurrencyRateProvider};
