//! Core business logic: prices, rates and conversions

pub mod board;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod rates;
pub mod refresher;

// Re-export main types for cleaner imports
pub use board::{CurrencyPair, PairSeed, PriceBoard, round2};
pub use conversion::{Conversion, ConversionState};
pub use currency::{Currency, PairSymbol};
pub use rates::RateResolver;
pub use refresher::Refresher;
