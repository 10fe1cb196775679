//! Shared types for the Binance savings and liquid swap REST SDK
//!
//! This crate has minimal dependencies and can be used independently of the
//! HTTP client.
//!
//! # Key Types
//!
//! - [`ProjectType`], [`ProductStatus`], [`SortBy`] - Savings query filters
//! - [`LiquidityOperationKind`] - Liquid swap operation filter
//! - [`BinanceApiError`], [`BinanceErrorCode`] - Exchange error body mapping
//! - [`RecoveryStrategy`] - How a caller could react to an error

pub mod enums;
pub mod error_codes;

pub use enums::*;
pub use error_codes::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
