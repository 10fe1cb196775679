//! Query filter enums for savings and liquid swap endpoints
//!
//! These only describe documented values a caller may *send*; every query
//! field accepts `impl Into<String>`, so raw strings work too. Records coming
//! back from the exchange keep their status/type fields as plain strings so
//! that values the exchange adds later still decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Savings project type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    /// Activity (promotional) projects
    Activity,
    /// Customized fixed-term projects
    CustomizedFixed,
}

impl ProjectType {
    /// Returns the value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "ACTIVITY",
            Self::CustomizedFixed => "CUSTOMIZED_FIXED",
        }
    }
}

/// Savings product status filter
///
/// The exchange defaults to `ALL` when the parameter is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Every product
    All,
    /// Products open for subscription
    Subscribable,
    /// Products closed for subscription
    Unsubscribable,
}

impl ProductStatus {
    /// Returns the value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Subscribable => "SUBSCRIBABLE",
            Self::Unsubscribable => "UNSUBSCRIBABLE",
        }
    }
}

/// Sort field for savings listings (exchange default: `START_TIME`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    StartTime,
    LotSize,
    InterestRate,
    Duration,
}

impl SortBy {
    /// Returns the value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartTime => "START_TIME",
            Self::LotSize => "LOT_SIZE",
            Self::InterestRate => "INTEREST_RATE",
            Self::Duration => "DURATION",
        }
    }
}

/// Kind of liquidity operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidityOperationKind {
    /// Liquidity was added to a pool
    Add,
    /// Liquidity was removed from a pool
    Remove,
}

impl LiquidityOperationKind {
    /// Returns the value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.as_str().to_string()
                }
            }
        )*
    };
}

display_as_str!(ProjectType, ProductStatus, SortBy, LiquidityOperationKind);
