//! API endpoint implementations

pub mod liquid_swap;
pub mod savings;

pub use liquid_swap::LiquidSwapEndpoints;
pub use savings::SavingsEndpoints;

use crate::error::{RestError, RestResult};
use serde::de::DeserializeOwned;

/// Decode a JSON response body
///
/// A body of the wrong shape is an error, never an empty result.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    serde_json::from_slice(body).map_err(RestError::Decode)
}
