//! API credentials and request signing for the Binance REST API
//!
//! Signed (`USER_DATA`) endpoints expect a `timestamp` parameter and a
//! `signature` parameter holding the hex-encoded HMAC-SHA256 of the full
//! query string, keyed by the account's secret key. The API key travels in
//! the `X-MBX-APIKEY` header.
//!
//! # Example
//!
//! ```no_run
//! use binance_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let signer = RequestSigner::new(&creds);
//!
//!     let query = format!("asset=USDT&timestamp={}", signer.timestamp());
//!     let signature = signer.sign(&query);
//!     println!("{}&signature={}", query, signature);
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{timestamp_ms, Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
