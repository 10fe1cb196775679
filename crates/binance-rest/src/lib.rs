//! REST API client for Binance savings and liquid swap endpoints
//!
//! # Features
//!
//! - **Savings**: Customized fixed / activity positions and project listings
//! - **Liquid Swap**: Pool metadata, pool liquidity with the account's share,
//!   and add/remove liquidity operations
//!
//! Each endpoint takes an immutable query value. Only the fields that are set
//! become query parameters; the exchange applies its documented defaults to
//! everything else.
//!
//! # Authentication
//!
//! Signed endpoints require API credentials. Requests get a `timestamp`
//! (and optional `recvWindow`) parameter and are signed with HMAC-SHA256
//! over the exact query string.
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::{BinanceRestClient, Credentials, CustomizedFixedPositionsQuery, RequestOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BinanceRestClient::with_credentials(Credentials::from_env()?)?;
//!
//!     let query = CustomizedFixedPositionsQuery::new().with_asset("USDT");
//!     let options = RequestOptions::new().with_timeout(Duration::from_secs(5));
//!     let positions = client
//!         .savings()
//!         .list_customized_fixed_positions(&query, &options)
//!         .await?;
//!
//!     for position in positions {
//!         println!("{} {} @ {}", position.position_id, position.principal, position.interest_rate);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! A call either returns the fully decoded result or one [`RestError`].
//! Nothing is retried; [`RestError::recovery_strategy`] says what a caller
//! could reasonably do.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;

// Re-export main types
pub use binance_auth::Credentials;
pub use client::{BinanceRestClient, ClientConfig};
pub use error::{RestError, RestResult};
pub use request::{Params, Request, RequestOptions, SecurityType};

// Re-export endpoint-specific types
pub use endpoints::liquid_swap::{
    LiquidityOperation, LiquidityOperationsQuery, LiquidityPool, LiquidityPoolsQuery,
    LiquidityShare, SwapPool,
};
pub use endpoints::savings::{
    CustomizedFixedPosition, CustomizedFixedPositionsQuery, FixedProject, FixedProjectsQuery,
};

// Re-export shared types
pub use binance_types::{
    BinanceApiError, LiquidityOperationKind, ProductStatus, ProjectType, RecoveryStrategy, SortBy,
};
