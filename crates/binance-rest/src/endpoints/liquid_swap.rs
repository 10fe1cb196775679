//! Liquid swap (BSwap) endpoints
//!
//! Pool metadata needs only the API key; liquidity and operation records
//! are `USER_DATA` and must be signed.

use crate::client::BinanceRestClient;
use crate::endpoints::decode;
use crate::error::RestResult;
use crate::request::{Params, Request, RequestOptions, SecurityType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

const POOLS_PATH: &str = "/sapi/v1/bswap/pools";
const LIQUIDITY_PATH: &str = "/sapi/v1/bswap/liquidity";
const LIQUIDITY_OPS_PATH: &str = "/sapi/v1/bswap/liquidityOps";

/// Liquid swap endpoints
pub struct LiquidSwapEndpoints<'a> {
    client: &'a BinanceRestClient,
}

impl<'a> LiquidSwapEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient) -> Self {
        Self { client }
    }

    /// List all swap pools
    #[instrument(skip(self, options))]
    pub async fn list_pools(&self, options: &RequestOptions) -> RestResult<Vec<SwapPool>> {
        let request = Request::get(POOLS_PATH, SecurityType::ApiKey);

        let body = self.client.call_api(&request, options).await?;
        let pools: Vec<SwapPool> = decode(&body)?;

        debug!("Fetched {} swap pools", pools.len());
        Ok(pools)
    }

    /// Get liquidity snapshots for one pool or, with no pool id, every pool
    #[instrument(skip(self, options))]
    pub async fn get_liquidity_pools(
        &self,
        query: &LiquidityPoolsQuery,
        options: &RequestOptions,
    ) -> RestResult<Vec<LiquidityPool>> {
        let request =
            Request::get(LIQUIDITY_PATH, SecurityType::Signed).with_params(query.to_params());

        let body = self.client.call_api(&request, options).await?;
        let pools: Vec<LiquidityPool> = decode(&body)?;

        debug!("Fetched liquidity for {} pools", pools.len());
        Ok(pools)
    }

    /// List add/remove liquidity operations
    #[instrument(skip(self, options))]
    pub async fn list_liquidity_operations(
        &self,
        query: &LiquidityOperationsQuery,
        options: &RequestOptions,
    ) -> RestResult<Vec<LiquidityOperation>> {
        let request =
            Request::get(LIQUIDITY_OPS_PATH, SecurityType::Signed).with_params(query.to_params());

        let body = self.client.call_api(&request, options).await?;
        let operations: Vec<LiquidityOperation> = decode(&body)?;

        debug!("Fetched {} liquidity operations", operations.len());
        Ok(operations)
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Filters for [`LiquidSwapEndpoints::list_liquidity_operations`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityOperationsQuery {
    pub operation_id: Option<i64>,
    pub pool_id: Option<i64>,
    /// `ADD` or `REMOVE`
    pub operation: Option<String>,
    /// Milliseconds since epoch
    pub start_time: Option<i64>,
    /// Milliseconds since epoch
    pub end_time: Option<i64>,
    /// Number of records (exchange default: 3, max 100)
    pub limit: Option<u32>,
}

impl LiquidityOperationsQuery {
    /// Create a query with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one operation
    pub fn with_operation_id(mut self, operation_id: i64) -> Self {
        self.operation_id = Some(operation_id);
        self
    }

    /// Restrict to one pool
    pub fn with_pool_id(mut self, pool_id: i64) -> Self {
        self.pool_id = Some(pool_id);
        self
    }

    /// Filter by `ADD` or `REMOVE` (see [`LiquidityOperationKind`](binance_types::LiquidityOperationKind))
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Earliest update time, milliseconds since epoch
    pub fn with_start_time(mut self, millis: i64) -> Self {
        self.start_time = Some(millis);
        self
    }

    /// Latest update time, milliseconds since epoch
    pub fn with_end_time(mut self, millis: i64) -> Self {
        self.end_time = Some(millis);
        self
    }

    /// Maximum number of records
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for the fields that are set
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("operationId", self.operation_id)
            .set_opt("poolId", self.pool_id)
            .set_opt("operation", self.operation.as_deref())
            .set_opt("startTime", self.start_time)
            .set_opt("endTime", self.end_time)
            .set_opt("limit", self.limit);
        params
    }
}

/// Filters for [`LiquidSwapEndpoints::get_liquidity_pools`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiquidityPoolsQuery {
    /// Restrict to one pool; all pools when unset
    pub pool_id: Option<i64>,
}

impl LiquidityPoolsQuery {
    /// Create a query with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one pool
    pub fn with_pool_id(mut self, pool_id: i64) -> Self {
        self.pool_id = Some(pool_id);
        self
    }

    /// Query parameters for the fields that are set
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("poolId", self.pool_id);
        params
    }
}

// ============================================================================
// Records
// ============================================================================

/// Swap pool metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwapPool {
    pub pool_id: i64,
    pub pool_name: String,
    /// Asset symbols in the pool
    pub assets: Vec<String>,
}

/// One add or remove liquidity operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiquidityOperation {
    pub operation_id: i64,
    pub pool_id: i64,
    pub pool_name: String,
    /// `ADD` or `REMOVE`
    pub operation: String,
    /// 0 pending, 1 success, 2 failed
    pub status: i32,
    pub update_time: i64,
    pub share_amount: String,
}

impl LiquidityOperation {
    pub fn share_amount_decimal(&self) -> Option<Decimal> {
        self.share_amount.parse().ok()
    }
}

/// The account's stake in a pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiquidityShare {
    pub share_amount: String,
    pub share_percentage: String,
    /// Asset symbol to amount owned through the share
    pub asset: HashMap<String, String>,
}

impl LiquidityShare {
    pub fn share_percentage_decimal(&self) -> Option<Decimal> {
        self.share_percentage.parse().ok()
    }

    /// Amount of `asset` owned through the share
    pub fn asset_amount(&self, asset: &str) -> Option<Decimal> {
        self.asset.get(asset).and_then(|v| v.parse().ok())
    }
}

/// Pool liquidity snapshot with the account's share
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiquidityPool {
    pub pool_id: i64,
    pub pool_name: String,
    pub update_time: i64,
    /// Asset symbol to total pool liquidity
    pub liquidity: HashMap<String, String>,
    pub share: LiquidityShare,
}

impl LiquidityPool {
    /// Total liquidity of `asset` in the pool
    pub fn liquidity_of(&self, asset: &str) -> Option<Decimal> {
        self.liquidity.get(asset).and_then(|v| v.parse().ok())
    }
}
