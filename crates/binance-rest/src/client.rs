//! Main REST client implementation

use crate::endpoints::liquid_swap::{
    LiquidityOperation, LiquidityOperationsQuery, LiquidityPool, LiquidityPoolsQuery,
};
use crate::endpoints::savings::{CustomizedFixedPosition, CustomizedFixedPositionsQuery};
use crate::endpoints::{LiquidSwapEndpoints, SavingsEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::{Request, RequestOptions};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use binance_auth::{Credentials, RequestSigner};
use binance_types::BinanceApiError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Environment variable overriding the API host
pub const BASE_URL_ENV: &str = "BINANCE_API_URL";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const USED_WEIGHT_HEADER: &str = "x-mbx-used-weight-1m";

/// Binance REST API client
///
/// Cheap to clone; clones share the underlying transport.
///
/// # Example
///
/// ```no_run
/// use binance_rest::{BinanceRestClient, Credentials, LiquidityPoolsQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BinanceRestClient::with_credentials(Credentials::from_env()?)?;
///     let pools = client
///         .get_liquidity_pools(&LiquidityPoolsQuery::new().with_pool_id(2))
///         .await?;
///     for pool in pools {
///         println!("{}: {}%", pool.pool_name, pool.share.share_percentage);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BinanceRestClient {
    transport: Arc<dyn Transport>,
    credentials: Option<Credentials>,
    base_url: String,
    recv_window: Option<u64>,
}

impl BinanceRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("binance-rest/{}", env!("CARGO_PKG_VERSION")));
        let transport =
            ReqwestTransport::new(Duration::from_secs(config.timeout_secs), &user_agent)?;

        info!(base_url = %config.base_url, "Created Binance REST client");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            credentials: config.credentials,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            recv_window: config.recv_window,
        }
    }

    /// Check if the client has credentials for signed endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// API host this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Savings / lending endpoints
    pub fn savings(&self) -> SavingsEndpoints<'_> {
        SavingsEndpoints::new(self)
    }

    /// Liquid swap (BSwap) endpoints
    pub fn liquid_swap(&self) -> LiquidSwapEndpoints<'_> {
        LiquidSwapEndpoints::new(self)
    }

    /// List customized fixed and activity positions
    pub async fn list_customized_fixed_positions(
        &self,
        query: &CustomizedFixedPositionsQuery,
    ) -> RestResult<Vec<CustomizedFixedPosition>> {
        self.savings()
            .list_customized_fixed_positions(query, &RequestOptions::default())
            .await
    }

    /// List liquidity operation records
    pub async fn list_liquidity_operations(
        &self,
        query: &LiquidityOperationsQuery,
    ) -> RestResult<Vec<LiquidityOperation>> {
        self.liquid_swap()
            .list_liquidity_operations(query, &RequestOptions::default())
            .await
    }

    /// Get liquidity pool snapshots with the account's share
    pub async fn get_liquidity_pools(
        &self,
        query: &LiquidityPoolsQuery,
    ) -> RestResult<Vec<LiquidityPool>> {
        self.liquid_swap()
            .get_liquidity_pools(query, &RequestOptions::default())
            .await
    }

    // ========================================================================
    // Shared call path
    // ========================================================================

    /// Execute a request and return the raw response body
    ///
    /// Adds authentication according to the request's security type, sends
    /// it through the transport and maps error statuses to [`RestError`].
    /// Nothing is retried.
    pub async fn call_api(&self, request: &Request, options: &RequestOptions) -> RestResult<Vec<u8>> {
        match options.timeout {
            Some(limit) => tokio::time::timeout(limit, self.dispatch(request, options))
                .await
                .map_err(|_| RestError::Timeout(limit))?,
            None => self.dispatch(request, options).await,
        }
    }

    async fn dispatch(&self, request: &Request, options: &RequestOptions) -> RestResult<Vec<u8>> {
        let http_request = self.prepare(request, options)?;

        debug!(method = %request.method(), path = request.path(), "Sending request");
        let response = self.transport.execute(http_request).await?;

        if let Some(weight) = response.header(USED_WEIGHT_HEADER) {
            trace!(weight, "Used request weight");
        }

        check_response(response)
    }

    /// Build the wire request: parameters, `recvWindow`, `timestamp`, signature and headers
    pub fn prepare(&self, request: &Request, options: &RequestOptions) -> RestResult<HttpRequest> {
        let security = request.security();
        let credentials = if security.requires_api_key() {
            Some(self.credentials.as_ref().ok_or(RestError::AuthRequired)?)
        } else {
            None
        };

        let mut params = request.params().clone();
        let mut headers = Vec::new();

        let query = match credentials {
            Some(credentials) if security.requires_signature() => {
                let signer = RequestSigner::new(credentials);
                params.set_opt("recvWindow", options.recv_window.or(self.recv_window));
                params.set("timestamp", signer.timestamp());

                let query = params.encode()?;
                let signature = signer.sign(&query);
                format!("{}&signature={}", query, signature)
            }
            _ => params.encode()?,
        };

        if let Some(credentials) = credentials {
            headers.push((API_KEY_HEADER.to_string(), credentials.api_key().to_string()));
        }
        headers.extend(options.headers.iter().cloned());

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, request.path())
        } else {
            format!("{}{}?{}", self.base_url, request.path(), query)
        };

        Ok(HttpRequest {
            method: request.method().clone(),
            url,
            headers,
        })
    }
}

/// Map an HTTP response to its body or an error
fn check_response(response: HttpResponse) -> RestResult<Vec<u8>> {
    if response.is_success() {
        return Ok(response.body);
    }

    let status = response.status;
    if status == 429 || status == 418 {
        let retry_after_ms = response
            .header("retry-after")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        warn!(status, ?retry_after_ms, "Rate limited");
        return Err(RestError::RateLimited {
            status,
            retry_after_ms,
        });
    }

    match BinanceApiError::from_body(&response.body) {
        Some(error) => {
            warn!(status, code = error.code, msg = %error.msg, "API error");
            Err(RestError::Api { status, error })
        }
        None => Err(RestError::Status {
            status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }),
    }
}

impl std::fmt::Debug for BinanceRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API host, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Default `recvWindow` for signed requests; the exchange uses 5000 when omitted
    pub recv_window: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            recv_window: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load credentials (required) and base URL (optional) from the environment
    ///
    /// Reads `BINANCE_API_KEY`, `BINANCE_SECRET_KEY` and `BINANCE_API_URL`.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::new().with_credentials(Credentials::from_env()?);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the default `recvWindow` in milliseconds
    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }
}
