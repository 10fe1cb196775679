//! Request descriptors, query parameters and per-call options

use crate::error::{RestError, RestResult};
use reqwest::Method;
use std::time::Duration;

/// How an endpoint authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityType {
    /// Public endpoint
    None,
    /// `X-MBX-APIKEY` header only
    ApiKey,
    /// API key header plus `timestamp` and HMAC `signature` parameters
    Signed,
}

impl SecurityType {
    /// Whether the API key header must be sent
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::ApiKey | Self::Signed)
    }

    /// Whether the query must be signed
    pub fn requires_signature(&self) -> bool {
        matches!(self, Self::Signed)
    }
}

/// Ordered query parameters
///
/// Setting a key that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
        self
    }

    /// Set a parameter only when a value is present
    pub fn set_opt<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a parameter is set
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameter names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Name/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// URL-encode as `a=1&b=2`
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| RestError::InvalidParameter(e.to_string()))
    }
}

/// Immutable description of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    security: SecurityType,
    params: Params,
}

impl Request {
    /// Create a request with no parameters
    pub fn new(method: Method, path: impl Into<String>, security: SecurityType) -> Self {
        Self {
            method,
            path: path.into(),
            security,
            params: Params::new(),
        }
    }

    /// Shorthand for a GET request
    pub fn get(path: impl Into<String>, security: SecurityType) -> Self {
        Self::new(Method::GET, path, security)
    }

    /// Attach query parameters
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn security(&self) -> SecurityType {
        self.security
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Per-call overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// `recvWindow` in milliseconds, overriding the client default
    pub recv_window: Option<u64>,
    /// Deadline for the whole call
    pub timeout: Option<Duration>,
    /// Extra headers
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `recvWindow` for this call
    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Fail with [`RestError::Timeout`] if the call takes longer
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_last_set_wins_in_place() {
        let mut params = Params::new();
        params.set("asset", "BTC").set("size", 10).set("asset", "USDT");

        assert_eq!(params.get("asset"), Some("USDT"));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["asset", "size"]);
    }

    #[test]
    fn test_params_set_opt_skips_none() {
        let mut params = Params::new();
        params.set_opt("asset", None::<&str>).set_opt("current", Some(0));

        assert!(!params.contains("asset"));
        assert_eq!(params.get("current"), Some("0"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_params_encode() {
        let mut params = Params::new();
        params.set("poolName", "BUSD/USDT").set("isSortAsc", true);
        assert_eq!(params.encode().unwrap(), "poolName=BUSD%2FUSDT&isSortAsc=true");
        assert_eq!(Params::new().encode().unwrap(), "");
    }

    #[test]
    fn test_request_descriptor() {
        let mut params = Params::new();
        params.set("poolId", 2);
        let request = Request::get("/sapi/v1/bswap/liquidity", SecurityType::Signed).with_params(params);

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/sapi/v1/bswap/liquidity");
        assert!(request.security().requires_signature());
        assert_eq!(request.params().get("poolId"), Some("2"));
    }

    #[test]
    fn test_security_type() {
        assert!(!SecurityType::None.requires_api_key());
        assert!(SecurityType::ApiKey.requires_api_key());
        assert!(!SecurityType::ApiKey.requires_signature());
        assert!(SecurityType::Signed.requires_api_key());
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::new()
            .with_recv_window(10_000)
            .with_timeout(Duration::from_secs(2))
            .with_header("X-Trace", "abc");

        assert_eq!(options.recv_window, Some(10_000));
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.headers.len(), 1);
    }
}
