//! Authentication credentials for Binance API
//!
//! Implements HMAC-SHA256 signing as required by Binance's `USER_DATA`
//! endpoints.
//!
//! # Security
//!
//! Secret keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "BINANCE_SECRET_KEY";

/// Milliseconds since the Unix epoch, as Binance expects in `timestamp`
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// API credentials for authenticated requests
///
/// The secret key is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (sent in the clear as a header)
    api_key: String,
    /// Secret key bytes used as the HMAC key
    secret_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and secret key
    ///
    /// Both values must be non-empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.as_ref();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("Secret key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret_key: SecretBox::new(Box::new(secret_key.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?;

        debug!("Loaded Binance credentials from environment");
        Self::new(api_key, secret_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a query string
    ///
    /// Returns the lowercase hex HMAC-SHA256 of `payload` keyed by the
    /// secret. `payload` is the exact URL-encoded query (and body, if any)
    /// that will be sent, without the `signature` parameter.
    pub fn sign(&self, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretBox::new(Box::new(self.secret_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", prefix))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for building signed queries
///
/// Captures the timestamp once so the value placed in the query and the
/// value covered by the signature are the same.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer stamped with the current time
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::with_timestamp(credentials, timestamp_ms())
    }

    /// Create a signer with an explicit timestamp
    pub fn with_timestamp(credentials: &'a Credentials, timestamp: u64) -> Self {
        Self {
            credentials,
            timestamp,
        }
    }

    /// Timestamp to send as the `timestamp` parameter
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the fully encoded query string
    pub fn sign(&self, query: &str) -> String {
        self.credentials.sign(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example key pair and request from Binance's signed endpoint documentation
    const DOC_API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_QUERY: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
    const DOC_SIGNATURE: &str = "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71";

    #[test]
    fn test_sign_matches_documented_vector() {
        let creds = Credentials::new(DOC_API_KEY, DOC_SECRET).unwrap();
        assert_eq!(creds.sign(DOC_QUERY), DOC_SIGNATURE);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let creds = Credentials::new("key", "secret").unwrap();
        let signature = creds.sign("timestamp=1");
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", "  "),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key_123", "very_secret_value").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("very_secret_value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api..."));
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = Credentials::new(DOC_API_KEY, DOC_SECRET).unwrap();
        let cloned = creds.clone();
        assert_eq!(creds.sign("a=1"), cloned.sign("a=1"));
    }

    #[test]
    fn test_signer_keeps_timestamp() {
        let creds = Credentials::new("key", "secret").unwrap();
        let signer = RequestSigner::with_timestamp(&creds, 1_499_827_319_559);
        assert_eq!(signer.timestamp(), 1_499_827_319_559);
        assert_eq!(signer.api_key(), "key");
        assert_eq!(signer.sign("x=1"), creds.sign("x=1"));
    }

    #[test]
    fn test_timestamp_is_recent() {
        // 2020-09-13T12:26:40Z
        assert!(timestamp_ms() > 1_600_000_000_000);
    }
}
