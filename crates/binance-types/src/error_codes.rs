//! Binance API error code mapping with recovery strategies
//!
//! Binance reports failures as `{"code": -1021, "msg": "..."}` with a
//! negative numeric code. The code range identifies the category.

use serde::Deserialize;
use std::time::Duration;

/// Recovery strategy for handling API errors
///
/// This is classification only: the SDK never retries by itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32,
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Cannot recover programmatically
    Fatal,
    /// Requires user intervention (e.g. product sold out)
    UserAction { message: &'static str },
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient service errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 5000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Backoff { .. } | Self::Retry { .. })
    }
}

/// Binance error categories, derived from the code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// -1000 to -1099: general server or network issues
    Server,
    /// -1100 to -1199: request issues (bad or missing parameters)
    Request,
    /// -2000 to -2099: processing and API key issues
    Processing,
    /// -3000 to -5999: margin, sub-account and other SAPI issues
    Sapi,
    /// -6000 to -6099: savings issues
    Savings,
    /// -9000 to -9999: filter failures
    Filter,
    /// -12000 to -12999: liquid swap (BSwap) issues
    LiquidSwap,
    /// Anything else
    Unknown,
}

impl ErrorCategory {
    /// Category for a numeric code
    pub fn from_code(code: i64) -> Self {
        match code {
            -1099..=-1000 => Self::Server,
            -1199..=-1100 => Self::Request,
            -2099..=-2000 => Self::Processing,
            -5999..=-3000 => Self::Sapi,
            -6099..=-6000 => Self::Savings,
            -9999..=-9000 => Self::Filter,
            -12999..=-12000 => Self::LiquidSwap,
            _ => Self::Unknown,
        }
    }
}

/// Known Binance error codes relevant to savings and liquid swap queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinanceErrorCode {
    /// -1000 An unknown error occurred while processing the request
    UnknownError,
    /// -1001 Internal error; unable to process your request
    Disconnected,
    /// -1002 You are not authorized to execute this request
    Unauthorized,
    /// -1003 Too many requests queued / request weight exceeded
    TooManyRequests,
    /// -1006 Unexpected response from the message bus
    UnexpectedResponse,
    /// -1007 Timeout waiting for response from backend server
    Timeout,
    /// -1008 Server is currently overloaded
    ServerBusy,
    /// -1016 This service is no longer available
    ServiceShuttingDown,
    /// -1021 Timestamp for this request is outside of the recvWindow
    InvalidTimestamp,
    /// -1022 Signature for this request is not valid
    InvalidSignature,
    /// -1100 Illegal characters found in a parameter
    IllegalChars,
    /// -1101 Too many parameters sent for this endpoint
    TooManyParameters,
    /// -1102 A mandatory parameter was not sent, was empty/null, or malformed
    MandatoryParamEmptyOrMalformed,
    /// -1103 An unknown parameter was sent
    UnknownParam,
    /// -1104 Not all sent parameters were read
    UnreadParameters,
    /// -1105 A parameter was empty
    ParamEmpty,
    /// -1106 A parameter was sent when not required
    ParamNotRequired,
    /// -1128 Combination of optional parameters invalid
    OptionalParamsBadCombo,
    /// -1130 Invalid data sent for a parameter
    InvalidParameter,
    /// -2014 API-key format invalid
    BadApiKeyFormat,
    /// -2015 Invalid API-key, IP, or permissions for action
    RejectedApiKey,
    /// -6001 Daily product does not exist
    DailyProductNotExist,
    /// -6003 Product does not exist or you don't have permissions
    ProductNotExistOrNoPermission,
    /// -6004 Product not in purchase status
    ProductNotInPurchaseStatus,
    /// -6006 Redeem amount error
    RedeemAmountError,
    /// -6007 Not in redeem time
    NotInRedeemTime,
    /// -6008 Product not in redeem status
    ProductNotInRedeemStatus,
    /// -6011 Exceeding the maximum num allowed to purchase per lot
    ExceedLotsLimit,
    /// -6012 Sold out
    SoldOut,
}

impl BinanceErrorCode {
    /// Map a numeric code to a known error code
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            -1000 => Self::UnknownError,
            -1001 => Self::Disconnected,
            -1002 => Self::Unauthorized,
            -1003 => Self::TooManyRequests,
            -1006 => Self::UnexpectedResponse,
            -1007 => Self::Timeout,
            -1008 => Self::ServerBusy,
            -1016 => Self::ServiceShuttingDown,
            -1021 => Self::InvalidTimestamp,
            -1022 => Self::InvalidSignature,
            -1100 => Self::IllegalChars,
            -1101 => Self::TooManyParameters,
            -1102 => Self::MandatoryParamEmptyOrMalformed,
            -1103 => Self::UnknownParam,
            -1104 => Self::UnreadParameters,
            -1105 => Self::ParamEmpty,
            -1106 => Self::ParamNotRequired,
            -1128 => Self::OptionalParamsBadCombo,
            -1130 => Self::InvalidParameter,
            -2014 => Self::BadApiKeyFormat,
            -2015 => Self::RejectedApiKey,
            -6001 => Self::DailyProductNotExist,
            -6003 => Self::ProductNotExistOrNoPermission,
            -6004 => Self::ProductNotInPurchaseStatus,
            -6006 => Self::RedeemAmountError,
            -6007 => Self::NotInRedeemTime,
            -6008 => Self::ProductNotInRedeemStatus,
            -6011 => Self::ExceedLotsLimit,
            -6012 => Self::SoldOut,
            _ => return None,
        })
    }

    /// Numeric code as returned by the exchange
    pub fn code(&self) -> i64 {
        match self {
            Self::UnknownError => -1000,
            Self::Disconnected => -1001,
            Self::Unauthorized => -1002,
            Self::TooManyRequests => -1003,
            Self::UnexpectedResponse => -1006,
            Self::Timeout => -1007,
            Self::ServerBusy => -1008,
            Self::ServiceShuttingDown => -1016,
            Self::InvalidTimestamp => -1021,
            Self::InvalidSignature => -1022,
            Self::IllegalChars => -1100,
            Self::TooManyParameters => -1101,
            Self::MandatoryParamEmptyOrMalformed => -1102,
            Self::UnknownParam => -1103,
            Self::UnreadParameters => -1104,
            Self::ParamEmpty => -1105,
            Self::ParamNotRequired => -1106,
            Self::OptionalParamsBadCombo => -1128,
            Self::InvalidParameter => -1130,
            Self::BadApiKeyFormat => -2014,
            Self::RejectedApiKey => -2015,
            Self::DailyProductNotExist => -6001,
            Self::ProductNotExistOrNoPermission => -6003,
            Self::ProductNotInPurchaseStatus => -6004,
            Self::RedeemAmountError => -6006,
            Self::NotInRedeemTime => -6007,
            Self::ProductNotInRedeemStatus => -6008,
            Self::ExceedLotsLimit => -6011,
            Self::SoldOut => -6012,
        }
    }

    /// Get the recovery strategy for this error code
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::TooManyRequests => RecoveryStrategy::rate_limit_backoff(),

            Self::UnknownError
            | Self::Disconnected
            | Self::UnexpectedResponse
            | Self::Timeout
            | Self::ServerBusy => RecoveryStrategy::service_retry(),

            // Usually local clock drift; a fresh timestamp fixes it
            Self::InvalidTimestamp => RecoveryStrategy::Retry {
                delay_ms: 0,
                max_attempts: 1,
            },

            Self::Unauthorized
            | Self::InvalidSignature
            | Self::BadApiKeyFormat
            | Self::RejectedApiKey
            | Self::ServiceShuttingDown => RecoveryStrategy::Fatal,

            Self::IllegalChars
            | Self::TooManyParameters
            | Self::MandatoryParamEmptyOrMalformed
            | Self::UnknownParam
            | Self::UnreadParameters
            | Self::ParamEmpty
            | Self::ParamNotRequired
            | Self::OptionalParamsBadCombo
            | Self::InvalidParameter => RecoveryStrategy::Fatal,

            Self::DailyProductNotExist | Self::ProductNotExistOrNoPermission => {
                RecoveryStrategy::UserAction {
                    message: "Check the product id and account permissions",
                }
            }
            Self::ProductNotInPurchaseStatus | Self::SoldOut | Self::ExceedLotsLimit => {
                RecoveryStrategy::UserAction {
                    message: "Product is not available for purchase",
                }
            }
            Self::RedeemAmountError | Self::NotInRedeemTime | Self::ProductNotInRedeemStatus => {
                RecoveryStrategy::UserAction {
                    message: "Product cannot be redeemed right now",
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    msg: String,
}

/// Parsed Binance API error with metadata
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("code {code}: {msg}")]
pub struct BinanceApiError {
    /// Numeric code from the exchange
    pub code: i64,
    /// Message from the exchange
    pub msg: String,
    /// Recognized code, if any
    pub known: Option<BinanceErrorCode>,
    /// Category derived from the code range
    pub category: ErrorCategory,
}

impl BinanceApiError {
    /// Build from a code and message
    pub fn new(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            known: BinanceErrorCode::from_code(code),
            category: ErrorCategory::from_code(code),
        }
    }

    /// Parse an error response body
    ///
    /// Returns `None` when the body is not a `{"code", "msg"}` object.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .map(|b| Self::new(b.code, b.msg))
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self.known {
            Some(code) => code.recovery_strategy(),
            None => match self.category {
                ErrorCategory::Request | ErrorCategory::Filter => RecoveryStrategy::Fatal,
                _ => RecoveryStrategy::Manual,
            },
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.known, Some(BinanceErrorCode::TooManyRequests))
    }

    /// Check if the credentials or signature were rejected
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.known,
            Some(BinanceErrorCode::Unauthorized)
                | Some(BinanceErrorCode::InvalidSignature)
                | Some(BinanceErrorCode::BadApiKeyFormat)
                | Some(BinanceErrorCode::RejectedApiKey)
        )
    }

    /// Check if this is a fatal error that cannot be recovered
    pub fn is_fatal(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Fatal)
    }
}
