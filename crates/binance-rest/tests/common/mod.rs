//! Shared fixtures for integration tests
//!
//! Response bodies follow the samples in Binance's SAPI documentation.

#![allow(dead_code)]

use binance_rest::transport::MockTransport;
use binance_rest::{BinanceRestClient, ClientConfig, Credentials};
use std::sync::Arc;

pub const API_KEY: &str = "integration-test-key";
pub const SECRET_KEY: &str = "integration-test-secret";

pub const POSITIONS_RESPONSE: &str = r#"[
    {
        "asset": "USDT",
        "poolId": 0,
        "canTransfer": true,
        "createTimestamp": 1587010770000,
        "duration": 14,
        "endTime": 1588291200000,
        "interest": "0.19950000",
        "interestRate": "0.05",
        "lot": 1,
        "positionId": 123,
        "principal": "100.00000000",
        "projectId": "CUSDT14DAYSS001",
        "projectName": "USDT",
        "purchaseTime": 1587010771000,
        "redeemDate": "2020-05-01",
        "startTime": 1587081600000,
        "status": "HOLDING",
        "type": "CUSTOMIZED_FIXED"
    }
]"#;

pub const PROJECTS_RESPONSE: &str = r#"[
    {
        "asset": "USDT",
        "displayPriority": 1,
        "duration": 90,
        "interestPerLot": "1.35810000",
        "interestRate": "0.05510000",
        "lotSize": "100.00000000",
        "lotsLowLimit": 1,
        "lotsPurchased": 74155,
        "lotsUpLimit": 80000,
        "maxLotsPerUser": 2000,
        "needKyc": false,
        "projectId": "CUSDT90DAYSS001",
        "projectName": "USDT",
        "status": "PURCHASING",
        "type": "CUSTOMIZED_FIXED",
        "withAreaLimitation": false
    }
]"#;

pub const POOLS_RESPONSE: &str = r#"[
    {"poolId": 2, "poolName": "BUSD/USDT", "assets": ["BUSD", "USDT"]},
    {"poolId": 3, "poolName": "BUSD/DAI", "assets": ["BUSD", "DAI"]}
]"#;

pub const LIQUIDITY_RESPONSE: &str = r#"[
    {
        "poolId": 2,
        "poolName": "BUSD/USDT",
        "updateTime": 1565769342148,
        "liquidity": {
            "BUSD": "100000315.79",
            "USDT": "99999245.54"
        },
        "share": {
            "shareAmount": "12415",
            "sharePercentage": "0.00006207",
            "asset": {
                "BUSD": "6207.02",
                "USDT": "6206.95"
            }
        }
    }
]"#;

pub const OPERATIONS_RESPONSE: &str = r#"[
    {
        "operationId": 12341,
        "poolId": 2,
        "poolName": "BUSD/USDT",
        "operation": "ADD",
        "status": 1,
        "updateTime": 1565769342148,
        "shareAmount": "10.1"
    },
    {
        "operationId": 12342,
        "poolId": 2,
        "poolName": "BUSD/USDT",
        "operation": "REMOVE",
        "status": 0,
        "updateTime": 1565769342149,
        "shareAmount": "2.00000000"
    }
]"#;

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, SECRET_KEY).unwrap()
}

/// Client with credentials on top of a fresh mock transport
pub fn signed_client() -> (BinanceRestClient, Arc<MockTransport>) {
    client_with(ClientConfig::new().with_credentials(credentials()), MockTransport::new())
}

/// Client without credentials
pub fn anonymous_client() -> (BinanceRestClient, Arc<MockTransport>) {
    client_with(ClientConfig::new(), MockTransport::new())
}

pub fn client_with(
    config: ClientConfig,
    transport: MockTransport,
) -> (BinanceRestClient, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let config = config.with_base_url("https://mock.binance.test");
    (BinanceRestClient::with_transport(config, transport.clone()), transport)
}
