//! Savings endpoints for customized fixed and activity projects
//!
//! All endpoints here are `USER_DATA` and must be signed.

use crate::client::BinanceRestClient;
use crate::endpoints::decode;
use crate::error::RestResult;
use crate::request::{Params, Request, RequestOptions, SecurityType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const POSITION_LIST_PATH: &str = "/sapi/v1/lending/project/position/list";
const PROJECT_LIST_PATH: &str = "/sapi/v1/lending/project/list";

/// Savings endpoints
pub struct SavingsEndpoints<'a> {
    client: &'a BinanceRestClient,
}

impl<'a> SavingsEndpoints<'a> {
    pub fn new(client: &'a BinanceRestClient) -> Self {
        Self { client }
    }

    /// List customized fixed and activity positions held by the account
    ///
    /// Only the filters set on `query` are sent; the exchange applies its own
    /// defaults for the rest.
    #[instrument(skip(self, options))]
    pub async fn list_customized_fixed_positions(
        &self,
        query: &CustomizedFixedPositionsQuery,
        options: &RequestOptions,
    ) -> RestResult<Vec<CustomizedFixedPosition>> {
        let request =
            Request::get(POSITION_LIST_PATH, SecurityType::Signed).with_params(query.to_params());

        let body = self.client.call_api(&request, options).await?;
        let positions: Vec<CustomizedFixedPosition> = decode(&body)?;

        debug!("Fetched {} customized fixed positions", positions.len());
        Ok(positions)
    }

    /// List fixed and activity projects available for purchase
    #[instrument(skip(self, options))]
    pub async fn list_fixed_projects(
        &self,
        query: &FixedProjectsQuery,
        options: &RequestOptions,
    ) -> RestResult<Vec<FixedProject>> {
        let request =
            Request::get(PROJECT_LIST_PATH, SecurityType::Signed).with_params(query.to_params());

        let body = self.client.call_api(&request, options).await?;
        let projects: Vec<FixedProject> = decode(&body)?;

        debug!("Fetched {} fixed projects", projects.len());
        Ok(projects)
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Filters for [`SavingsEndpoints::list_customized_fixed_positions`]
///
/// A plain value: build it with a struct literal or the `with_*` methods.
/// Setting a field twice keeps the last value.
///
/// ```
/// use binance_rest::CustomizedFixedPositionsQuery;
/// use binance_types::{ProjectType, SortBy};
///
/// let query = CustomizedFixedPositionsQuery::new()
///     .with_asset("USDT")
///     .with_project_type(ProjectType::CustomizedFixed)
///     .with_sort_by(SortBy::InterestRate)
///     .with_size(50);
///
/// assert_eq!(query.to_params().get("type"), Some("CUSTOMIZED_FIXED"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomizedFixedPositionsQuery {
    /// Asset, e.g. `USDT`
    pub asset: Option<String>,
    /// Restrict to one project
    pub project_id: Option<String>,
    /// Project type (`ACTIVITY`, `CUSTOMIZED_FIXED`)
    pub project_type: Option<String>,
    /// Status filter
    pub status: Option<String>,
    /// Sort ascending (exchange default: true)
    pub is_sort_asc: Option<bool>,
    /// Sort field (exchange default: `START_TIME`)
    pub sort_by: Option<String>,
    /// Page number, starting at 1 (exchange default: 1)
    pub current: Option<u32>,
    /// Page size (exchange default: 10, max 100)
    pub size: Option<u32>,
}

impl CustomizedFixedPositionsQuery {
    /// Create a query with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by asset
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Restrict to one project
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the project type (see [`ProjectType`](binance_types::ProjectType))
    pub fn with_project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    /// Filter by status (see [`ProductStatus`](binance_types::ProductStatus))
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sort ascending or descending
    pub fn with_sort_asc(mut self, ascending: bool) -> Self {
        self.is_sort_asc = Some(ascending);
        self
    }

    /// Sort field (see [`SortBy`](binance_types::SortBy))
    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Page number, starting at 1
    pub fn with_current(mut self, current: u32) -> Self {
        self.current = Some(current);
        self
    }

    /// Page size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Query parameters for the fields that are set
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("asset", self.asset.as_deref())
            .set_opt("projectId", self.project_id.as_deref())
            .set_opt("status", self.status.as_deref())
            .set_opt("type", self.project_type.as_deref())
            .set_opt("isSortAsc", self.is_sort_asc)
            .set_opt("sortBy", self.sort_by.as_deref())
            .set_opt("current", self.current)
            .set_opt("size", self.size);
        params
    }
}

/// Filters for [`SavingsEndpoints::list_fixed_projects`]
///
/// The project type is mandatory for this endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedProjectsQuery {
    /// Project type (`ACTIVITY`, `CUSTOMIZED_FIXED`)
    pub project_type: String,
    pub asset: Option<String>,
    /// Status filter (exchange default: `ALL`)
    pub status: Option<String>,
    pub is_sort_asc: Option<bool>,
    pub sort_by: Option<String>,
    pub current: Option<u32>,
    pub size: Option<u32>,
}

impl FixedProjectsQuery {
    /// Query projects of the given type
    pub fn new(project_type: impl Into<String>) -> Self {
        Self {
            project_type: project_type.into(),
            asset: None,
            status: None,
            is_sort_asc: None,
            sort_by: None,
            current: None,
            size: None,
        }
    }

    /// Filter by asset
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    /// Filter by status (see [`ProductStatus`](binance_types::ProductStatus))
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sort ascending or descending
    pub fn with_sort_asc(mut self, ascending: bool) -> Self {
        self.is_sort_asc = Some(ascending);
        self
    }

    /// Sort field (see [`SortBy`](binance_types::SortBy))
    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Page number, starting at 1
    pub fn with_current(mut self, current: u32) -> Self {
        self.current = Some(current);
        self
    }

    /// Page size
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Query parameters for the fields that are set
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set("type", &self.project_type)
            .set_opt("asset", self.asset.as_deref())
            .set_opt("status", self.status.as_deref())
            .set_opt("isSortAsc", self.is_sort_asc)
            .set_opt("sortBy", self.sort_by.as_deref())
            .set_opt("current", self.current)
            .set_opt("size", self.size);
        params
    }
}

// ============================================================================
// Records
// ============================================================================

/// A customized fixed or activity position
///
/// Amounts and rates are kept as the exact strings the exchange sent.
/// Missing fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizedFixedPosition {
    pub asset: String,
    pub can_transfer: bool,
    /// Milliseconds since epoch
    pub create_timestamp: i64,
    /// Duration in days
    pub duration: i64,
    pub end_time: i64,
    pub interest: String,
    pub interest_rate: String,
    pub lot: i64,
    pub position_id: i64,
    pub principal: String,
    pub project_id: String,
    pub project_name: String,
    pub purchase_time: i64,
    /// Calendar date, e.g. `2020-07-08`
    pub redeem_date: String,
    pub start_time: i64,
    pub status: String,
    #[serde(rename = "type")]
    pub project_type: String,
}

impl CustomizedFixedPosition {
    pub fn interest_decimal(&self) -> Option<Decimal> {
        self.interest.parse().ok()
    }

    pub fn interest_rate_decimal(&self) -> Option<Decimal> {
        self.interest_rate.parse().ok()
    }

    pub fn principal_decimal(&self) -> Option<Decimal> {
        self.principal.parse().ok()
    }
}

/// A fixed or activity savings project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedProject {
    pub asset: String,
    pub display_priority: i64,
    /// Duration in days
    pub duration: i64,
    pub interest_per_lot: String,
    pub interest_rate: String,
    pub lot_size: String,
    pub lots_low_limit: i64,
    pub lots_purchased: i64,
    pub lots_up_limit: i64,
    pub max_lots_per_user: i64,
    pub need_kyc: bool,
    pub project_id: String,
    pub project_name: String,
    pub status: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub with_area_limitation: bool,
}

impl FixedProject {
    pub fn interest_rate_decimal(&self) -> Option<Decimal> {
        self.interest_rate.parse().ok()
    }

    /// Lots still available across all users
    pub fn lots_remaining(&self) -> i64 {
        (self.lots_up_limit - self.lots_purchased).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binance_types::{ProductStatus, ProjectType, SortBy};
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_query_sends_nothing() {
        assert!(CustomizedFixedPositionsQuery::new().to_params().is_empty());
    }

    #[test]
    fn test_query_sends_only_set_fields() {
        let params = CustomizedFixedPositionsQuery::new()
            .with_asset("USDT")
            .with_current(0)
            .to_params();

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["asset", "current"]);
        assert_eq!(params.get("current"), Some("0"));
    }

    #[test]
    fn test_query_wire_names() {
        let params = CustomizedFixedPositionsQuery::new()
            .with_project_id("CUSDT14DAYSS001")
            .with_project_type(ProjectType::Activity)
            .with_status(ProductStatus::Subscribable)
            .with_sort_asc(false)
            .with_sort_by(SortBy::LotSize)
            .with_size(100)
            .to_params();

        assert_eq!(params.get("projectId"), Some("CUSDT14DAYSS001"));
        assert_eq!(params.get("type"), Some("ACTIVITY"));
        assert_eq!(params.get("status"), Some("SUBSCRIBABLE"));
        assert_eq!(params.get("isSortAsc"), Some("false"));
        assert_eq!(params.get("sortBy"), Some("LOT_SIZE"));
        assert_eq!(params.get("size"), Some("100"));
    }

    #[test]
    fn test_setter_order_does_not_matter() {
        let a = CustomizedFixedPositionsQuery::new()
            .with_asset("BTC")
            .with_size(20)
            .with_sort_asc(true);
        let b = CustomizedFixedPositionsQuery::new()
            .with_sort_asc(true)
            .with_asset("BTC")
            .with_size(20);
        assert_eq!(a, b);
        assert_eq!(a.to_params(), b.to_params());
    }

    #[test]
    fn test_last_setter_wins() {
        let query = CustomizedFixedPositionsQuery::new()
            .with_asset("BTC")
            .with_asset("ETH");
        assert_eq!(query.asset.as_deref(), Some("ETH"));
    }

    #[test]
    fn test_struct_literal_query() {
        let query = CustomizedFixedPositionsQuery {
            asset: Some("USDT".into()),
            size: Some(5),
            ..Default::default()
        };
        assert_eq!(query, CustomizedFixedPositionsQuery::new().with_asset("USDT").with_size(5));
    }

    #[test]
    fn test_fixed_projects_query_always_sends_type() {
        let params = FixedProjectsQuery::new(ProjectType::CustomizedFixed).to_params();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["type"]);
        assert_eq!(params.get("type"), Some("CUSTOMIZED_FIXED"));
    }

    #[test]
    fn test_deserialize_position() {
        let json = r#"{
            "asset": "USDT",
            "canTransfer": true,
            "createTimestamp": 1587010770000,
            "duration": 14,
            "endTime": 1588291200000,
            "interest": "0.19950000",
            "interestRate": "0.05201250",
            "lot": 1,
            "positionId": 51724,
            "principal": "100.00000000",
            "projectId": "CUSDT14DAYSS001",
            "projectName": "USDT",
            "purchaseTime": 1587010771000,
            "redeemDate": "2020-05-01",
            "startTime": 1587081600000,
            "status": "HOLDING",
            "type": "CUSTOMIZED_FIXED"
        }"#;

        let position: CustomizedFixedPosition = serde_json::from_str(json).unwrap();
        assert_eq!(position.position_id, 51724);
        assert_eq!(position.interest_rate, "0.05201250");
        assert_eq!(position.principal, "100.00000000");
        assert_eq!(position.project_type, "CUSTOMIZED_FIXED");
        assert_eq!(position.redeem_date, "2020-05-01");
        assert_eq!(position.principal_decimal(), Some(dec!(100.00000000)));
        assert_eq!(position.interest_decimal(), Some(dec!(0.1995)));
    }

    #[test]
    fn test_unparsable_decimal_is_none() {
        let position = CustomizedFixedPosition {
            interest_rate: "n/a".into(),
            ..Default::default()
        };
        assert_eq!(position.interest_rate_decimal(), None);
        assert_eq!(position.interest_rate, "n/a");
    }

    #[test]
    fn test_deserialize_project() {
        let json = r#"{
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
        }"#;

        let project: FixedProject = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_id, "CUSDT90DAYSS001");
        assert_eq!(project.lot_size, "100.00000000");
        assert_eq!(project.lots_remaining(), 5845);
        assert_eq!(project.interest_rate_decimal(), Some(dec!(0.0551)));
    }
}
