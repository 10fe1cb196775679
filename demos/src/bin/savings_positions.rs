//! Demo 1: Savings Position Report
//!
//! Showcases: signed savings queries, decimal-string records
//!
//! Run: BINANCE_API_KEY=... BINANCE_SECRET_KEY=... cargo run --bin savings_positions [ASSET]

use binance_rest::{
    BinanceRestClient, ClientConfig, CustomizedFixedPositionsQuery, RequestOptions,
};
use binance_types::{ProjectType, SortBy};
use colored::*;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  SAVINGS POSITION REPORT".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = BinanceRestClient::with_config(ClientConfig::from_env()?)?;

    let mut query = CustomizedFixedPositionsQuery::new()
        .with_project_type(ProjectType::CustomizedFixed)
        .with_sort_by(SortBy::InterestRate)
        .with_size(100);
    if let Some(asset) = std::env::args().nth(1) {
        query = query.with_asset(asset);
    }

    let options = RequestOptions::new().with_timeout(Duration::from_secs(10));
    let positions = client
        .savings()
        .list_customized_fixed_positions(&query, &options)
        .await?;

    if positions.is_empty() {
        println!("{} No positions found", "!".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<8} {:>18} {:>14} {:>12} {:<10}",
        "POSITION".white().bold(),
        "ASSET".white().bold(),
        "PRINCIPAL".white().bold(),
        "INTEREST".white().bold(),
        "RATE".white().bold(),
        "STATUS".white().bold()
    );
    println!("  {}", "─".repeat(76));

    let mut total_principal = Decimal::ZERO;
    for position in &positions {
        total_principal += position.principal_decimal().unwrap_or_default();
        println!(
            "  {:<10} {:<8} {:>18} {:>14} {:>12} {:<10}",
            position.position_id,
            position.asset.cyan(),
            position.principal,
            position.interest.green(),
            position.interest_rate,
            position.status
        );
    }

    println!();
    println!(
        "{} {} positions, total principal {}",
        "✓".green(),
        positions.len(),
        total_principal
    );
    Ok(())
}
