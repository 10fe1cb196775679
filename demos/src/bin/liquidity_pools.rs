//! Demo 2: Liquidity Share Monitor
//!
//! Showcases: pool discovery, liquidity snapshots, recent operations
//!
//! Run: BINANCE_API_KEY=... BINANCE_SECRET_KEY=... cargo run --bin liquidity_pools [POOL_ID]

use binance_rest::{
    BinanceRestClient, ClientConfig, LiquidityOperationsQuery, LiquidityPoolsQuery,
    RequestOptions,
};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  LIQUIDITY SHARE MONITOR".cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = BinanceRestClient::with_config(ClientConfig::from_env()?)?;
    let options = RequestOptions::default();

    let pool_id = match std::env::args().nth(1) {
        Some(arg) => Some(arg.parse::<i64>()?),
        None => None,
    };

    let pools = client.liquid_swap().list_pools(&options).await?;
    println!("{} {} swap pools available", "✓".green(), pools.len());
    if let Some(id) = pool_id {
        match pools.iter().find(|p| p.pool_id == id) {
            Some(pool) => println!("  {} {} ({})", "→".cyan(), pool.pool_name, pool.assets.join(", ")),
            None => println!("  {} pool {} not listed", "!".yellow(), id),
        }
    }
    println!();

    let query = LiquidityPoolsQuery { pool_id };
    let snapshots = client
        .liquid_swap()
        .get_liquidity_pools(&query, &options)
        .await?;

    for pool in snapshots
        .iter()
        .filter(|p| p.share.share_percentage_decimal().is_some_and(|s| !s.is_zero()))
    {
        println!(
            "  {:<14} share {} ({}%)",
            pool.pool_name.cyan().bold(),
            pool.share.share_amount,
            pool.share.share_percentage.green()
        );
        let mut assets: Vec<_> = pool.share.asset.iter().collect();
        assets.sort();
        for (asset, amount) in assets {
            let total = pool.liquidity.get(asset).map(String::as_str).unwrap_or("-");
            println!("      {:<8} {:>18} of {:>20}", asset, amount, total);
        }
    }
    println!();

    let mut ops_query = LiquidityOperationsQuery::new().with_limit(10);
    if let Some(id) = pool_id {
        ops_query = ops_query.with_pool_id(id);
    }
    let operations = client
        .liquid_swap()
        .list_liquidity_operations(&ops_query, &options)
        .await?;

    println!("{}", "  RECENT OPERATIONS".white().bold());
    println!("  {}", "─".repeat(60));
    for op in &operations {
        let status = match op.status {
            0 => "pending".yellow(),
            1 => "success".green(),
            _ => "failed".red(),
        };
        println!(
            "  #{:<10} {:<12} {:<7} {:>16} {}",
            op.operation_id, op.pool_name, op.operation, op.share_amount, status
        );
    }

    Ok(())
}
