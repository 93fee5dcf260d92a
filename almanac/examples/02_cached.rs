use std::sync::Arc;
use std::time::Instant;

use almanac::{AggregateQuery, Almanac, CacheConfig};
use almanac_mock::{MockProviders, SLOW_KEYWORD};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let almanac = Almanac::builder()
        .with_providers(Arc::new(MockProviders::new()))
        .build()?;
    let stats = almanac.statistics_recorder();
    let cached = almanac.cached(&CacheConfig::default());

    // The slow keyword makes every provider sleep, so the cache hit is visible.
    let query = AggregateQuery::parse(
        "2024-01-01",
        "2024-01-05",
        SLOW_KEYWORD,
        "desc",
        "relevancy",
    )?;

    for round in 1..=2 {
        let started = Instant::now();
        let result = cached.get(&query).await?;
        println!(
            "round {round}: {:?} with {} days in {:?}",
            result.status,
            result.data.len(),
            started.elapsed()
        );
    }

    println!("entries cached: {}", cached.entry_count().await);
    println!("{}", serde_json::to_string_pretty(&stats.snapshot())?);
    Ok(())
}
