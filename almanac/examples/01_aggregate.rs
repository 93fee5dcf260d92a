use std::sync::Arc;
use std::time::Duration;

use almanac::{Aggregate, Almanac};
use almanac_mock::MockProviders;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=almanac=debug shows retries and per-source spans with `--features tracing`.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    // 1. Register one provider set for all three roles.
    let almanac = Almanac::builder()
        .with_providers(Arc::new(MockProviders::new()))
        .provider_timeout(Duration::from_secs(5))
        .build()?;

    // 2. Aggregate straight from boundary strings.
    let result = almanac
        .aggregate_raw("2024-01-01", "2024-01-03", "mars", "asc", "publishedAt")
        .await?;
    println!("{}", result.to_json_pretty()?);

    // 3. Latency buckets per source.
    for stat in almanac.statistics() {
        println!(
            "{:<10} total={} fast={} average={} slow={} mean={:.1}ms",
            stat.api_name,
            stat.total_requests,
            stat.fast_requests,
            stat.average_requests,
            stat.slow_requests,
            stat.average_response_time,
        );
    }

    Ok(())
}
