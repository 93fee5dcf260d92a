mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use almanac_middleware::CachingAggregator;
use almanac_types::CacheConfig;
use futures::future::join_all;
use helpers::{counting, query};

fn slow_cache(calls: &Arc<AtomicUsize>, delay_ms: u64) -> Arc<CachingAggregator> {
    let inner = counting(calls).with_delay(Duration::from_millis(delay_ms));
    Arc::new(CachingAggregator::new(
        Arc::new(inner),
        &CacheConfig::default(),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_misses_on_one_key_aggregate_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = slow_cache(&calls, 150);

    let tasks = (0..16).map(|_| {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get(&query("mars")).await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_keys_do_not_wait_for_each_other() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = slow_cache(&calls, 300);
    let keywords = ["mars", "london", "lisbon", "venus"];

    let started = Instant::now();
    let tasks = keywords.iter().map(|k| {
        let cache = Arc::clone(&cache);
        let q = query(k);
        tokio::spawn(async move { cache.get(&q).await })
    });
    for r in join_all(tasks).await {
        r.unwrap().unwrap();
    }
    let elapsed = started.elapsed();

    assert_eq!(calls.load(Ordering::SeqCst), keywords.len());
    assert!(
        elapsed < Duration::from_millis(900),
        "misses on distinct keys ran serially: {elapsed:?}"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_miss_releases_the_key() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = slow_cache(&calls, 300);

    let first = {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get(&query("mars")).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    first.abort();
    assert!(first.await.unwrap_err().is_cancelled());
    assert_eq!(cache.entry_count().await, 0, "no partial entry after cancel");

    let second = tokio::time::timeout(Duration::from_secs(3), cache.get(&query("mars")))
        .await
        .expect("key must not stay locked after cancellation")
        .unwrap();
    assert_eq!(second.data.len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    cache.get(&query("mars")).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn waiters_share_an_uncacheable_outcome() {
    let calls = Arc::new(AtomicUsize::new(0));
    let inner = counting(&calls)
        .with_delay(Duration::from_millis(150))
        .with_mode(helpers::Mode::AllSourcesFail);
    let cache = Arc::new(CachingAggregator::new(
        Arc::new(inner),
        &CacheConfig::default(),
    ));

    let tasks = (0..8).map(|_| {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.get(&query("mars")).await })
    });
    for r in join_all(tasks).await {
        assert_eq!(
            r.unwrap().unwrap().status,
            almanac_types::Status::Failure
        );
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.entry_count().await, 0);
}
