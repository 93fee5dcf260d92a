use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use almanac_core::{
    AlmanacError, AstronomyEntry, AstronomyProvider, DateRange, NewsFeed, NewsProvider, NewsSort,
    Source, WeatherEntry, WeatherProvider,
};

/// Instruction for how a provider call should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Sleep for the given duration, then return the value.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(AlmanacError),
    /// Hang indefinitely (simulate a stalled connection).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, AlmanacError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delay(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

/// Scripted behaviors for one source: queued one-shot steps, then a fallback.
struct Script<T> {
    queued: VecDeque<MockBehavior<T>>,
    fallback: MockBehavior<T>,
}

impl<T: Clone> Script<T> {
    fn new(fallback: MockBehavior<T>) -> Self {
        Self {
            queued: VecDeque::new(),
            fallback,
        }
    }

    fn next(&mut self) -> MockBehavior<T> {
        self.queued
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

struct InternalState {
    weather: Script<Vec<WeatherEntry>>,
    astronomy: Script<Vec<AstronomyEntry>>,
    news: Script<NewsFeed>,
}

impl Default for InternalState {
    fn default() -> Self {
        Self {
            weather: Script::new(MockBehavior::Return(Vec::new())),
            astronomy: Script::new(MockBehavior::Return(Vec::new())),
            news: Script::new(MockBehavior::Return(NewsFeed::default())),
        }
    }
}

#[derive(Default)]
struct Counters {
    weather: AtomicUsize,
    astronomy: AtomicUsize,
    news: AtomicUsize,
}

impl Counters {
    const fn of(&self, source: Source) -> &AtomicUsize {
        match source {
            Source::Weather => &self.weather,
            Source::Astronomy => &self.astronomy,
            Source::News => &self.news,
        }
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    calls: Arc<Counters>,
}

impl DynamicMockController {
    /// Replace the fallback behavior for weather calls.
    pub async fn set_weather(&self, behavior: MockBehavior<Vec<WeatherEntry>>) {
        self.state.lock().await.weather.fallback = behavior;
    }

    /// Queue a one-shot weather behavior consumed before the fallback.
    pub async fn push_weather(&self, behavior: MockBehavior<Vec<WeatherEntry>>) {
        self.state.lock().await.weather.queued.push_back(behavior);
    }

    /// Replace the fallback behavior for astronomy calls.
    pub async fn set_astronomy(&self, behavior: MockBehavior<Vec<AstronomyEntry>>) {
        self.state.lock().await.astronomy.fallback = behavior;
    }

    /// Queue a one-shot astronomy behavior consumed before the fallback.
    pub async fn push_astronomy(&self, behavior: MockBehavior<Vec<AstronomyEntry>>) {
        self.state.lock().await.astronomy.queued.push_back(behavior);
    }

    /// Replace the fallback behavior for news calls.
    pub async fn set_news(&self, behavior: MockBehavior<NewsFeed>) {
        self.state.lock().await.news.fallback = behavior;
    }

    /// Queue a one-shot news behavior consumed before the fallback.
    pub async fn push_news(&self, behavior: MockBehavior<NewsFeed>) {
        self.state.lock().await.news.queued.push_back(behavior);
    }

    /// Make every call for `source` fail with `error` until changed.
    pub async fn fail(&self, source: Source, error: AlmanacError) {
        let mut guard = self.state.lock().await;
        match source {
            Source::Weather => guard.weather.fallback = MockBehavior::Fail(error),
            Source::Astronomy => guard.astronomy.fallback = MockBehavior::Fail(error),
            Source::News => guard.news.fallback = MockBehavior::Fail(error),
        }
    }

    /// Make every call for `source` hang until changed.
    pub async fn hang(&self, source: Source) {
        let mut guard = self.state.lock().await;
        match source {
            Source::Weather => guard.weather.fallback = MockBehavior::Hang,
            Source::Astronomy => guard.astronomy.fallback = MockBehavior::Hang,
            Source::News => guard.news.fallback = MockBehavior::Hang,
        }
    }

    /// Number of calls received for `source`, including failed and hanging ones.
    #[must_use]
    pub fn calls(&self, source: Source) -> usize {
        self.calls.of(source).load(Ordering::SeqCst)
    }

    /// Total number of calls across all sources.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        Source::ALL.iter().map(|s| self.calls(*s)).sum()
    }

    /// Reset every behavior to an empty success and drop queued steps.
    pub async fn clear_all_behaviors(&self) {
        *self.state.lock().await = InternalState::default();
    }
}

/// Providers that defer all behavior to an external controller.
pub struct DynamicMockProviders {
    state: Arc<Mutex<InternalState>>,
    calls: Arc<Counters>,
}

impl DynamicMockProviders {
    /// Create the providers and their controller.
    ///
    /// Every source answers with empty data until scripted otherwise.
    #[must_use]
    pub fn new_with_controller() -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let calls = Arc::new(Counters::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            calls: Arc::clone(&calls),
        };
        (Arc::new(Self { state, calls }), controller)
    }

    fn count(&self, source: Source) {
        self.calls.of(source).fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl WeatherProvider for DynamicMockProviders {
    async fn weather(
        &self,
        _keyword: &str,
        _range: DateRange,
    ) -> Result<Vec<WeatherEntry>, AlmanacError> {
        self.count(Source::Weather);
        // Take the behavior without holding the lock across the await.
        let behavior = self.state.lock().await.weather.next();
        behavior.run().await
    }
}

#[async_trait]
impl AstronomyProvider for DynamicMockProviders {
    async fn astronomy(&self, _range: DateRange) -> Result<Vec<AstronomyEntry>, AlmanacError> {
        self.count(Source::Astronomy);
        let behavior = self.state.lock().await.astronomy.next();
        behavior.run().await
    }
}

#[async_trait]
impl NewsProvider for DynamicMockProviders {
    async fn news(
        &self,
        _keyword: &str,
        _range: DateRange,
        _sort: NewsSort,
    ) -> Result<NewsFeed, AlmanacError> {
        self.count(Source::News);
        let behavior = self.state.lock().await.news.next();
        behavior.run().await
    }
}
