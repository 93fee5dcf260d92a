//! Almanac data transfer objects, configuration primitives and the shared error type.
#![warn(missing_docs)]

mod config;
mod error;
mod middleware;
mod model;
mod range;
mod reports;
mod sort;
mod source;

pub use config::{AlmanacConfig, CacheConfig, RetryConfig};
pub use error::AlmanacError;
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use model::{Article, AstronomyEntry, NewsFeed, Temperature, WeatherEntry};
pub use range::{DATE_FORMAT, DateRange, parse_date};
pub use reports::{
    AggregatedRecord, ProviderResult, ProviderStatistic, SourceFailure, Status, UnifiedResult,
};
pub use sort::{NewsSort, SortDirection};
pub use source::Source;
