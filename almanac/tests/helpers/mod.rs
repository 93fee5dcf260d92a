#![allow(dead_code)]

use std::sync::Arc;

use almanac::{AggregateQuery, Almanac, AlmanacBuilder, Article, NewsFeed};
use almanac_mock::{DynamicMockController, DynamicMockProviders};
use chrono::{TimeZone, Utc};

pub fn dynamic() -> (AlmanacBuilder, DynamicMockController) {
    let (mock, controller) = DynamicMockProviders::new_with_controller();
    (Almanac::builder().with_providers(mock), controller)
}

pub fn query(start: &str, end: &str, keyword: &str) -> AggregateQuery {
    AggregateQuery::parse(start, end, keyword, "asc", "publishedAt").unwrap()
}

pub fn article(day: u32, hour: u32, title: &str) -> Article {
    Article {
        author: None,
        title: title.to_string(),
        description: None,
        url: format!("https://news.example/{title}"),
        published_at: Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap(),
    }
}

pub fn feed(articles: Vec<Article>) -> NewsFeed {
    NewsFeed::new(articles)
}

pub fn shared<T>(v: T) -> Arc<T> {
    Arc::new(v)
}
