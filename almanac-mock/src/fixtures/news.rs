use almanac_core::{Article, NewsSort};
use chrono::{DateTime, TimeZone, Utc};

fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, h, m, 0)
        .single()
        .unwrap_or_default()
}

fn article(title: &str, author: Option<&str>, published_at: DateTime<Utc>) -> Article {
    let slug = title.to_ascii_lowercase().replace(' ', "-");
    Article {
        author: author.map(str::to_string),
        title: title.to_string(),
        description: Some(format!("Summary: {title}.")),
        url: format!("https://news.example/{slug}"),
        published_at,
    }
}

/// Articles for a known keyword, ordered as a provider would for `sort`.
pub fn by_keyword(keyword: &str, sort: NewsSort) -> Vec<Article> {
    let mut articles = match keyword.to_ascii_lowercase().as_str() {
        "mars" => vec![article(
            "Rover finds new sediment layers",
            Some("A. Reporter"),
            at(2, 10, 30),
        )],
        "london" => vec![
            article("Thames barrier closes twice", Some("B. Writer"), at(1, 8, 0)),
            article("Cold snap grips the capital", None, at(1, 17, 45)),
            article("Tube strike called off", Some("C. Editor"), at(2, 6, 15)),
            article("New year footfall up", None, at(2, 12, 0)),
            article("Markets open flat", Some("D. Analyst"), at(2, 13, 30)),
            article("Late trains on Friday", None, at(2, 22, 10)),
            article("River cleanup begins", Some("E. Columnist"), at(4, 9, 0)),
        ],
        _ => Vec::new(),
    };
    match sort {
        NewsSort::PublishedAt => articles.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        NewsSort::Popularity => articles.sort_by(|a, b| a.title.len().cmp(&b.title.len())),
        NewsSort::Relevancy => {}
    }
    articles
}
