//! Validated aggregation queries and their cache fingerprint.

use core::fmt;

use chrono::NaiveDate;

use crate::{AlmanacError, DateRange, NewsSort, SortDirection};

/// A fully validated aggregation request.
///
/// Construction goes through [`AggregateQuery::new`] or [`AggregateQuery::parse`],
/// so a value of this type always has an ordered range and a non-blank keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateQuery {
    range: DateRange,
    keyword: String,
    sort_date: SortDirection,
    sort_news: NewsSort,
}

impl AggregateQuery {
    /// Build a query from typed parts. The keyword is trimmed.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the keyword is blank.
    pub fn new(
        range: DateRange,
        keyword: impl AsRef<str>,
        sort_date: SortDirection,
        sort_news: NewsSort,
    ) -> Result<Self, AlmanacError> {
        let keyword = keyword.as_ref().trim();
        if keyword.is_empty() {
            return Err(AlmanacError::invalid_arg("keyword cannot be null or empty"));
        }
        Ok(Self {
            range,
            keyword: keyword.to_string(),
            sort_date,
            sort_news,
        })
    }

    /// Validate the raw strings received at the boundary.
    ///
    /// Dates must be `yyyy-MM-dd` with `start <= end`; `sort_date_by` is one of
    /// `asc`/`desc` and `sort_news_by` one of `relevancy`/`popularity`/`publishedAt`,
    /// both case-insensitive.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the first offending parameter.
    pub fn parse(
        start_date: &str,
        end_date: &str,
        keyword: &str,
        sort_date_by: &str,
        sort_news_by: &str,
    ) -> Result<Self, AlmanacError> {
        let range = DateRange::parse(start_date, end_date)?;
        let sort_date = sort_date_by.parse::<SortDirection>()?;
        let sort_news = sort_news_by.parse::<NewsSort>()?;
        Self::new(range, keyword, sort_date, sort_news)
    }

    /// Requested date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Trimmed keyword (city for weather, search term for news).
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Record ordering.
    #[must_use]
    pub const fn sort_date(&self) -> SortDirection {
        self.sort_date
    }

    /// News ordering passed through to the news provider.
    #[must_use]
    pub const fn sort_news(&self) -> NewsSort {
        self.sort_news
    }

    /// Cache fingerprint of this query.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey {
            start: self.range.start(),
            end: self.range.end(),
            keyword: self.keyword.clone(),
            sort_date: self.sort_date,
            sort_news: self.sort_news,
        }
    }
}

/// Identity of a query for caching discrimination.
///
/// Built from canonical parts only, so two raw requests that differ in date
/// padding, whitespace or directive casing share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    start: NaiveDate,
    end: NaiveDate,
    keyword: String,
    sort_date: SortDirection,
    sort_news: NewsSort,
}

impl fmt::Display for QueryKey {
    // Length-prefix the keyword so keywords containing ':' cannot collide.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "aggregate:{}:{}:{}:{}:{}:{}",
            self.start.format(crate::DATE_FORMAT),
            self.end.format(crate::DATE_FORMAT),
            self.keyword.len(),
            self.keyword,
            self.sort_date,
            self.sort_news,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_noise_maps_to_same_key() {
        let a = AggregateQuery::parse("2024-01-01", "2024-01-03", "mars", "asc", "publishedAt")
            .unwrap();
        let b = AggregateQuery::parse(" 2024-1-1", "2024-01-3 ", "  mars ", "ASC", "PUBLISHEDAT")
            .unwrap();
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().to_string(), b.key().to_string());
    }

    #[test]
    fn every_input_participates_in_the_key() {
        let base = AggregateQuery::parse("2024-01-01", "2024-01-03", "mars", "asc", "relevancy")
            .unwrap()
            .key();
        let variants = [
            ("2024-01-02", "2024-01-03", "mars", "asc", "relevancy"),
            ("2024-01-01", "2024-01-04", "mars", "asc", "relevancy"),
            ("2024-01-01", "2024-01-03", "venus", "asc", "relevancy"),
            ("2024-01-01", "2024-01-03", "mars", "desc", "relevancy"),
            ("2024-01-01", "2024-01-03", "mars", "asc", "popularity"),
        ];
        for (s, e, k, d, n) in variants {
            let other = AggregateQuery::parse(s, e, k, d, n).unwrap().key();
            assert_ne!(base, other);
            assert_ne!(base.to_string(), other.to_string());
        }
    }

    #[test]
    fn colon_in_keyword_does_not_collide() {
        let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        let a = AggregateQuery::new(range, "a:asc", SortDirection::Asc, NewsSort::Relevancy)
            .unwrap();
        let b = AggregateQuery::new(range, "a", SortDirection::Asc, NewsSort::Relevancy).unwrap();
        assert_ne!(a.key().to_string(), b.key().to_string());
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let err = AggregateQuery::parse("2024-01-01", "2024-01-02", "   ", "asc", "relevancy")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn inverted_range_is_rejected_before_sorts() {
        let err = AggregateQuery::parse("2024-02-01", "2024-01-01", "mars", "bogus", "bogus")
            .unwrap_err();
        match err {
            AlmanacError::InvalidArg(msg) => assert!(msg.contains("cannot be after")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
