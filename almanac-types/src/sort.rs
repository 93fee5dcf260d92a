//! Sort directives accepted at the boundary.
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AlmanacError;

/// Ordering of the per-day records in a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest day first. Records are generated in this order.
    #[default]
    Asc,
    /// Newest day first.
    Desc,
}

impl SortDirection {
    /// Canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AlmanacError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if t.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(AlmanacError::invalid_arg(format!(
                "invalid sortDateBy value '{s}'; valid options are: asc, desc"
            )))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering requested from the news provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NewsSort {
    /// Articles most closely related to the keyword come first.
    #[serde(rename = "relevancy")]
    Relevancy,
    /// Articles from popular sources and publishers come first.
    #[serde(rename = "popularity")]
    Popularity,
    /// Newest articles come first.
    #[default]
    #[serde(rename = "publishedAt")]
    PublishedAt,
}

impl NewsSort {
    /// Wire spelling understood by news providers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevancy => "relevancy",
            Self::Popularity => "popularity",
            Self::PublishedAt => "publishedAt",
        }
    }
}

impl FromStr for NewsSort {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        [Self::Relevancy, Self::Popularity, Self::PublishedAt]
            .into_iter()
            .find(|v| t.eq_ignore_ascii_case(v.as_str()))
            .ok_or_else(|| {
                AlmanacError::invalid_arg(format!(
                    "invalid sortNewsBy value '{s}'; valid options are: relevancy, popularity, publishedAt"
                ))
            })
    }
}

impl fmt::Display for NewsSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
