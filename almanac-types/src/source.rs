use core::fmt;
use serde::{Deserialize, Serialize};

/// The three upstream data sources merged into every aggregated day.
///
/// Labels double as provider names for statistics and as the names listed in
/// partial-failure messages, so their `Display` form is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Daily temperature snapshots looked up by city keyword.
    Weather,
    /// Astronomy picture of the day.
    Astronomy,
    /// News articles matching the keyword.
    News,
}

impl Source {
    /// All sources in fan-out order.
    pub const ALL: [Self; 3] = [Self::Weather, Self::Astronomy, Self::News];

    /// Stable identifier for logs, statistics and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Astronomy => "astronomy",
            Self::News => "news",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
