use serde::{Deserialize, Serialize};

/// The daily/weekly/monthly cadence identifier driving the fetch window
/// and the schedule trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// Length of the posted-within window in days
    pub fn window_days(&self) -> i64 {
        match self {
            Period::Daily => 1,
            Period::Weekly => 7,
            Period::Monthly => 30,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user comment attached to a trending product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemComment {
    pub body: String,
    pub author: String,
}

/// One trending product as returned by the content source.
/// Immutable once fetched; owned by the current job run.
/// Comments are only populated for daily fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub url: String,
    pub votes_count: u32,
    pub topics: Vec<String>,
    pub comments: Vec<ItemComment>,
}
