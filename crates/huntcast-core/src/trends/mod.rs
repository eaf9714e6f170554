mod client;
mod models;

pub use client::ProductHuntClient;
pub use models::{ItemComment, Period, TrendingItem};

use crate::Result;

/// Source of ranked trending items for a period
#[async_trait::async_trait]
pub trait TrendSource: Send + Sync {
    /// Fetch the ranked item list for `period`, capped at the configured
    /// maximum. An empty list is a valid result, not an error.
    async fn fetch(&self, period: Period) -> Result<Vec<TrendingItem>>;
}
