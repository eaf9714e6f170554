mod deepseek;
mod gemini;
mod openai;

pub use deepseek::DeepSeekAnalyzer;
pub use gemini::GeminiAnalyzer;
pub use openai::OpenAiAnalyzer;

use std::collections::HashMap;

use crate::trends::{Period, TrendingItem};
use crate::Result;

/// AI-generated structured output for one job run: an overall period
/// summary plus optional per-item commentary keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub summary: String,
    pub commentary: HashMap<String, String>,
}

impl AnalysisResult {
    pub fn commentary_for(&self, item_id: &str) -> Option<&str> {
        self.commentary.get(item_id).map(String::as_str)
    }
}

/// Contract shared by all AI backends. Implementations differ only in
/// transport, request shape, and response parsing; the output language is
/// fixed at construction.
#[async_trait::async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Provider name as used in configuration
    fn name(&self) -> &'static str;

    /// Turn a non-empty item list into a complete AnalysisResult, or fail
    /// with an analysis error. Individual items may end up without
    /// commentary; the summary is always present on success.
    async fn analyze(&self, items: &[TrendingItem], period: Period) -> Result<AnalysisResult>;
}
