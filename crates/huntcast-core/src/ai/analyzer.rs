use std::sync::Arc;

use super::providers::{AnalysisResult, ContentAnalyzer};
use super::registry::ProviderRegistry;
use crate::config::AppConfig;
use crate::telegram::Labels;
use crate::trends::{Period, TrendingItem};
use crate::Result;

/// Wraps the resolved provider behind the analysis contract. The wrapper
/// short-circuits empty input so no backend call is wasted on a run with
/// nothing to analyze.
pub struct Analyzer {
    provider: Arc<dyn ContentAnalyzer>,
    labels: &'static Labels,
}

impl Analyzer {
    /// Resolve the configured provider once and wrap it
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let provider = ProviderRegistry::resolve(config)?;
        Ok(Self::with_provider(provider, &config.ai.output_language))
    }

    pub fn with_provider(provider: Arc<dyn ContentAnalyzer>, language: &str) -> Self {
        Self {
            provider,
            labels: Labels::for_language(language),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Produce one AnalysisResult for one run's item list. Zero items
    /// yields a "no items" summary without touching the backend.
    pub async fn analyze(&self, items: &[TrendingItem], period: Period) -> Result<AnalysisResult> {
        if items.is_empty() {
            tracing::warn!("No {} items to analyze, skipping backend call", period);
            return Ok(AnalysisResult {
                summary: self.labels.no_items.to_string(),
                commentary: Default::default(),
            });
        }

        self.provider.analyze(items, period).await
    }
}
