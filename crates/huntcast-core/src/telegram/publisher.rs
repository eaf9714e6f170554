use std::sync::Arc;

use super::bot::ChannelApi;
use super::messages::{render_directory, render_item_from_analysis, Labels};
use crate::ai::AnalysisResult;
use crate::trends::{Period, TrendingItem};
use crate::{Error, Result};

/// What one publish step delivered
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub directory_message_id: i64,
    pub item_message_ids: Vec<i64>,
    pub failed_items: u32,
}

/// Renders and delivers one run's messages: the pinned directory first,
/// then one message per item in fetch order.
pub struct Publisher {
    channel: Arc<dyn ChannelApi>,
    labels: &'static Labels,
}

impl Publisher {
    pub fn new(channel: Arc<dyn ChannelApi>, language: &str) -> Self {
        Self {
            channel,
            labels: Labels::for_language(language),
        }
    }

    /// Directory failure aborts the whole step; per-item failures are
    /// logged and skipped. Not idempotent: re-running a period duplicates
    /// messages.
    pub async fn publish(
        &self,
        period: Period,
        items: &[TrendingItem],
        analysis: &AnalysisResult,
    ) -> Result<PublishReceipt> {
        let directory = render_directory(self.labels, period, items, &analysis.summary);
        let directory_message_id = self
            .channel
            .send_message(&directory)
            .await
            .map_err(|e| Error::Publish(format!("Directory message failed: {e}")))?;

        if let Err(e) = self.channel.pin_message(directory_message_id).await {
            tracing::warn!("Failed to pin directory message: {}", e);
        }

        let mut item_message_ids = Vec::with_capacity(items.len());
        let mut failed_items = 0u32;

        for item in items {
            let text = render_item_from_analysis(self.labels, item, analysis);
            match self.channel.send_message(&text).await {
                Ok(id) => item_message_ids.push(id),
                Err(e) => {
                    failed_items += 1;
                    tracing::error!("Failed to send message for {}: {}", item.name, e);
                }
            }
        }

        tracing::info!(
            "Published {} digest: directory + {}/{} item messages",
            period,
            item_message_ids.len(),
            items.len()
        );

        Ok(PublishReceipt {
            directory_message_id,
            item_message_ids,
            failed_items,
        })
    }

    /// Best-effort failure notice to the channel. A notice that cannot
    /// be delivered is only logged.
    pub async fn notify_failure(&self, period: Period, error: &Error) {
        let text = format!("❌ {}: {}", self.labels.task_failed_for(period), error);
        if let Err(e) = self.channel.send_message(&text).await {
            tracing::warn!("Failed to send {} failure notice: {}", period, e);
        }
    }
}
