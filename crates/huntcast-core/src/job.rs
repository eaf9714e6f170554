use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ai::Analyzer;
use crate::config::AppConfig;
use crate::telegram::{PublishReceipt, Publisher, TelegramBot};
use crate::trends::{Period, ProductHuntClient, TrendSource};
use crate::{Error, Result};

/// Pipeline stage a run was in when it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStage {
    Fetching,
    Analyzing,
    Publishing,
}

impl std::fmt::Display for JobStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JobStage::Fetching => "Fetching",
            JobStage::Analyzing => "Analyzing",
            JobStage::Publishing => "Publishing",
        };
        f.write_str(name)
    }
}

/// Terminal state of one orchestrated run
#[derive(Debug)]
pub enum JobOutcome {
    Done {
        period: Period,
        started_at: DateTime<Utc>,
        items: usize,
        receipt: PublishReceipt,
    },
    Failed {
        period: Period,
        started_at: DateTime<Utc>,
        stage: JobStage,
        error: Error,
    },
}

impl JobOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, JobOutcome::Done { .. })
    }

    pub fn failed_stage(&self) -> Option<JobStage> {
        match self {
            JobOutcome::Failed { stage, .. } => Some(*stage),
            JobOutcome::Done { .. } => None,
        }
    }
}

/// Runs Fetch → Analyze → Publish for one period. Each stage runs to
/// completion or failure before the next begins; no stage is retried
/// within a run, and a failure in any stage terminates the run without
/// side effects from later stages.
pub struct JobOrchestrator {
    source: Arc<dyn TrendSource>,
    analyzer: Analyzer,
    publisher: Publisher,
}

impl JobOrchestrator {
    pub fn new(source: Arc<dyn TrendSource>, analyzer: Analyzer, publisher: Publisher) -> Self {
        Self {
            source,
            analyzer,
            publisher,
        }
    }

    /// Wire the concrete collaborators from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = Arc::new(ProductHuntClient::new(config)?);
        let analyzer = Analyzer::from_config(config)?;
        let bot = Arc::new(TelegramBot::new(config)?);
        let publisher = Publisher::new(bot, &config.ai.output_language);
        Ok(Self::new(source, analyzer, publisher))
    }

    /// Execute one run. Never propagates an error upward: every failure
    /// is reduced to a logged terminal outcome so nothing escapes to the
    /// scheduler.
    pub async fn run(&self, period: Period) -> JobOutcome {
        let started_at = Utc::now();
        tracing::info!("Starting {} job run", period);

        let items = match self.source.fetch(period).await {
            Ok(items) => items,
            Err(error) => {
                tracing::error!("{} run failed while fetching: {}", period, error);
                self.publisher.notify_failure(period, &error).await;
                return JobOutcome::Failed {
                    period,
                    started_at,
                    stage: JobStage::Fetching,
                    error,
                };
            }
        };

        let analysis = match self.analyzer.analyze(&items, period).await {
            Ok(analysis) => analysis,
            Err(error) => {
                tracing::error!("{} run failed while analyzing: {}", period, error);
                self.publisher.notify_failure(period, &error).await;
                return JobOutcome::Failed {
                    period,
                    started_at,
                    stage: JobStage::Analyzing,
                    error,
                };
            }
        };

        let receipt = match self.publisher.publish(period, &items, &analysis).await {
            Ok(receipt) => receipt,
            Err(error) => {
                tracing::error!("{} run failed while publishing: {}", period, error);
                self.publisher.notify_failure(period, &error).await;
                return JobOutcome::Failed {
                    period,
                    started_at,
                    stage: JobStage::Publishing,
                    error,
                };
            }
        };

        if receipt.failed_items > 0 {
            tracing::warn!(
                "{} run completed with {} item message(s) dropped",
                period,
                receipt.failed_items
            );
        } else {
            tracing::info!("{} run completed", period);
        }

        JobOutcome::Done {
            period,
            started_at,
            items: items.len(),
            receipt,
        }
    }
}
