use std::sync::Arc;

use anyhow::{bail, Result};

use huntcast_core::trends::Period;
use huntcast_core::{AppConfig, JobOrchestrator, JobOutcome};

/// Run one digest for the given period and exit
pub async fn run(config: Arc<AppConfig>, period: Period) -> Result<()> {
    let orchestrator = JobOrchestrator::from_config(&config)?;

    match orchestrator.run(period).await {
        JobOutcome::Done {
            items, receipt, ..
        } => {
            println!(
                "{} digest published: {} products, {} item message(s) delivered.",
                period,
                items,
                receipt.item_message_ids.len()
            );
            if receipt.failed_items > 0 {
                println!("  {} item message(s) failed to send.", receipt.failed_items);
            }
            Ok(())
        }
        JobOutcome::Failed { stage, error, .. } => {
            bail!("{period} digest failed while {stage}: {error}")
        }
    }
}
