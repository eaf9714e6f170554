use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use huntcast_core::scheduler::SchedulerService;
use huntcast_core::{AppConfig, JobOrchestrator};

/// Run the scheduler in the foreground until Ctrl+C
pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let orchestrator = Arc::new(JobOrchestrator::from_config(&config)?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    println!(
        "huntcast daemon started (provider: {}). Press Ctrl+C to stop.",
        config.ai.provider
    );
    println!(
        "  Daily digest at {} ({})",
        config.schedule.daily_time, config.schedule.timezone
    );
    println!("  Weekly digest on {}", config.schedule.weekly_day);
    println!("  Monthly digest on day {}", config.schedule.monthly_day);

    let scheduler = SchedulerService::new(orchestrator, config.schedule.clone());
    scheduler.run(shutdown_rx).await?;

    println!("Daemon stopped.");
    Ok(())
}
