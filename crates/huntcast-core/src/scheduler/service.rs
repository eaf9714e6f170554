use std::sync::Arc;

use chrono_tz::Tz;
use tokio::sync::watch;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

use crate::config::{parse_daily_time, ScheduleConfig};
use crate::job::JobOrchestrator;
use crate::trends::Period;
use crate::{Error, Result};

/// Process-wide timer holding one trigger registration per period.
/// Constructed at daemon startup, runs until the shutdown channel flips.
/// Holds no persisted state: a trigger missed during downtime is not
/// made up.
pub struct SchedulerService {
    orchestrator: Arc<JobOrchestrator>,
    schedule: ScheduleConfig,
}

impl SchedulerService {
    pub fn new(orchestrator: Arc<JobOrchestrator>, schedule: ScheduleConfig) -> Self {
        Self {
            orchestrator,
            schedule,
        }
    }

    fn register(
        &self,
        scheduler: &JobScheduler,
        expr: String,
        tz: Tz,
        period: Period,
    ) -> Result<Job> {
        let orchestrator = Arc::clone(&self.orchestrator);
        let job = Job::new_async_tz(expr.as_str(), tz, move |_uuid, _lock| {
            let orchestrator = Arc::clone(&orchestrator);
            Box::pin(async move {
                // run() reduces every failure to a logged outcome, so a
                // failed run never disturbs the other triggers.
                let _ = orchestrator.run(period).await;
            })
        })
        .map_err(|e| Error::Schedule(format!("Invalid {period} trigger '{expr}': {e}")))?;

        info!("Registered {} trigger: {} ({})", period, expr, tz);
        Ok(job)
    }

    /// Run until shutdown. Each trigger firing dispatches one job run for
    /// its period; distinct periods may overlap freely since runs share
    /// no mutable state.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let tz: Tz = self
            .schedule
            .timezone
            .parse()
            .map_err(|_| Error::Config(format!("Invalid time zone: {}", self.schedule.timezone)))?;
        let (hour, minute) = parse_daily_time(&self.schedule.daily_time)?;
        let weekly_day = weekday_token(&self.schedule.weekly_day)?;

        let mut scheduler = JobScheduler::new()
            .await
            .map_err(|e| Error::Schedule(e.to_string()))?;

        let jobs = [
            self.register(&scheduler, daily_cron(hour, minute), tz, Period::Daily)?,
            self.register(
                &scheduler,
                weekly_cron(hour, minute, weekly_day),
                tz,
                Period::Weekly,
            )?,
            self.register(
                &scheduler,
                monthly_cron(hour, minute, self.schedule.monthly_day),
                tz,
                Period::Monthly,
            )?,
        ];
        for job in jobs {
            scheduler
                .add(job)
                .await
                .map_err(|e| Error::Schedule(e.to_string()))?;
        }

        scheduler
            .start()
            .await
            .map_err(|e| Error::Schedule(e.to_string()))?;
        info!("Scheduler started, waiting for triggers");

        // Block until the shutdown signal flips
        loop {
            if shutdown.changed().await.is_err() || *shutdown.borrow() {
                break;
            }
        }

        info!("Scheduler received shutdown signal");
        scheduler
            .shutdown()
            .await
            .map_err(|e| Error::Schedule(e.to_string()))?;
        info!("Scheduler stopped");
        Ok(())
    }
}

fn daily_cron(hour: u32, minute: u32) -> String {
    format!("0 {minute} {hour} * * *")
}

fn weekly_cron(hour: u32, minute: u32, day: &str) -> String {
    format!("0 {minute} {hour} * * {day}")
}

fn monthly_cron(hour: u32, minute: u32, day_of_month: u32) -> String {
    format!("0 {minute} {hour} {day_of_month} * *")
}

fn weekday_token(name: &str) -> Result<&'static str> {
    let token = match name.to_ascii_lowercase().as_str() {
        "monday" => "MON",
        "tuesday" => "TUE",
        "wednesday" => "WED",
        "thursday" => "THU",
        "friday" => "FRI",
        "saturday" => "SAT",
        "sunday" => "SUN",
        _ => return Err(Error::Config(format!("Invalid weekly_day: {name}"))),
    };
    Ok(token)
}
