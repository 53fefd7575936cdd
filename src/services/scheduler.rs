use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::Result;
use crate::services::completion_sweeper::CompletionSweeper;

/// Starts the reminder sweep on `cron` (six fields, seconds first).
///
/// A failed cycle is logged; the next tick runs a fresh sweep.
pub async fn start_scheduler(sweeper: CompletionSweeper, cron: &str) -> Result<JobScheduler> {
    let sched = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |_id, _lock| {
        let sweeper = sweeper.clone();
        Box::pin(async move {
            match sweeper.sweep().await {
                Ok(sent) => tracing::info!(reminders = sent, "scheduled completion sweep done"),
                Err(e) => tracing::error!(error = %e, "scheduled completion sweep failed"),
            }
        })
    })?;

    sched.add(job).await?;
    sched.start().await?;
    tracing::info!(cron, "completion sweep scheduled");
    Ok(sched)
}
