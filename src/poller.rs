use crate::collector;
use crate::session::NvmlSession;
use crate::store;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::time::Duration;

/// Polls forever: one NVML session per tick, append-mode persistence, then a
/// fixed sleep. A tick that overruns the interval delays later ticks; the
/// schedule is never compressed to catch up.
pub async fn run(path: &Path, interval: u64) -> Result<()> {
    info!(
        "Recording GPU statistics to {} every {}s",
        path.display(),
        interval
    );

    loop {
        let record = {
            let session = NvmlSession::acquire()?;
            collector::build_record(&session).await?
        };

        store::append(path, &record)
            .with_context(|| format!("Failed to append record to {}", path.display()))?;

        info!(
            "[{}] recorded {} device(s), {} process(es)",
            chrono::Local::now().format("%H:%M:%S"),
            record.devices.len(),
            record.processes.len()
        );

        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}
