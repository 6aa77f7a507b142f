use crate::collectors::{device, process};
use crate::models::record::Record;
use crate::session::NvmlSession;
use anyhow::{Context, Result};
use log::debug;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Builds one snapshot from a live session: devices in enumeration order,
/// then each device's processes flattened in the same order.
pub(crate) async fn build_record(session: &NvmlSession) -> Result<Record> {
    let start = Instant::now();
    let nvml = session.nvml();

    let mut devices = Vec::with_capacity(session.num_gpus() as usize);
    for index in 0..session.num_gpus() {
        let device = device::collect(nvml, index)
            .await
            .with_context(|| format!("Failed to query device {}", index))?;
        devices.push(device);
    }

    let time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the unix epoch")?
        .as_secs_f64();

    let mut processes = Vec::new();
    for device in &devices {
        let device_processes = process::collect(nvml, device)
            .await
            .with_context(|| format!("Failed to list processes on device {}", device.id))?;
        processes.extend(device_processes);
    }

    debug!("build_record took: {} ms", start.elapsed().as_millis());
    Ok(Record {
        time,
        devices,
        processes,
    })
}
