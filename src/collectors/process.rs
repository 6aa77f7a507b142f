use crate::collectors::device::scaled_gb;
use crate::models::device::Device;
use crate::models::process::Process;
use log::{debug, error};
use nvml_wrapper::enums::device::UsedGpuMemory;
use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;
use std::os::unix::fs::MetadataExt;
use std::time::Instant;
use tokio::process::Command;

/// Compute processes currently running on `device`, in the order NVML
/// reports them. NVML failures propagate; the per-pid username, command and
/// uptime lookups are best-effort and fall back to sentinel values instead.
pub async fn collect(nvml: &Nvml, device: &Device) -> Result<Vec<Process>, NvmlError> {
    let start = Instant::now();
    let handle = nvml.device_by_index(device.id)?;
    let minor_number = handle.minor_number()?;

    let mut processes = Vec::new();
    for raw in handle.running_compute_processes()? {
        let mem_used = match raw.used_gpu_memory {
            UsedGpuMemory::Used(bytes) => scaled_gb(bytes),
            UsedGpuMemory::Unavailable => 0.0,
        };
        processes.push(Process {
            device_id: minor_number,
            user: resolve_username(raw.pid),
            name: resolve_command(raw.pid).await,
            uptime: resolve_uptime(raw.pid).await,
            pid: raw.pid,
            mem_used,
        });
    }
    debug!(
        "device {} process query took: {} ms ({} processes)",
        device.id,
        start.elapsed().as_millis(),
        processes.len()
    );
    Ok(processes)
}

/// Owner of `/proc/<pid>` mapped to a username. Falls back to "???" if the
/// process is gone, unreadable, or the uid has no passwd entry.
fn resolve_username(pid: u32) -> String {
    let uid = match std::fs::metadata(format!("/proc/{}", pid)) {
        Ok(metadata) => metadata.uid(),
        Err(e) => {
            error!("Failed to stat /proc/{}: {}", pid, e);
            return String::from("???");
        }
    };

    match uzers::get_user_by_uid(uid) {
        Some(user) => user.name().to_string_lossy().to_string(),
        None => {
            error!("No username for uid {} (pid {})", uid, pid);
            String::from("???")
        }
    }
}

/// Command line of the process via `ps -o cmd=`. Falls back to an empty
/// string, which is also what ps prints for a pid it cannot find.
async fn resolve_command(pid: u32) -> String {
    let cmd = Command::new("ps")
        .args(["-o", "cmd=", &pid.to_string()])
        .output()
        .await;

    match cmd {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim().to_string(),
        Err(e) => {
            error!("Failed to run ps for pid {}: {}", pid, e);
            String::new()
        }
    }
}

/// Elapsed time of the process via `ps -o etime=`. Falls back to "?".
async fn resolve_uptime(pid: u32) -> String {
    let cmd = Command::new("ps")
        .args(["-q", &pid.to_string(), "-o", "etime="])
        .output()
        .await;

    match cmd {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        Ok(_) => String::from("?"),
        Err(e) => {
            error!("Failed to run ps for pid {}: {}", pid, e);
            String::from("?")
        }
    }
}
