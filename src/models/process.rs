use serde::{Deserialize, Serialize};

/// One GPU compute process at poll time.
///
/// `device_id` is the NVML *minor number* of the device the process runs on,
/// not the enumeration index stored in `Device.id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub device_id: u32,
    pub user: String,
    pub name: String,
    pub uptime: String,
    pub pid: u32,
    pub mem_used: f64,
}
