use serde::{Deserialize, Serialize};

/// One GPU at poll time. `id` is the NVML enumeration index, which is also
/// the id the chart subcommand selects on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub mem_used: f64,
    pub mem_total: f64,
    pub util: f64,
}
