use crate::models::device::Device;
use log::debug;
use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;
use std::time::Instant;

/// Raw NVML byte counts shifted to MiB, then divided by 1000. The mixed
/// binary/decimal scaling is the format existing logs use; keep it as is.
pub fn scaled_gb(bytes: u64) -> f64 {
    ((bytes >> 20) as f64) / 1000.0
}

pub async fn collect(nvml: &Nvml, index: u32) -> Result<Device, NvmlError> {
    let start = Instant::now();
    let handle = nvml.device_by_index(index)?;
    let mem_info = handle.memory_info()?;
    let util = handle.utilization_rates()?;

    let device = Device {
        id: index,
        name: handle.name()?,
        mem_used: scaled_gb(mem_info.used),
        mem_total: scaled_gb(mem_info.total),
        util: f64::from(util.gpu) / 100.0,
    };
    debug!(
        "device {} query took: {} ms",
        index,
        start.elapsed().as_millis()
    );
    Ok(device)
}
