use anyhow::{Context, Result};
use log::debug;
use nvml_wrapper::Nvml;

/// Scoped NVML context for one poll tick.
///
/// NVML is initialised on acquire and shut down when the session drops, on
/// every exit path. No session is held across ticks.
pub struct NvmlSession {
    nvml: Nvml,
    num_gpus: u32,
}

impl NvmlSession {
    pub fn acquire() -> Result<Self> {
        let nvml = Nvml::init().context("Failed to initialise NVML")?;
        let num_gpus = nvml
            .device_count()
            .context("Failed to read NVML device count")?;
        debug!("NVML session acquired, {} device(s)", num_gpus);
        Ok(Self { nvml, num_gpus })
    }

    pub fn nvml(&self) -> &Nvml {
        &self.nvml
    }

    pub fn num_gpus(&self) -> u32 {
        self.num_gpus
    }
}
