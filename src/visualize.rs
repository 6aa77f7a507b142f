use crate::renderer::chart;
use crate::store::LogData;
use anyhow::{Context, Result};
use image::DynamicImage;
use log::info;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("Device {device} missing in record {record}")]
    DeviceMissingInRecord { device: u32, record: usize },
}

/// `mem_used` of one device across every record, in file order. A record
/// without the device is an error, not a gap in the plot.
pub fn memory_series(data: &LogData, device_id: u32) -> Result<Vec<f64>, VisualizeError> {
    data.records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .get_device(device_id)
                .map(|device| device.mem_used)
                .ok_or(VisualizeError::DeviceMissingInRecord {
                    device: device_id,
                    record: index,
                })
        })
        .collect()
}

/// Loads a log, extracts one device's memory series and writes it as a line
/// chart to `out_path`, overwriting any existing file.
pub fn run(
    log_path: &Path,
    device_id: u32,
    out_path: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    let data = LogData::load(log_path)
        .with_context(|| format!("Failed to load log from {}", log_path.display()))?;
    let series = memory_series(&data, device_id)?;

    info!(
        "Charting {} sample(s) for device {}",
        series.len(),
        device_id
    );

    let image = chart::line_chart(&series, width, height);
    DynamicImage::ImageRgba8(image)
        .save(out_path)
        .with_context(|| format!("Failed to save chart to {}", out_path.display()))?;

    info!("Chart written to {}", out_path.display());
    Ok(())
}
