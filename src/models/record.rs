use crate::models::device::Device;
use crate::models::process::Process;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One poll tick: every device in enumeration order, then every device's
/// process list flattened in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub time: f64,
    pub devices: Vec<Device>,
    pub processes: Vec<Process>,
}

impl Record {
    /// Looks up a device by its enumeration id within this record.
    pub fn get_device(&self, id: u32) -> Option<&Device> {
        let mapping: HashMap<u32, &Device> =
            self.devices.iter().map(|device| (device.id, device)).collect();
        mapping.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            time: 1724918400.25,
            devices: vec![
                Device {
                    id: 0,
                    name: "NVIDIA RTX A2000".to_string(),
                    mem_used: 1.024,
                    mem_total: 6.138,
                    util: 0.37,
                },
                Device {
                    id: 1,
                    name: "NVIDIA RTX A2000".to_string(),
                    mem_used: 0.0,
                    mem_total: 6.138,
                    util: 0.0,
                },
            ],
            processes: vec![Process {
                device_id: 2,
                user: "alice".to_string(),
                name: "python train.py".to_string(),
                uptime: "01:02:03".to_string(),
                pid: 4242,
                mem_used: 1.024,
            }],
        }
    }

    #[test]
    fn test_json_round_trip() {
        let record = sample_record();
        let line = serde_json::to_string(&record).unwrap();
        let parsed: Record = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_json_field_names() {
        let line = serde_json::to_string(&sample_record()).unwrap();
        for field in ["\"time\"", "\"devices\"", "\"processes\"", "\"mem_used\"", "\"device_id\"", "\"uptime\""] {
            assert!(line.contains(field), "missing {} in {}", field, line);
        }
    }

    #[test]
    fn test_get_device() {
        let record = sample_record();
        assert_eq!(record.get_device(1).unwrap().id, 1);
        assert!(record.get_device(7).is_none());
    }
}
