use crate::models::record::Record;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access log file: {0}")]
    Io(#[from] io::Error),
    #[error("Corrupt record at line {line}: {source}")]
    CorruptRecord {
        line: usize,
        source: serde_json::Error,
    },
    #[error("Failed to serialise record: {0}")]
    Serialise(#[source] serde_json::Error),
}

/// A full log loaded in memory, one `Record` per file line, file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogData {
    pub records: Vec<Record>,
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Canonical persistence: appends one JSON line per record, never touching
/// lines already on disk.
pub fn append(path: &Path, record: &Record) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let line = serde_json::to_string(record).map_err(StoreError::Serialise)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

impl LogData {
    /// Legacy persistence: rewrites the whole file on every call. Kept for
    /// logs managed out-of-band; prefer `append` for the poll loop.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        ensure_parent(path)?;
        let mut file = File::create(path)?;
        for record in &self.records {
            let line = serde_json::to_string(record).map_err(StoreError::Serialise)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    /// Parses every line independently; the first invalid line fails the
    /// whole load with its 1-based line number.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let start = Instant::now();
        let file = File::open(path)?;
        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let record = serde_json::from_str(&line).map_err(|source| {
                StoreError::CorruptRecord {
                    line: index + 1,
                    source,
                }
            })?;
            records.push(record);
        }
        debug!(
            "load took: {} ms ({} records)",
            start.elapsed().as_millis(),
            records.len()
        );
        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::Device;
    use std::io::Write as _;
    use tempfile::TempDir;

    fn sample_record(time: f64, mem_used: f64) -> Record {
        Record {
            time,
            devices: vec![Device {
                id: 0,
                name: "NVIDIA RTX A2000".to_string(),
                mem_used,
                mem_total: 6.138,
                util: 0.5,
            }],
            processes: vec![],
        }
    }

    #[test]
    fn test_append_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs.jsonl");

        for i in 0..3 {
            let record = sample_record(1000.0 + i as f64, i as f64);
            append(&path, &record).unwrap();
        }

        let data = LogData::load(&path).unwrap();
        assert_eq!(data.records.len(), 3);
        for pair in data.records.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        assert_eq!(data.records[2].devices[0].mem_used, 2.0);
    }

    #[test]
    fn test_append_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/logs.jsonl");

        append(&path, &sample_record(1.0, 0.0)).unwrap();

        assert!(path.exists());
        assert_eq!(LogData::load(&path).unwrap().records.len(), 1);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs.jsonl");

        let data = LogData {
            records: vec![sample_record(1.0, 0.5), sample_record(2.0, 1.5)],
        };
        data.save(&path).unwrap();

        assert_eq!(LogData::load(&path).unwrap(), data);
    }

    #[test]
    fn test_load_rejects_corrupt_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs.jsonl");

        append(&path, &sample_record(1.0, 0.5)).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "not json").unwrap();

        match LogData::load(&path) {
            Err(StoreError::CorruptRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected CorruptRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = LogData::load(&dir.path().join("absent.jsonl"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
