//! Scan orchestration. Drives a device source once, classifies every record
//! against the signature catalog, and assembles the final report.

pub mod sysfs;

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::device::{Catalog, ClassificationResult, DeviceRecord, classify};

/// Device buses the scanner can enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    Usb,
    Pci,
}

impl std::fmt::Display for BusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusType::Usb => write!(f, "usb"),
            BusType::Pci => write!(f, "pci"),
        }
    }
}

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Buses to enumerate, in scan order.
    pub buses: Vec<BusType>,
    /// Root of the sysfs mount. Overridable for tests.
    pub sysfs_root: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            buses: vec![BusType::Usb, BusType::Pci],
            sysfs_root: PathBuf::from("/sys"),
        }
    }
}

/// Enumeration could not be opened at all. Distinct from a clean scan that
/// found nothing suspicious.
#[derive(Debug, thiserror::Error)]
pub enum EnumerationError {
    #[error("device enumeration unavailable under {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Produces device records for one scan.
///
/// A source is one-shot and not reentrant: each `open` starts a fresh
/// enumeration session, the returned iterator is the record sequence in the
/// platform's stable session order, and dropping the iterator releases the
/// session. Per-device property failures are the source's concern and must
/// surface as empty strings in the record, never as an aborted scan.
pub trait DeviceSource {
    fn open(&self) -> Result<Box<dyn Iterator<Item = DeviceRecord> + '_>, EnumerationError>;
}

/// Classify every device from the source, preserving enumeration order.
pub fn scan(
    source: &dyn DeviceSource,
    catalog: &Catalog,
) -> Result<Vec<ClassificationResult>, EnumerationError> {
    let records = source.open()?;
    Ok(records.filter_map(|record| classify(record, catalog)).collect())
}

/// Outcome of one full scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub results: Vec<ClassificationResult>,
    pub enumeration_failed: bool,
    pub devices_scanned: usize,
    pub completed_at: i64,
}

/// Run one scan and fold the outcome, including enumeration failure, into a
/// report the presentation layer can render directly.
pub fn run_scan(source: &dyn DeviceSource, catalog: &Catalog) -> ScanReport {
    match source.open() {
        Ok(records) => {
            let mut devices_scanned = 0;
            let mut results = Vec::new();

            for record in records {
                devices_scanned += 1;
                if let Some(result) = classify(record, catalog) {
                    log::info!(
                        "Suspicious device: {} [{}]",
                        result.device.joined_ids(),
                        result.category
                    );
                    results.push(result);
                }
            }

            log::debug!(
                "Scanned {} devices, {} suspicious",
                devices_scanned,
                results.len()
            );

            ScanReport {
                results,
                enumeration_failed: false,
                devices_scanned,
                completed_at: chrono::Utc::now().timestamp(),
            }
        }
        Err(err) => {
            log::error!("Device enumeration failed: {}", err);
            ScanReport {
                results: Vec::new(),
                enumeration_failed: true,
                devices_scanned: 0,
                completed_at: chrono::Utc::now().timestamp(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        records: Vec<DeviceRecord>,
    }

    impl DeviceSource for StubSource {
        fn open(&self) -> Result<Box<dyn Iterator<Item = DeviceRecord> + '_>, EnumerationError> {
            Ok(Box::new(self.records.clone().into_iter()))
        }
    }

    struct FailingSource;

    impl DeviceSource for FailingSource {
        fn open(&self) -> Result<Box<dyn Iterator<Item = DeviceRecord> + '_>, EnumerationError> {
            Err(EnumerationError::Unavailable {
                path: PathBuf::from("/sys"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
            })
        }
    }

    fn record(ids: &[&str], description: &str) -> DeviceRecord {
        DeviceRecord::new(ids.iter().map(|s| s.to_string()).collect(), description)
    }

    #[test]
    fn test_scan_kmbox_hardware_id() {
        let source = StubSource {
            records: vec![record(&["VID_1A2C&PID_2124"], "")],
        };

        let results = scan(&source, &Catalog::builtin()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, "KMBOX-pattern");
    }

    #[test]
    fn test_scan_dma_description() {
        let source = StubSource {
            records: vec![record(
                &[],
                "Generic PCI Accelerator, compatible with PCI\\CC_0800",
            )],
        };

        let results = scan(&source, &Catalog::builtin()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, "DMA-capable");
    }

    #[test]
    fn test_scan_benign_device() {
        let source = StubSource {
            records: vec![record(&["VID_8086&PID_1234"], "Intel Network Adapter")],
        };

        let results = scan(&source, &Catalog::builtin()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_scan_enumeration_failure() {
        let result = scan(&FailingSource, &Catalog::builtin());
        assert!(matches!(result, Err(EnumerationError::Unavailable { .. })));
    }

    #[test]
    fn test_scan_preserves_enumeration_order() {
        let source = StubSource {
            records: vec![
                record(&["VID_046D&PID_C52B"], "Logitech USB Receiver"),
                record(&["USB\\VID_1A2C&PID_2124"], ""),
                record(&["VID_8086&PID_15F3"], "Intel Ethernet Controller"),
                record(&["PCI\\CC_0880"], ""),
                record(&["USB\\VID_0483&PID_5740"], "STM32 Virtual ComPort"),
            ],
        };

        let results = scan(&source, &Catalog::builtin()).unwrap();
        let categories: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();
        // Matching devices only, in the order the source produced them
        assert_eq!(
            categories,
            vec!["KMBOX-pattern", "DMA-capable", "Fuzer-pattern"]
        );
    }

    #[test]
    fn test_run_scan_counts_all_devices() {
        let source = StubSource {
            records: vec![
                record(&["VID_046D&PID_C52B"], "Logitech USB Receiver"),
                record(&["USB\\VID_1A2C&PID_2124"], ""),
                record(&[], ""),
            ],
        };

        let report = run_scan(&source, &Catalog::builtin());
        assert!(!report.enumeration_failed);
        assert_eq!(report.devices_scanned, 3);
        assert_eq!(report.results.len(), 1);
    }

    #[test]
    fn test_run_scan_enumeration_failure() {
        let report = run_scan(&FailingSource, &Catalog::builtin());
        assert!(report.enumeration_failed);
        assert!(report.results.is_empty());
        assert_eq!(report.devices_scanned, 0);
    }

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();
        assert_eq!(config.buses, vec![BusType::Usb, BusType::Pci]);
        assert_eq!(config.sysfs_root, PathBuf::from("/sys"));
    }

    #[test]
    fn test_bus_type_display() {
        assert_eq!(format!("{}", BusType::Usb), "usb");
        assert_eq!(format!("{}", BusType::Pci), "pci");
    }
}
