//! Linux device source backed by sysfs. Walks the USB and PCI bus device
//! directories, reads per-device attributes, and synthesizes hardware-ID
//! strings in the canonical `VID_`/`PID_` and `VEN_`/`DEV_`/`CC_` forms the
//! signature catalog is written against.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::device::DeviceRecord;

use super::{BusType, DeviceSource, EnumerationError, ScanConfig};

/// Enumerates attached devices from a sysfs tree.
pub struct SysfsDeviceSource {
    config: ScanConfig,
}

impl SysfsDeviceSource {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    fn bus_dir(&self, bus: BusType) -> PathBuf {
        let subdir = match bus {
            BusType::Usb => "bus/usb/devices",
            BusType::Pci => "bus/pci/devices",
        };
        self.config.sysfs_root.join(subdir)
    }

    /// Collect device nodes for one bus, name-sorted so the session order is
    /// stable across runs.
    fn list_bus(&self, bus: BusType) -> io::Result<Vec<(BusType, PathBuf)>> {
        let dir = self.bus_dir(bus);
        let mut nodes = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            // USB interface nodes (1-2:1.0) repeat their parent device;
            // the device node carries the identifiers
            if bus == BusType::Usb && name.contains(':') {
                continue;
            }
            nodes.push((name, entry.path()));
        }

        nodes.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(nodes.into_iter().map(|(_, path)| (bus, path)).collect())
    }
}

impl DeviceSource for SysfsDeviceSource {
    fn open(&self) -> Result<Box<dyn Iterator<Item = DeviceRecord> + '_>, EnumerationError> {
        let mut nodes = Vec::new();
        let mut available_buses = 0;
        let mut last_error: Option<io::Error> = None;

        for &bus in &self.config.buses {
            match self.list_bus(bus) {
                Ok(bus_nodes) => {
                    available_buses += 1;
                    log::debug!("Found {} {} device nodes", bus_nodes.len(), bus);
                    nodes.extend(bus_nodes);
                }
                Err(err) => {
                    log::warn!(
                        "{} bus unavailable under {}: {}",
                        bus,
                        self.bus_dir(bus).display(),
                        err
                    );
                    last_error = Some(err);
                }
            }
        }

        // A host missing one bus (common in containers) still scans; a host
        // exposing none of the requested buses cannot
        if available_buses == 0 {
            return Err(EnumerationError::Unavailable {
                path: self.config.sysfs_root.clone(),
                source: last_error.unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "no device bus requested")
                }),
            });
        }

        Ok(Box::new(
            nodes.into_iter().map(|(bus, path)| read_record(bus, &path)),
        ))
    }
}

fn read_record(bus: BusType, path: &Path) -> DeviceRecord {
    match bus {
        BusType::Usb => read_usb_record(path),
        BusType::Pci => read_pci_record(path),
    }
}

/// Read one sysfs attribute, trimmed. Unreadable or blank attributes collapse
/// to `None`; the record layer renders that as an empty string rather than
/// failing the scan.
fn read_attr(dir: &Path, name: &str) -> Option<String> {
    let raw = fs::read_to_string(dir.join(name)).ok()?;
    let value = raw.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Read a hex attribute such as `0x1a2c`, stripped of its prefix and
/// uppercased to the hardware-ID convention.
fn read_hex_attr(dir: &Path, name: &str) -> Option<String> {
    read_attr(dir, name).map(|v| v.trim_start_matches("0x").to_uppercase())
}

fn read_usb_record(path: &Path) -> DeviceRecord {
    let vendor = read_hex_attr(path, "idVendor");
    let product_id = read_hex_attr(path, "idProduct");
    let revision = read_hex_attr(path, "bcdDevice");

    let mut hardware_ids = Vec::new();
    if let (Some(vid), Some(pid)) = (vendor, product_id) {
        if let Some(rev) = revision {
            hardware_ids.push(format!("USB\\VID_{vid}&PID_{pid}&REV_{rev}"));
        }
        hardware_ids.push(format!("USB\\VID_{vid}&PID_{pid}"));
    }

    let description = match (read_attr(path, "manufacturer"), read_attr(path, "product")) {
        (Some(manufacturer), Some(product)) => format!("{manufacturer} {product}"),
        (None, Some(product)) => product,
        (Some(manufacturer), None) => manufacturer,
        (None, None) => String::new(),
    };

    DeviceRecord::new(hardware_ids, description)
}

fn read_pci_record(path: &Path) -> DeviceRecord {
    let vendor = read_hex_attr(path, "vendor");
    let device = read_hex_attr(path, "device");
    let revision = read_hex_attr(path, "revision");
    let class = read_hex_attr(path, "class");

    let mut hardware_ids = Vec::new();
    if let (Some(ven), Some(dev)) = (vendor, device) {
        if let Some(rev) = &revision {
            hardware_ids.push(format!("PCI\\VEN_{ven}&DEV_{dev}&REV_{rev}"));
        }
        hardware_ids.push(format!("PCI\\VEN_{ven}&DEV_{dev}"));
    }
    if let Some(class) = &class {
        // 24-bit class code: base class, sub-class, programming interface
        if class.len() >= 6 {
            hardware_ids.push(format!("PCI\\CC_{}", &class[..6]));
        }
        if class.len() >= 4 {
            hardware_ids.push(format!("PCI\\CC_{}", &class[..4]));
        }
    }

    // sysfs has no product string for PCI functions; a coarse class label is
    // the best available description
    let description = class.as_deref().map(pci_class_label).unwrap_or_default();

    DeviceRecord::new(hardware_ids, description)
}

/// Coarse human-readable label from the PCI base class.
fn pci_class_label(class: &str) -> &'static str {
    match class.get(..2) {
        Some("00") => "Unclassified device",
        Some("01") => "Mass storage controller",
        Some("02") => "Network controller",
        Some("03") => "Display controller",
        Some("04") => "Multimedia controller",
        Some("05") => "Memory controller",
        Some("06") => "Bridge",
        Some("07") => "Communication controller",
        Some("08") => "System peripheral",
        Some("09") => "Input device controller",
        Some("0C") => "Serial bus controller",
        Some("0D") => "Wireless controller",
        Some("12") => "Processing accelerator",
        _ => "PCI device",
    }
}
