//! Device record model. One record per enumerated device, carrying the raw
//! identifier strings and description reported by the platform bus.

use serde::Serialize;

/// A single enumerated device.
///
/// Both fields may legitimately be empty: some bus nodes report no usable
/// identifiers at all, and such records simply never match any signature.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeviceRecord {
    /// Platform identifier strings, most specific first.
    pub hardware_ids: Vec<String>,
    /// Human-readable description, empty when the bus offers none.
    pub description: String,
}

impl DeviceRecord {
    pub fn new(hardware_ids: Vec<String>, description: impl Into<String>) -> Self {
        Self {
            hardware_ids,
            description: description.into(),
        }
    }

    /// All hardware IDs joined with `;`, the form used for both signature
    /// matching and display.
    pub fn joined_ids(&self) -> String {
        self.hardware_ids.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_ids() {
        let record = DeviceRecord::new(
            vec![
                "USB\\VID_1A2C&PID_2124&REV_0110".to_string(),
                "USB\\VID_1A2C&PID_2124".to_string(),
            ],
            "USB Composite Device",
        );
        assert_eq!(
            record.joined_ids(),
            "USB\\VID_1A2C&PID_2124&REV_0110;USB\\VID_1A2C&PID_2124"
        );
    }

    #[test]
    fn test_joined_ids_empty() {
        let record = DeviceRecord::default();
        assert_eq!(record.joined_ids(), "");
    }
}
