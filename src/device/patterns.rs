//! Signature tables for suspicious peripherals. Defines category name and
//! reason constants plus the built-in pattern lists matched against device
//! hardware IDs and descriptions.

// Category identifiers (stable, also shown in reports)
pub(crate) const CATEGORY_KMBOX: &str = "KMBOX-pattern";
pub(crate) const CATEGORY_FUZER: &str = "Fuzer-pattern";
pub(crate) const CATEGORY_DMA: &str = "DMA-capable";

// Human-facing reason per category
pub(crate) const REASON_KMBOX: &str = "KMBox pattern detected";
pub(crate) const REASON_FUZER: &str = "Fuzer pattern detected";
pub(crate) const REASON_DMA: &str = "DMA-capable device detected";

/// KMBox-family mouse/keyboard injection boxes.
pub(crate) const KMBOX_PATTERNS: &[&str] = &[
    "VID_1A2C&PID_2124",
    "VID_1A2C&PID_21",
    "VID_1A86&PID_E026", // CH-series serial bridge used by the network variants
    "KMBOX",
    "KEYBOARD_MOUSE_BOX",
];

/// Fuzer-style flashable HID boards (STM32 based).
pub(crate) const FUZER_PATTERNS: &[&str] = &[
    "VID_0483&PID_5750",
    "VID_0483&PID_5740",
    "FUZER",
    "STM32",
    "DFU_INTERFACE",
];

/// Generic DMA-capable bus/class signatures. Broader than the named device
/// categories above, so it must stay last in catalog order.
pub(crate) const DMA_PATTERNS: &[&str] = &[
    "PCI\\CC_0800",
    "PCI\\CC_0880", // "other system peripheral", the usual FPGA DMA card class
    "THUNDERBOLT",
    "PCIEXPRESS",
    "FPGA",
    "ACCELE",
    "SYSTEM_PERIPHERAL",
];
