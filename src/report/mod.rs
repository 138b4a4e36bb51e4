//! Presentation of a finished scan: plain console report or JSON.

use crate::scanner::ScanReport;

const RULE: &str = "----------------------------------------";

/// Program banner printed before the consent prompt.
pub fn print_banner() {
    println!(
        "dmascan {} - suspicious peripheral scanner",
        env!("CARGO_PKG_VERSION")
    );
    println!();
}

/// Render the report to the console.
///
/// A failed enumeration is reported in its own words; it must never read
/// like a clean scan that found nothing.
pub fn print_report(report: &ScanReport) {
    println!();
    println!("Scan completed.");

    if report.enumeration_failed {
        println!("Failed to enumerate devices. The scan could not be run.");
        return;
    }

    println!("Found {} suspicious devices:", report.results.len());
    println!("{RULE}");

    for result in &report.results {
        println!("Device: {}", result.device.description);
        println!("Reason: {}", result.reason);
        println!("Hardware IDs: {}", result.device.joined_ids());
        println!("{RULE}");
    }

    if report.results.is_empty() {
        println!("No suspicious devices detected.");
    }
}

/// Machine-readable rendering of the report.
pub fn to_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
