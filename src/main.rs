pub mod device;
pub mod report;
pub mod scanner;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use scanner::sysfs::SysfsDeviceSource;
use scanner::{BusType, ScanConfig, run_scan};

#[derive(Parser)]
#[command(name = "dmascan")]
#[command(version)]
#[command(about = "Scan attached devices for signatures of DMA and input-injection peripherals")]
struct Cli {
    /// Skip the consent prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Bus to scan; repeatable, defaults to usb and pci
    #[arg(long, value_enum)]
    bus: Vec<BusType>,

    /// Alternate sysfs root, mainly for inspecting captured device trees
    #[arg(long, default_value = "/sys")]
    sysfs_root: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if !cli.json {
        report::print_banner();
    }

    if !cli.yes && !confirm_scan() {
        println!("Scan aborted. You must agree to proceed.");
        return ExitCode::SUCCESS;
    }

    if !cli.json {
        println!("[!] Starting device scan...");
    }
    log::info!("Starting device scan");

    let buses = if cli.bus.is_empty() {
        ScanConfig::default().buses
    } else {
        cli.bus.clone()
    };
    let source = SysfsDeviceSource::new(ScanConfig {
        buses,
        sysfs_root: cli.sysfs_root.clone(),
    });

    let scan_report = run_scan(&source, &device::DEFAULT_CATALOG);

    if cli.json {
        match report::to_json(&scan_report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize report: {err}");
                return ExitCode::from(2);
            }
        }
    } else {
        report::print_report(&scan_report);
    }

    if scan_report.enumeration_failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

/// Ask for consent on stdin; only an explicit yes starts the scan.
fn confirm_scan() -> bool {
    print!("Do you agree to the system scan? (yes/no): ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
