pub mod checker;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod scan;
pub mod scanner;

pub use checker::VulnerabilityLookup;
pub use config::Config;
pub use error::{InventoryError, LookupError};
pub use model::{CveRecord, InstalledProgram, ItemReport, LookupOutcome, Platform, ScanReport};
pub use scan::run_scan;
pub use scanner::InventorySource;
