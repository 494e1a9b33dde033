//! Core data types for installed programs and scan results.
//!
//! - [`InstalledProgram`] - one (name, version) pair detected on the host
//! - [`Platform`] - operating system platform
//! - [`CveRecord`] - one vulnerability entry from the CVE database
//! - [`LookupOutcome`] / [`ItemReport`] - per-program lookup result
//! - [`ScanReport`] - complete scan results

mod program;
mod report;

pub use program::*;
pub use report::*;
