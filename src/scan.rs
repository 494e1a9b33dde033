//! Scan orchestration: collect the inventory once, then look up each
//! program in order.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::checker::VulnerabilityLookup;
use crate::config::IgnoreConfig;
use crate::error::InventoryError;
use crate::model::{ItemReport, LookupOutcome, Platform, ScanReport};
use crate::output;
use crate::scanner::InventorySource;

/// Runs the full scan: collects the installed-program inventory, queries
/// the CVE database for each program strictly one at a time in collection
/// order, prints each outcome as it is determined, and returns the report.
///
/// An empty inventory prints `No installed programs found.` and performs
/// zero lookups. Per-item lookup failures are reported and skipped; only
/// inventory collection failures abort the run.
pub async fn run_scan(
    inventory: &dyn InventorySource,
    lookup: &dyn VulnerabilityLookup,
    ignore: &IgnoreConfig,
    interactive: bool,
) -> Result<ScanReport, InventoryError> {
    if !inventory.is_supported() {
        return Err(InventoryError::UnsupportedPlatform {
            platform: Platform::current(),
        });
    }

    info!("collecting installed programs via {}", inventory.name());
    let collect_progress = if interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Collecting installed programs...");
        Some(pb)
    } else {
        None
    };

    let collected = inventory.collect().await;

    if let Some(pb) = collect_progress {
        match &collected {
            Ok(programs) => pb.finish_with_message(format!(
                "Found {} installed programs",
                programs.len()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    let mut programs = collected?;
    programs.retain(|program| {
        if ignore.should_ignore_program(&program.name) {
            debug!("ignoring {program} per config");
            false
        } else {
            true
        }
    });

    if programs.is_empty() {
        output::print_no_programs();
        return Ok(ScanReport::new(Vec::new()));
    }

    let lookup_progress = if interactive {
        let pb = ProgressBar::new(programs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut items = Vec::with_capacity(programs.len());
    for program in programs {
        if let Some(ref pb) = lookup_progress {
            pb.set_message(format!("Checking {program}..."));
        }

        let outcome = match lookup.lookup(&program).await {
            Ok(cves) => {
                let cves: Vec<_> = cves
                    .into_iter()
                    .filter(|cve| !ignore.should_ignore_cve(&cve.id))
                    .collect();
                if cves.is_empty() {
                    LookupOutcome::Clean
                } else {
                    LookupOutcome::Vulnerable(cves)
                }
            }
            Err(err) => {
                warn!("lookup failed for {program}: {err}");
                LookupOutcome::Failed(err)
            }
        };

        match lookup_progress {
            Some(ref pb) => {
                pb.suspend(|| output::print_item(&program, &outcome));
                pb.inc(1);
            }
            None => output::print_item(&program, &outcome),
        }

        items.push(ItemReport { program, outcome });
    }

    if let Some(pb) = lookup_progress {
        pb.finish_with_message(format!("Checked {} programs", items.len()));
    }

    Ok(ScanReport::new(items))
}
