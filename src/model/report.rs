use chrono::{DateTime, Utc};

use crate::error::LookupError;
use crate::model::InstalledProgram;

/// One vulnerability entry as returned by the CVE database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CveRecord {
    pub id: String,
    pub description: String,
}

/// Outcome of the vulnerability lookup for a single installed program.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The database returned no matches for this program version.
    Clean,
    /// Known CVEs affecting this program version.
    Vulnerable(Vec<CveRecord>),
    /// The lookup failed; the failure is isolated to this item.
    Failed(LookupError),
}

/// Per-program entry in the scan report.
#[derive(Debug)]
pub struct ItemReport {
    pub program: InstalledProgram,
    pub outcome: LookupOutcome,
}

/// Complete results of one scan run.
#[derive(Debug)]
pub struct ScanReport {
    pub scan_time: DateTime<Utc>,
    pub items: Vec<ItemReport>,
}

impl ScanReport {
    pub fn new(items: Vec<ItemReport>) -> Self {
        Self {
            scan_time: Utc::now(),
            items,
        }
    }

    /// Items for which the database reported at least one CVE.
    pub fn vulnerable(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|item| matches!(item.outcome, LookupOutcome::Vulnerable(_)))
    }

    /// Total number of CVEs across all vulnerable items.
    pub fn vulnerability_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match &item.outcome {
                LookupOutcome::Vulnerable(cves) => cves.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn failed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.outcome, LookupOutcome::Failed(_)))
            .count()
    }

    pub fn has_vulnerabilities(&self) -> bool {
        self.vulnerable().next().is_some()
    }
}
