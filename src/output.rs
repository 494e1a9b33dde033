//! Console rendering of per-item outcomes and the end-of-run summary.

use tabled::{settings::Style, Table, Tabled};

use crate::model::{CveRecord, InstalledProgram, LookupOutcome, ScanReport};

#[derive(Tabled)]
struct CveRow {
    #[tabled(rename = "Program")]
    program: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "CVE")]
    cve: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub fn print_no_programs() {
    println!("No installed programs found.");
}

/// Renders the outcome block for one scanned program.
pub fn render_item(program: &InstalledProgram, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Clean => {
            format!("No known vulnerabilities found for {program}.")
        }
        LookupOutcome::Vulnerable(cves) => {
            let mut out = format!("Vulnerabilities found for {program}:");
            for cve in cves {
                out.push_str(&format!(
                    "\n - CVE: {}, Description: {}",
                    cve.id, cve.description
                ));
            }
            out
        }
        LookupOutcome::Failed(err) => {
            format!("Failed to retrieve CVE data for {program}: {err}")
        }
    }
}

pub fn print_item(program: &InstalledProgram, outcome: &LookupOutcome) {
    println!("{}", render_item(program, outcome));
}

/// Prints the end-of-run summary: scan time, a table of found CVEs, and
/// per-outcome counts.
pub fn print_summary(report: &ScanReport) {
    println!();
    println!(
        "Scan completed at: {}",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let rows: Vec<CveRow> = report
        .items
        .iter()
        .flat_map(|item| {
            let cves: &[CveRecord] = match &item.outcome {
                LookupOutcome::Vulnerable(cves) => cves,
                _ => &[],
            };
            cves.iter().map(move |cve| CveRow {
                program: item.program.name.clone(),
                version: item.program.version.clone(),
                cve: cve.id.clone(),
                description: truncate(&cve.description, 60),
            })
        })
        .collect();

    if !rows.is_empty() {
        println!();
        println!("Found {} vulnerabilities:", report.vulnerability_count());
        println!();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
    }

    println!();
    println!("Summary:");
    println!("  Programs checked: {}", report.items.len());
    println!("  Vulnerable: {}", report.vulnerable().count());
    println!("  Lookup failures: {}", report.failed_count());
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::model::CveRecord;

    fn program() -> InstalledProgram {
        InstalledProgram::new("Acme Tool", "1.2.3")
    }

    #[test]
    fn renders_a_clean_item() {
        let rendered = render_item(&program(), &LookupOutcome::Clean);
        assert_eq!(
            rendered,
            "No known vulnerabilities found for Acme Tool 1.2.3."
        );
    }

    #[test]
    fn renders_one_line_per_cve() {
        let outcome = LookupOutcome::Vulnerable(vec![CveRecord {
            id: "CVE-2021-1234".to_string(),
            description: "sample".to_string(),
        }]);
        let rendered = render_item(&program(), &outcome);
        assert_eq!(
            rendered,
            "Vulnerabilities found for Acme Tool 1.2.3:\n - CVE: CVE-2021-1234, Description: sample"
        );
        assert_eq!(rendered.matches("CVE-2021-1234").count(), 1);
    }

    #[test]
    fn renders_a_retrieval_failure() {
        let outcome = LookupOutcome::Failed(LookupError::Status(reqwest::StatusCode::NOT_FOUND));
        let rendered = render_item(&program(), &outcome);
        assert_eq!(
            rendered,
            "Failed to retrieve CVE data for Acme Tool 1.2.3: CVE API returned HTTP 404 Not Found"
        );
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate("short", 60), "short");
    }

    #[test]
    fn truncate_shortens_long_strings_with_an_ellipsis() {
        let long = "x".repeat(80);
        let truncated = truncate(&long, 60);
        assert_eq!(truncated.chars().count(), 60);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        let long = "é".repeat(80);
        let truncated = truncate(&long, 60);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 60);
    }
}
