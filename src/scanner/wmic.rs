use std::process::Command;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::InventoryError;
use crate::model::{InstalledProgram, Platform};

const WMIC_COMMAND: &str = "wmic";

/// Inventory source backed by the Windows Installer database, queried
/// through `wmic product get name,version`.
pub struct WmicInventory;

#[async_trait]
impl super::InventorySource for WmicInventory {
    fn name(&self) -> &'static str {
        "Windows Installer (wmic)"
    }

    fn supported_platforms(&self) -> &[Platform] {
        &[Platform::Windows]
    }

    async fn collect(&self) -> Result<Vec<InstalledProgram>, InventoryError> {
        let output = Command::new(WMIC_COMMAND)
            .args(["product", "get", "name,version"])
            .output()
            .map_err(|source| InventoryError::CommandUnavailable {
                command: WMIC_COMMAND,
                source,
            })?;

        if !output.status.success() {
            return Err(InventoryError::CommandFailed {
                command: WMIC_COMMAND,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let programs = parse_inventory(&stdout);
        debug!("wmic reported {} installed programs", programs.len());
        Ok(programs)
    }
}

/// Column gap in the inventory table: a run of two or more spaces.
static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("valid column-gap regex"));

/// Parses the tabular output of the inventory command.
///
/// The first line is the column header and is discarded. Blank lines are
/// skipped. Each remaining row is split into (name, version) columns;
/// rows without a recognizable column boundary are skipped with a warning
/// rather than aborting the whole collection.
pub(crate) fn parse_inventory(text: &str) -> Vec<InstalledProgram> {
    let mut lines = text.lines();
    // Header row: "Name  Version"
    lines.next();

    let mut programs = Vec::new();
    for line in lines {
        let row = line.trim();
        if row.is_empty() {
            continue;
        }
        match split_columns(row) {
            Some((name, version)) => programs.push(InstalledProgram::new(name, version)),
            None => warn!("skipping malformed inventory row: {row:?}"),
        }
    }
    programs
}

/// Splits a trimmed inventory row at the last run of two-or-more spaces.
///
/// Program names may themselves contain double-space runs; the version
/// column never does, so the last gap is the column boundary.
fn split_columns(row: &str) -> Option<(&str, &str)> {
    let gap = COLUMN_GAP.find_iter(row).last()?;
    Some((&row[..gap.start()], &row[gap.end()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_column_rows_in_order() {
        let text = "Name                Version\n\
                    Acme Tool           1.2.3\n\
                    Widget Factory      10.0.19041.1\n";
        let programs = parse_inventory(text);
        assert_eq!(
            programs,
            vec![
                InstalledProgram::new("Acme Tool", "1.2.3"),
                InstalledProgram::new("Widget Factory", "10.0.19041.1"),
            ]
        );
    }

    #[test]
    fn discards_the_header_row() {
        let text = "Name  Version\nAcme Tool  1.2.3\n";
        let programs = parse_inventory(text);
        assert_eq!(programs, vec![InstalledProgram::new("Acme Tool", "1.2.3")]);
    }

    #[test]
    fn skips_blank_and_whitespace_only_rows() {
        let text = "Name  Version\n\n   \t \nAcme Tool  1.2.3\n\n";
        let programs = parse_inventory(text);
        assert_eq!(programs.len(), 1);
    }

    #[test]
    fn skips_rows_without_a_column_boundary() {
        let text = "Name  Version\nOrphanRowWithoutVersion\nAcme Tool  1.2.3\n";
        let programs = parse_inventory(text);
        assert_eq!(programs, vec![InstalledProgram::new("Acme Tool", "1.2.3")]);
    }

    #[test]
    fn skips_rows_with_only_trailing_padding() {
        // No version value, just column padding.
        let text = "Name  Version\nSomeApp        \n";
        assert!(parse_inventory(text).is_empty());
    }

    #[test]
    fn splits_at_the_last_gap_for_names_with_internal_double_spaces() {
        let text = "Name  Version\nAcme  Tool  1.2.3\n";
        let programs = parse_inventory(text);
        assert_eq!(programs, vec![InstalledProgram::new("Acme  Tool", "1.2.3")]);
    }

    #[test]
    fn handles_carriage_returns_and_trailing_padding() {
        let text = "Name                Version        \r\n\
                    Acme Tool           1.2.3          \r\n";
        let programs = parse_inventory(text);
        assert_eq!(programs, vec![InstalledProgram::new("Acme Tool", "1.2.3")]);
    }

    #[test]
    fn empty_output_yields_no_programs() {
        assert!(parse_inventory("").is_empty());
        assert!(parse_inventory("Name  Version\n").is_empty());
    }
}
