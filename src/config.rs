//! Configuration file handling.
//!
//! Loading and saving of cvescan configuration from a TOML file.
//!
//! # Configuration Location
//!
//! - Linux: `~/.config/cvescan/config.toml`
//! - macOS: `~/Library/Application Support/cvescan/config.toml`
//! - Windows: `%APPDATA%\cvescan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! api_base_url = "https://cve.circl.lu"
//! timeout_secs = 10
//! fail_on_vuln = false
//!
//! [ignore]
//! programs = ["Microsoft *"]
//! cves = ["CVE-2021-12345"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::checker::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

/// Application configuration.
///
/// All fields have defaults, so a missing config file is not an error and
/// a partial file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the CVE API.
    pub api_base_url: String,

    /// Per-request timeout for CVE lookups, in seconds.
    pub timeout_secs: u64,

    /// Whether to exit non-zero when any vulnerability is found.
    pub fail_on_vuln: bool,

    /// Ignore list for suppressing known issues.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Configuration for ignoring specific programs or CVE ids.
///
/// Use this to suppress known false positives or accepted risks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Program names to exclude from scanning.
    ///
    /// Supports glob patterns (e.g., "Microsoft *", "*Runtime*").
    pub programs: Vec<String>,

    /// CVE ids to suppress from results (e.g., "CVE-2021-12345").
    pub cves: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a program should be skipped entirely.
    pub fn should_ignore_program(&self, name: &str) -> bool {
        self.programs.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, name)
            } else {
                pattern == name
            }
        })
    }

    /// Check if a CVE id should be suppressed from results.
    pub fn should_ignore_cve(&self, cve_id: &str) -> bool {
        self.cves.iter().any(|id| id == cve_id)
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    // Check prefix (before first *)
    if !parts[0].is_empty() {
        if !remaining.starts_with(parts[0]) {
            return false;
        }
        remaining = &remaining[parts[0].len()..];
    }

    // Check suffix (after last *)
    let last_part = parts[parts.len() - 1];
    if !last_part.is_empty() {
        if !remaining.ends_with(last_part) {
            return false;
        }
        remaining = &remaining[..remaining.len() - last_part.len()];
    }

    // Check middle parts
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        if let Some(pos) = remaining.find(part) {
            remaining = &remaining[pos + part.len()..];
        } else {
            return false;
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fail_on_vuln: false,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cvescan")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
