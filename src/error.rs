use std::process::ExitStatus;

use thiserror::Error;

use crate::model::Platform;

/// Failures while collecting the host's installed-program inventory.
///
/// These are fatal to the run: without an inventory there is nothing to
/// check, so the process exits non-zero instead of silently scanning an
/// empty list.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("no supported package inventory command on this platform ({platform})")]
    UnsupportedPlatform { platform: Platform },

    #[error("failed to launch inventory command `{command}`: {source}")]
    CommandUnavailable {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("inventory command `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}

/// Failures while looking up one program in the CVE database.
///
/// Except for the base-URL variants, which surface at startup, these are
/// per-item: the failing program is reported and the scan moves on.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("API base URL `{url}` cannot carry path segments")]
    OpaqueBaseUrl { url: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("CVE API returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed CVE API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
