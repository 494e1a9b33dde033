use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::LookupError;
use crate::model::{CveRecord, InstalledProgram};

/// Base URL of the public CIRCL CVE API.
pub const DEFAULT_API_BASE: &str = "https://cve.circl.lu";

/// Per-request timeout applied to every lookup.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("cvescan/", env!("CARGO_PKG_VERSION"));

/// Vulnerability lookup backed by the CIRCL CVE database.
///
/// Queries `GET {base}/api/cvefor/{name}/{version}` for each program, with
/// name and version percent-encoded as path segments.
#[derive(Debug)]
pub struct CirclLookup {
    client: Client,
    base_url: Url,
}

impl CirclLookup {
    /// Creates a lookup against `base_url` with the given per-request
    /// timeout. Timeout expiry surfaces as a per-item request failure.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::OpaqueBaseUrl {
                url: base_url.to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, program: &InstalledProgram) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL is validated on construction")
            .pop_if_empty()
            .extend([
                "api",
                "cvefor",
                program.name.as_str(),
                program.version.as_str(),
            ]);
        url
    }
}

#[async_trait]
impl super::VulnerabilityLookup for CirclLookup {
    fn name(&self) -> &'static str {
        "CIRCL CVE database"
    }

    async fn lookup(&self, program: &InstalledProgram) -> Result<Vec<CveRecord>, LookupError> {
        let url = self.endpoint(program);
        debug!("querying {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

#[derive(Deserialize)]
struct CirclResponse {
    results: Vec<CirclEntry>,
}

#[derive(Deserialize)]
struct CirclEntry {
    id: String,
    description: String,
}

/// Validates a response body against the declared schema and converts it
/// to model records. Missing `results`, `id`, or `description` fields are
/// a malformed response, not a crash.
fn parse_response(body: &str) -> Result<Vec<CveRecord>, LookupError> {
    let parsed: CirclResponse = serde_json::from_str(body)?;
    Ok(parsed
        .results
        .into_iter()
        .map(|entry| CveRecord {
            id: entry.id,
            description: entry.description,
        })
        .collect())
}
