//! Vulnerability lookups against the CVE database.
//!
//! The [`VulnerabilityLookup`] trait is the seam for substituting a fake
//! database in tests; [`CirclLookup`] is the real provider backed by the
//! public CIRCL CVE API.

mod circl;

pub use circl::{CirclLookup, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};

use async_trait::async_trait;

use crate::error::LookupError;
use crate::model::{CveRecord, InstalledProgram};

/// Trait for querying known vulnerabilities for installed programs.
#[async_trait]
pub trait VulnerabilityLookup: Send + Sync {
    /// Returns the human-readable name of the backing database.
    fn name(&self) -> &'static str;

    /// Queries known vulnerabilities for a single installed program.
    ///
    /// Performs exactly one outbound request per call. An empty result
    /// means the database knows no vulnerabilities for this version.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout expiry, a
    /// non-success HTTP status, or a response body that does not match
    /// the declared schema. Failures are per-item; the caller reports
    /// them and continues with the next program.
    async fn lookup(&self, program: &InstalledProgram) -> Result<Vec<CveRecord>, LookupError>;
}
