//! Installed-software inventory collection.
//!
//! This module provides the [`InventorySource`] trait and the provider that
//! queries the host's package inventory command. The trait is the seam for
//! substituting a fake inventory in tests.
//!
//! # Example
//!
//! ```no_run
//! use cvescan::scanner::{default_inventory, InventorySource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let inventory = default_inventory();
//!     if inventory.is_supported() {
//!         let programs = inventory.collect().await?;
//!         println!("Found {} programs", programs.len());
//!     }
//!     Ok(())
//! }
//! ```

pub(crate) mod wmic;

pub use wmic::WmicInventory;

use async_trait::async_trait;

use crate::error::InventoryError;
use crate::model::{InstalledProgram, Platform};

/// Trait for collecting the installed-program inventory from the host.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Returns the human-readable name of this inventory source.
    fn name(&self) -> &'static str;

    /// Returns the platforms this source can run on.
    fn supported_platforms(&self) -> &[Platform];

    /// Returns true if this source is supported on the current platform.
    fn is_supported(&self) -> bool {
        self.supported_platforms().contains(&Platform::current())
    }

    /// Queries the host package inventory and returns the installed
    /// programs in the order the inventory command listed them.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory command cannot be launched or
    /// exits with a failure status. An unavailable inventory is fatal to
    /// the scan, never a silent empty list.
    async fn collect(&self) -> Result<Vec<InstalledProgram>, InventoryError>;
}

/// Returns the inventory source for the host package manager.
pub fn default_inventory() -> Box<dyn InventorySource> {
    Box::new(WmicInventory)
}
