//! Bin registry
//!
//! Issues external bin identifiers, renders the QR payload that encodes
//! them, and resolves scanned identifiers back to active bins. Built on
//! the entity store specialized to bins.

use crate::store::{EntityStore, MemoryStore};
use crate::types::{Bin, BinInput, BinPatch, RecordId, RewardsError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

/// Registry of physical bins
///
/// Cloneable view over the shared bin collection; clones see the same
/// underlying records.
#[derive(Debug, Clone)]
pub struct BinRegistry {
    bins: Arc<MemoryStore<Bin>>,
}

impl BinRegistry {
    /// Create a registry over the shared bin collection
    pub fn new(bins: Arc<MemoryStore<Bin>>) -> Self {
        BinRegistry { bins }
    }

    /// Register a new bin
    ///
    /// Generates the external identifier, renders its QR payload, marks
    /// the bin active, and persists it. The returned record carries the
    /// generated identifier and payload for the admin client to print.
    pub fn register(&self, input: BinInput) -> Bin {
        let bin_id = generate_bin_id();
        let qr_code = placeholder_qr(&bin_id);
        self.bins
            .insert(Bin::new(bin_id, input.location, input.accepted_types, qr_code))
    }

    /// Resolve an external identifier to its active bin
    ///
    /// This is the read path used during a scan: inactive bins do not
    /// resolve, so a retired bin behaves exactly like an unknown one.
    pub fn resolve(&self, bin_id: &str) -> Option<Bin> {
        self.bins
            .find(|bin| bin.bin_id == bin_id && bin.active)
    }

    /// Fetch a bin by record identity (admin read path, ignores `active`)
    pub fn get(&self, id: &RecordId) -> Option<Bin> {
        self.bins.get(id)
    }

    /// All bins, newest-first (admin listing, includes inactive)
    pub fn list(&self) -> Vec<Bin> {
        self.bins.filter(|_| true)
    }

    /// Apply a partial update; silent no-op when the id is absent
    pub fn update(&self, id: &RecordId, patch: BinPatch) -> Result<Option<Bin>, RewardsError> {
        self.bins.update(id, |bin| {
            bin.merge(patch);
            Ok(())
        })
    }

    /// Remove a bin, reporting whether it was present
    pub fn remove(&self, id: &RecordId) -> bool {
        self.bins.remove(id)
    }
}

/// Generate an external bin identifier
///
/// `BIN-<unix millis>-<5 uppercase alphanumerics>`. Unique in practice but
/// not cryptographically so; a collision would need two registrations in
/// the same millisecond drawing the same suffix.
fn generate_bin_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(char::from)
        .collect();
    format!(
        "BIN-{}-{}",
        Utc::now().timestamp_millis(),
        suffix.to_ascii_uppercase()
    )
}

/// Render the QR payload for a bin identifier
///
/// A small SVG carrying the identifier as text, encoded as a base64 data
/// URI. Stands in for a real QR rasterizer; scanners in this codebase
/// only ever read the identifier back out of the payload.
pub(crate) fn placeholder_qr(bin_id: &str) -> String {
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="240" height="240">
  <rect width="100%" height="100%" fill="#e2e8f0"/>
  <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle"
    font-size="16" font-family="Arial" fill="#0f172a">{bin_id}</text>
</svg>"##
    );
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
