//! Bin types
//!
//! A bin is a physical receptacle with a globally unique external
//! identifier (the string encoded in its QR payload), a location, and the
//! set of material types it accepts.

use crate::types::{Record, RecordId, RecyclableType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional geographic position of a bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where a bin physically stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinLocation {
    /// Short display name, e.g. "Central Park, Delhi"
    pub name: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

/// A registered recycling bin
///
/// `bin_id` is the external identifier printed on the bin and encoded in
/// its QR payload; it is distinct from the store-assigned record identity
/// and unique across all bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Store-assigned record identity
    pub id: RecordId,
    /// External identifier, unique across all bins
    pub bin_id: String,
    pub location: BinLocation,
    /// Material types this bin accepts, in registration order
    pub accepted_types: Vec<RecyclableType>,
    /// Encoded QR payload (SVG data URI) carrying `bin_id`
    pub qr_code: String,
    /// Inactive bins never resolve on the scan path
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bin {
    /// Build an unsaved bin; identity and timestamps are placeholders
    /// until the store persists the record. New bins start active.
    pub fn new(
        bin_id: String,
        location: BinLocation,
        accepted_types: Vec<RecyclableType>,
        qr_code: String,
    ) -> Self {
        Bin {
            id: RecordId::nil(),
            bin_id,
            location,
            accepted_types,
            qr_code,
            active: true,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    /// Pure membership test: does this bin accept the given material?
    pub fn accepts(&self, material: RecyclableType) -> bool {
        self.accepted_types.contains(&material)
    }

    /// Merge a partial update into this bin
    ///
    /// The external identifier and QR payload are fixed at registration
    /// and cannot be patched.
    pub fn merge(&mut self, patch: BinPatch) {
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(accepted_types) = patch.accepted_types {
            self.accepted_types = accepted_types;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
    }
}

impl Record for Bin {
    fn id(&self) -> RecordId {
        self.id
    }

    fn assign(&mut self, id: RecordId, now: DateTime<Utc>) {
        self.id = id;
        self.created_at = now;
        self.updated_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Admin input for registering a bin
///
/// The external identifier and QR payload are generated by the registry,
/// never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinInput {
    pub location: BinLocation,
    pub accepted_types: Vec<RecyclableType>,
}

/// Partial update for a bin; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinPatch {
    pub location: Option<BinLocation>,
    pub accepted_types: Option<Vec<RecyclableType>>,
    pub active: Option<bool>,
}
