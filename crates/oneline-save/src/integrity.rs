//! Tamper evidence for the save record.

use sha2::{Digest, Sha256};

use crate::record::SaveRecord;

/// Digest the record into its integrity hash: SHA-256 over the canonical
/// compact JSON of the record with `integrity_hash` blanked, rendered as
/// lowercase hex.
///
/// Pure and order-stable -- struct fields serialize in declaration order,
/// so two records that differ only in their stored hash always digest to
/// the same value, and any change to a persisted field changes it.
pub fn compute_hash(record: &SaveRecord) -> Result<String, serde_json::Error> {
    let mut unsigned = record.clone();
    unsigned.integrity_hash = String::new();
    let canonical = serde_json::to_string(&unsigned)?;

    let digest = Sha256::digest(canonical.as_bytes());
    let mut hash = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hash.push_str(&format!("{byte:02x}"));
    }
    Ok(hash)
}
