#![forbid(unsafe_code)]

//! Replay digests.
//!
//! Two runs of the same script must produce byte-identical transition
//! streams. Digests hash the JSON encoding of each transition, one per line,
//! so any field drift (ids, offsets, reasons) changes the digest.

use tabshift_core::ItemId;
use tabshift_reorder::ReorderTransition;

/// Prefix on every digest string.
pub const DIGEST_PREFIX: &str = "blake3:";

/// Digest of a transition stream.
pub fn transition_digest(transitions: &[ReorderTransition]) -> Result<String, serde_json::Error> {
    let mut hasher = blake3::Hasher::new();
    for transition in transitions {
        serde_json::to_writer(&mut hasher, transition)?;
        hasher.update(b"\n");
    }
    Ok(format_digest(&hasher))
}

/// Digest of an item order.
#[must_use]
pub fn order_digest(ids: &[ItemId]) -> String {
    let mut hasher = blake3::Hasher::new();
    for id in ids {
        hasher.update(&id.get().to_le_bytes());
    }
    format_digest(&hasher)
}

fn format_digest(hasher: &blake3::Hasher) -> String {
    format!("{DIGEST_PREFIX}{}", hasher.finalize().to_hex())
}
