//! Snapshot encoding: self-describing JSON or compact bincode.

use super::snapshot::Snapshot;
use crate::core::SaveFormat;
use crate::error::PersistenceError;

/// Encode a snapshot in the given format.
pub fn encode(snapshot: &Snapshot, format: SaveFormat) -> Result<Vec<u8>, PersistenceError> {
    let bytes = match format {
        SaveFormat::Json => serde_json::to_vec_pretty(snapshot)?,
        SaveFormat::Binary => bincode::serialize(snapshot)?,
    };
    Ok(bytes)
}

/// Decode a snapshot previously written by [`encode`] with the same format.
pub fn decode(bytes: &[u8], format: SaveFormat) -> Result<Snapshot, PersistenceError> {
    if bytes.is_empty() {
        return Err(PersistenceError::corrupt("empty save"));
    }
    let snapshot = match format {
        SaveFormat::Json => serde_json::from_slice(bytes)?,
        SaveFormat::Binary => bincode::deserialize(bytes)?,
    };
    Ok(snapshot)
}
