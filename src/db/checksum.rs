//! Checksum calculation for schedule snapshot deduplication.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use super::models::SlotRecord;

/// SHA-256 of arbitrary string content, hex-encoded.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checksum of a day map.
///
/// `BTreeMap` iteration order is fixed, so the serialized form is canonical
/// and equal schedules always hash identically.
pub fn day_map_checksum(days: &BTreeMap<NaiveDate, Vec<SlotRecord>>) -> String {
    let serialized = serde_json::to_string(days).unwrap_or_default();
    calculate_checksum(&serialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SlotStatus;

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"test": "data"}"#;
        assert_eq!(calculate_checksum(content), calculate_checksum(content));
    }

    #[test]
    fn test_different_content_different_checksum() {
        assert_ne!(calculate_checksum("a"), calculate_checksum("b"));
    }

    #[test]
    fn test_day_map_checksum_tracks_status_changes() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let mut days = BTreeMap::new();
        days.insert(
            date,
            vec![SlotRecord {
                time: "9:00 AM".to_string(),
                status: SlotStatus::Available,
            }],
        );
        let open = day_map_checksum(&days);

        days.get_mut(&date).unwrap()[0].status = SlotStatus::Booked;
        let booked = day_map_checksum(&days);

        assert_ne!(open, booked);
    }

    #[test]
    fn test_empty_day_map_checksum_is_stable() {
        let empty = BTreeMap::new();
        assert_eq!(day_map_checksum(&empty), day_map_checksum(&empty));
    }
}
