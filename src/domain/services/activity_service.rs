// src/domain/services/activity_service.rs
// Activity Aggregator: flattens per-device log streams into one time-ordered,
// capped view. Pure function of the snapshot; no state between calls.

use crate::{
    models::MergedLogEntry,
    snapshot::ActivitySnapshot,
};

/// Flattens per-device logs, annotates each entry with its source device id,
/// sorts descending by effective timestamp, and truncates to the most recent
/// `cap` entries.
///
/// The sort is stable: entries sharing a timestamp keep their flattening
/// order (device id, then log id), and entries missing both timestamp fields
/// sort as oldest and equal to each other. The store's `YYYY-MM-DD HH:MM:SS`
/// timestamps order correctly under plain string comparison.
pub fn merge(logs: &ActivitySnapshot, cap: usize) -> Vec<MergedLogEntry> {
    let mut merged: Vec<MergedLogEntry> = logs
        .iter()
        .flat_map(|(device_id, entries)| {
            entries.values().map(move |entry| MergedLogEntry {
                device_id: device_id.clone(),
                entry: entry.clone(),
            })
        })
        .collect();

    merged.sort_by(|a, b| {
        b.entry
            .effective_timestamp()
            .cmp(&a.entry.effective_timestamp())
    });
    merged.truncate(cap);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogEntry;
    use std::collections::BTreeMap;

    fn entry(timestamp: Option<&str>, time: Option<&str>, action: &str) -> LogEntry {
        LogEntry {
            timestamp: timestamp.map(str::to_string),
            time: time.map(str::to_string),
            action: Some(action.to_string()),
            ..LogEntry::default()
        }
    }

    fn snapshot(devices: &[(&str, &[(&str, LogEntry)])]) -> ActivitySnapshot {
        devices
            .iter()
            .map(|(device_id, entries)| {
                (
                    device_id.to_string(),
                    entries
                        .iter()
                        .map(|(log_id, e)| (log_id.to_string(), e.clone()))
                        .collect::<BTreeMap<_, _>>(),
                )
            })
            .collect()
    }

    #[test]
    fn ties_keep_input_order_and_newest_comes_first() {
        // A at t=10, then B and C sharing t=20; B flattens before C.
        let logs = snapshot(&[(
            "dev1",
            &[
                ("l1", entry(Some("10"), None, "A")),
                ("l2", entry(Some("20"), None, "B")),
                ("l3", entry(Some("20"), None, "C")),
            ],
        )]);
        let merged = merge(&logs, 50);
        let actions: Vec<_> = merged
            .iter()
            .map(|m| m.entry.effective_action().unwrap())
            .collect();
        assert_eq!(actions, vec!["B", "C", "A"]);
    }

    #[test]
    fn time_field_backs_up_a_missing_timestamp() {
        let logs = snapshot(&[(
            "dev1",
            &[
                ("l1", entry(None, Some("2024-01-03 00:00:00"), "late")),
                ("l2", entry(Some("2024-01-01 00:00:00"), None, "early")),
            ],
        )]);
        let merged = merge(&logs, 50);
        assert_eq!(merged[0].entry.effective_action(), Some("late"));
        assert_eq!(merged[1].entry.effective_action(), Some("early"));
    }

    #[test]
    fn entries_without_any_timestamp_sort_oldest() {
        let logs = snapshot(&[(
            "dev1",
            &[
                ("l1", entry(None, None, "undated-1")),
                ("l2", entry(Some("2024-01-01 00:00:00"), None, "dated")),
                ("l3", entry(None, None, "undated-2")),
            ],
        )]);
        let merged = merge(&logs, 50);
        let actions: Vec<_> = merged
            .iter()
            .map(|m| m.entry.effective_action().unwrap())
            .collect();
        // Undated entries tie as oldest and keep their flattening order.
        assert_eq!(actions, vec!["dated", "undated-1", "undated-2"]);
    }

    #[test]
    fn entries_are_annotated_with_their_device() {
        let logs = snapshot(&[
            ("dev1", &[("l1", entry(Some("2024-01-02 00:00:00"), None, "x"))]),
            ("dev2", &[("l1", entry(Some("2024-01-01 00:00:00"), None, "y"))]),
        ]);
        let merged = merge(&logs, 50);
        assert_eq!(merged[0].device_id, "dev1");
        assert_eq!(merged[1].device_id, "dev2");
    }

    #[test]
    fn cap_keeps_only_the_most_recent_entries() {
        let logs = snapshot(&[(
            "dev1",
            &[
                ("l1", entry(Some("2024-01-01 00:00:00"), None, "oldest")),
                ("l2", entry(Some("2024-01-02 00:00:00"), None, "mid")),
                ("l3", entry(Some("2024-01-03 00:00:00"), None, "newest")),
            ],
        )]);
        let merged = merge(&logs, 2);
        let actions: Vec<_> = merged
            .iter()
            .map(|m| m.entry.effective_action().unwrap())
            .collect();
        assert_eq!(actions, vec!["newest", "mid"]);
    }

    #[test]
    fn merge_is_idempotent_under_reapplication() {
        let logs = snapshot(&[
            (
                "dev1",
                &[
                    ("l1", entry(Some("2024-01-02 10:00:00"), None, "a")),
                    ("l2", entry(Some("2024-01-02 10:00:00"), None, "b")),
                ],
            ),
            ("dev2", &[("l1", entry(None, None, "c"))]),
        ]);
        assert_eq!(merge(&logs, 50), merge(&logs, 50));
    }
}
