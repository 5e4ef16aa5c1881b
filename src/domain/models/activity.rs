// src/domain/models/activity.rs
use crate::models::common::{DateTimeString, DeviceId};
use serde::{Deserialize, Serialize};

/// A single activity log entry as ingested by the logging pipeline
/// (`activities/{deviceId}/{logId}`). Entries are append-only and read-only
/// here.
///
/// Historical writers disagreed on field names, so both spellings of the
/// timestamp and the action are accepted; `timestamp` and `action` win when
/// both are present.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTimeString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTimeString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LogEntry {
    /// The timestamp used for ordering: `timestamp` preferred, `time` as
    /// fallback. Entries with neither sort as oldest.
    pub fn effective_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref().or(self.time.as_deref())
    }

    /// The action label shown in the activity view: `action` preferred,
    /// `type` as fallback.
    pub fn effective_action(&self) -> Option<&str> {
        self.action.as_deref().or(self.kind.as_deref())
    }
}

/// A log entry annotated with the device it came from, as produced by the
/// activity aggregator's flattening pass.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MergedLogEntry {
    #[serde(rename = "deviceId")]
    pub device_id: DeviceId,
    #[serde(flatten)]
    pub entry: LogEntry,
}
