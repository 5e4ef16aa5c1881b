// src/domain/snapshot/mod.rs
// Point-in-time views of the external store, as passed into the domain
// functions. The module never reads the store itself; the host application
// obtains a consistent snapshot, calls in, and applies the returned
// mutations as a single update.

pub mod mutation;

use crate::models::{Account, DeviceRecord, DeviceId, LogEntry, LogId, PhoneKey};
use std::collections::BTreeMap;

/// All accounts, keyed by phone (`accounts/*`).
pub type AccountsSnapshot = BTreeMap<PhoneKey, Account>;

/// All registered devices, keyed by device id (`users/*`).
pub type DevicesSnapshot = BTreeMap<DeviceId, DeviceRecord>;

/// Per-device activity logs (`activities/{deviceId}/{logId}`).
pub type ActivitySnapshot = BTreeMap<DeviceId, BTreeMap<LogId, LogEntry>>;

pub use mutation::{apply, Mutation, StorePath};
