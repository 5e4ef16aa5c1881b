// src/domain/lib.rs
// Account/plan/device reconciliation rules for the ISP admin console.
// Pure functions over snapshots of the external realtime store: the host
// application reads a snapshot, calls in, and persists the returned
// mutations. No I/O happens here.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod snapshot;
pub mod stats;
pub mod utils;

pub use error::DomainError;
pub use models::{Account, DeviceRecord, Employee, LogEntry, MergedLogEntry, Plan, PlanMetric};
pub use snapshot::{AccountsSnapshot, ActivitySnapshot, DevicesSnapshot, Mutation, StorePath};
pub use stats::AccountStats;
