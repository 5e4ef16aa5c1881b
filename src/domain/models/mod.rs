pub mod account;
pub mod activity;
pub mod common;
pub mod device;
pub mod plan;

// Re-export common types for easier access
pub use account::{Account, Employee};
pub use activity::{LogEntry, MergedLogEntry};
pub use common::*;
pub use device::DeviceRecord;
pub use plan::Plan;
