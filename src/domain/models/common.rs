// src/domain/models/common.rs
// Shared identifier aliases and constants used across the domain models.

// Key types mirror the external store's paths. All are opaque strings:
// the phone key in particular is never validated for format, only for
// non-emptiness (see registry_service).
pub type PhoneKey = String; // Account key ("accounts/{phone}")
pub type DeviceId = String; // Router / device key ("users/{deviceId}")
pub type EmployeeId = String; // Key within an account's employees mapping
pub type LogId = String; // Key within a device's activity mapping

/// Timestamp strings as stored: `YYYY-MM-DD HH:MM:SS`.
pub type DateTimeString = String;

/// Metrics a plan can gate. Each maps to one of the plan's `max*` fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanMetric {
    Routers,
    Devices,
    Exports,
    Fetches,
}

/// Display name of the canonical trial plan ("trial" in Arabic), as written
/// by the device-registration flow.
pub const TRIAL_PLAN_NAME: &str = "تجريبي";

/// Plan type tag for trial plans.
pub const TRIAL_PLAN_TYPE: &str = "trial";

/// Sentinel end date for trial plans created without an explicit override.
pub const TRIAL_PLAN_END_DATE: &str = "2030-12-31";
