// src/domain/models/device.rs
use crate::models::common::{DateTimeString, PhoneKey};
use crate::models::plan::Plan;
use serde::{Deserialize, Serialize};

/// A device (router) record, keyed in the store by device id
/// (`users/{deviceId}`). These records are written by the external
/// device-registration process; the domain module only reads them.
///
/// A record whose `phone` does not match any account key is a "visitor":
/// a device that has registered itself but has not yet been reconciled
/// into a billable account.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DeviceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "firstLogin", default, skip_serializing_if = "Option::is_none")]
    pub first_login: Option<DateTimeString>,
    #[serde(rename = "trialPlan", default, skip_serializing_if = "Option::is_none")]
    pub trial_plan: Option<Plan>,
}
