// src/domain/models/account.rs
use crate::models::common::{DateTimeString, DeviceId, EmployeeId};
use crate::models::plan::Plan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A billable customer record, keyed in the store by phone number
/// (`accounts/{phone}`). The phone key itself lives outside the record.
///
/// `routers_id` is the store's presence set: a device id maps to `true` while
/// bound, and detaching removes the key entirely (tombstone), so the map value
/// carries no information beyond membership.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "networkName", default, skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
    #[serde(rename = "publicNetworkId", default, skip_serializing_if = "Option::is_none")]
    pub public_network_id: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "isPremium", default)]
    pub is_premium: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: DateTimeString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(rename = "routersID", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub routers_id: BTreeMap<DeviceId, bool>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub employees: BTreeMap<EmployeeId, Employee>,
}

impl Account {
    /// Whether a device id is currently bound to this account.
    pub fn has_router(&self, device_id: &str) -> bool {
        self.routers_id.contains_key(device_id)
    }

    /// Number of currently bound devices, for capability checks.
    pub fn router_count(&self) -> u32 {
        self.routers_id.len() as u32
    }
}

/// An employee embedded in its parent account. Employees have no independent
/// lifecycle; they are created and removed through account mutations.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Employee {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: EmployeeId,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub permissions: BTreeMap<String, bool>,
}
