// src/domain/models/plan.rs
use crate::models::common::{DateTimeString, PlanMetric};
use serde::{Deserialize, Serialize};

/// Subscription terms embedded in an account. Field names track the store's
/// wire shape, so a deserialized account round-trips unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub plan_type: String,
    #[serde(rename = "startDate", default)]
    pub start_date: DateTimeString,
    #[serde(rename = "endDate", default)]
    pub end_date: DateTimeString,
    #[serde(rename = "maxRouters", default)]
    pub max_routers: u32,
    #[serde(rename = "maxDevices", default)]
    pub max_devices: u32,
    #[serde(rename = "maxExports", default)]
    pub max_exports: u32,
    #[serde(rename = "maxFetches", default)]
    pub max_fetches: u32,
    #[serde(rename = "allowMultiAccess", default)]
    pub allow_multi_access: bool,
}

impl Plan {
    /// The allowance for a given metric.
    pub fn limit_for(&self, metric: PlanMetric) -> u32 {
        match metric {
            PlanMetric::Routers => self.max_routers,
            PlanMetric::Devices => self.max_devices,
            PlanMetric::Exports => self.max_exports,
            PlanMetric::Fetches => self.max_fetches,
        }
    }
}
