// src/domain/services/plan_service.rs
// Plan Policy: normalizes raw plan-editor form fields into a Plan and
// evaluates capability limits. Checks are advisory; enforcement belongs to
// the caller.

use crate::models::{Plan, PlanMetric};
use std::collections::BTreeMap;

/// Parses raw form fields into a plan.
///
/// Numeric fields are coerced to non-negative integers; anything unparsable
/// defaults to 0. This lenient default is deliberate, carried over from the
/// console's plan editor: an admin's typo zeroes an allowance instead of
/// blocking the save. String fields pass through unchanged, empty allowed.
pub fn normalize(raw: &BTreeMap<String, String>) -> Plan {
    Plan {
        name: string_field(raw, "name"),
        plan_type: string_field(raw, "type"),
        start_date: string_field(raw, "startDate"),
        end_date: string_field(raw, "endDate"),
        max_routers: int_field(raw, "maxRouters"),
        max_devices: int_field(raw, "maxDevices"),
        max_exports: int_field(raw, "maxExports"),
        max_fetches: int_field(raw, "maxFetches"),
        allow_multi_access: flag_field(raw, "allowMultiAccess"),
    }
}

/// Whether `current_count` is within the plan's allowance for `metric`.
/// A count of 0 against a limit of 0 is within limit (no usage yet); any
/// positive count against a limit of 0 is not.
pub fn capability_check(plan: &Plan, metric: PlanMetric, current_count: u32) -> bool {
    current_count <= plan.limit_for(metric)
}

fn string_field(raw: &BTreeMap<String, String>, key: &str) -> String {
    raw.get(key).cloned().unwrap_or_default()
}

fn int_field(raw: &BTreeMap<String, String>, key: &str) -> u32 {
    raw.get(key)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

// Checkbox-style form flags arrive as "on"/"true"/"1"/"yes".
fn flag_field(raw: &BTreeMap<String, String>, key: &str) -> bool {
    matches!(
        raw.get(key).map(|value| value.trim()),
        Some("on" | "true" | "1" | "yes")
    )
}
