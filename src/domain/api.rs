// src/domain/api.rs
// The exported interface the presentation layer calls. Replaces the old
// console's habit of hanging handlers off the global namespace: every view
// action is an ordinary function here, and every mutating action passes the
// admin gate and request validation first.

use crate::{
    error::DomainError,
    models::{Account, DeviceId, DeviceRecord, Employee, EmployeeId, MergedLogEntry, PhoneKey, Plan},
    services::{
        activity_service,
        binding_service::{self, BindRequest, BindingResolution, RouterRemoval},
        plan_service,
        registry_service,
    },
    snapshot::{AccountsSnapshot, ActivitySnapshot, DevicesSnapshot, Mutation, StorePath},
    stats::{self, AccountStats},
    utils::guards::{check_admin, AdminAuthority},
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use validator::Validate;

/// Parameters for attaching a device to an account, typically filled from the
/// account-detail or visitor views.
#[derive(Clone, Debug, Validate)]
pub struct AttachRouterRequest {
    #[validate(length(min = 1))]
    pub device_id: DeviceId,
    /// Interactive target-phone override; defaults to the device record's
    /// own phone.
    pub phone: Option<PhoneKey>,
    /// Confirmation that attaching to an already-existing account is
    /// intended.
    pub confirm_existing: bool,
    /// Trial end date override for the creation path.
    pub trial_end_date: Option<String>,
}

/// Parameters for the plan editor's end-date-only edit.
#[derive(Clone, Debug, Validate)]
pub struct PlanEndDateRequest {
    #[validate(length(min = 1))]
    pub end_date: String,
}

fn validate_request<T: Validate>(request: &T) -> Result<(), DomainError> {
    request
        .validate()
        .map_err(|err| DomainError::InvalidInput(err.to_string()))
}

// --- Read projections (no mutations, no gate) ---

/// Accounts for the list view, optionally filtered by the search box.
pub fn list_accounts<'a>(
    accounts: &'a AccountsSnapshot,
    filter: &str,
) -> Vec<(&'a PhoneKey, &'a Account)> {
    registry_service::list_filtered(accounts, filter)
}

/// A single account for the detail view.
pub fn account_detail<'a>(accounts: &'a AccountsSnapshot, phone: &str) -> Option<&'a Account> {
    registry_service::get(accounts, phone)
}

/// Dashboard header counts.
pub fn dashboard_stats(accounts: &AccountsSnapshot) -> AccountStats {
    stats::summarize(accounts)
}

/// The activity view: all device logs merged newest-first, capped.
pub fn recent_activity(logs: &ActivitySnapshot, cap: usize) -> Vec<MergedLogEntry> {
    activity_service::merge(logs, cap)
}

/// Employees of an account, in key order.
pub fn list_employees(account: &Account) -> Vec<(&EmployeeId, &Employee)> {
    account.employees.iter().collect()
}

/// Devices not yet reconciled into any account, for the visitors view.
pub fn list_visitor_devices<'a>(
    accounts: &AccountsSnapshot,
    devices: &'a DevicesSnapshot,
) -> Vec<(&'a DeviceId, &'a DeviceRecord)> {
    devices
        .iter()
        .filter(|(_, device)| binding_service::is_visitor(accounts, device))
        .collect()
}

// --- Mutating actions (admin gate + validation) ---

/// Attaches a device to an account, creating the account when the phone is
/// unclaimed. A device id with no record in the snapshot is treated as a
/// bare manual entry, matching the console's "add router by id" action.
pub fn attach_router(
    auth: &impl AdminAuthority,
    accounts: &AccountsSnapshot,
    devices: &DevicesSnapshot,
    request: &AttachRouterRequest,
    now: DateTime<Utc>,
) -> Result<BindingResolution, DomainError> {
    check_admin(auth)?;
    validate_request(request)?;

    let device = devices
        .get(&request.device_id)
        .cloned()
        .unwrap_or_default();
    let bind = BindRequest {
        phone_override: request.phone.as_deref(),
        confirm_existing: request.confirm_existing,
        now,
        trial_end_date: request.trial_end_date.as_deref(),
    };
    binding_service::bind_device(accounts, &request.device_id, &device, &bind)
}

/// Detaches a device from an account. Unknown accounts and unbound ids are
/// no-ops.
pub fn detach_router(
    auth: &impl AdminAuthority,
    accounts: &AccountsSnapshot,
    phone: &str,
    device_id: &str,
) -> Result<RouterRemoval, DomainError> {
    check_admin(auth)?;
    Ok(binding_service::remove_router(accounts, phone, device_id))
}

/// Toggles the account's active flag.
pub fn set_account_active(
    auth: &impl AdminAuthority,
    accounts: &AccountsSnapshot,
    phone: &str,
    is_active: bool,
) -> Result<(Account, Mutation), DomainError> {
    check_admin(auth)?;
    registry_service::set_active(accounts, phone, is_active)
}

/// Merges partial account fields.
pub fn update_account(
    auth: &impl AdminAuthority,
    accounts: &AccountsSnapshot,
    phone: &str,
    patch: &registry_service::AccountPatch,
) -> Result<(Account, Mutation), DomainError> {
    check_admin(auth)?;
    registry_service::upsert(accounts, phone, patch)
}

/// Saves the plan editor's form: the normalized plan replaces the whole
/// embedded plan object at `accounts/{phone}/plan`.
pub fn update_plan(
    auth: &impl AdminAuthority,
    phone: &str,
    form: &BTreeMap<String, String>,
) -> Result<(Plan, Mutation), DomainError> {
    check_admin(auth)?;
    if phone.is_empty() {
        return Err(DomainError::InvalidKey(phone.to_string()));
    }

    let plan = plan_service::normalize(form);
    let value = serde_json::to_value(&plan).expect("plan serializes to JSON");
    let mutation = Mutation::Replace {
        path: StorePath::account_plan(phone),
        value,
    };
    Ok((plan, mutation))
}

/// The original plan editor's quick edit: updates only `endDate`, leaving the
/// rest of the plan untouched.
pub fn update_plan_end_date(
    auth: &impl AdminAuthority,
    phone: &str,
    request: &PlanEndDateRequest,
) -> Result<Mutation, DomainError> {
    check_admin(auth)?;
    validate_request(request)?;
    if phone.is_empty() {
        return Err(DomainError::InvalidKey(phone.to_string()));
    }

    let mut fields = Map::new();
    fields.insert("endDate".into(), Value::String(request.end_date.clone()));
    Ok(Mutation::Merge {
        path: StorePath::account_plan(phone),
        fields,
    })
}
