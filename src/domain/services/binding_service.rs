// src/domain/services/binding_service.rs
// Device Binding Resolver: turns an anonymous device record into an account
// attachment, creating the account when the phone is unclaimed. Decisions are
// made against the caller's snapshot; concurrent admins converge because an
// attach writes only its own `routersID/{deviceId}` key.

use crate::{
    error::DomainError,
    models::{
        common::{TRIAL_PLAN_END_DATE, TRIAL_PLAN_NAME, TRIAL_PLAN_TYPE},
        Account, DeviceRecord, PhoneKey, Plan,
    },
    snapshot::{AccountsSnapshot, Mutation, StorePath},
    utils::time::format_timestamp,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Caller-side parameters of a bind.
#[derive(Clone, Debug)]
pub struct BindRequest<'a> {
    /// Interactive override of the target phone; defaults to the device
    /// record's own `phone` field.
    pub phone_override: Option<&'a str>,
    /// Attaching to an already-existing account changes billing scope, so it
    /// requires explicit confirmation. `false` turns that path into
    /// `AttachmentDeclined`.
    pub confirm_existing: bool,
    /// The instant used for `createdAt` on the creation path.
    pub now: DateTime<Utc>,
    /// End date for the default trial plan; the canonical sentinel when unset.
    pub trial_end_date: Option<&'a str>,
}

/// Outcome of a bind: the account as it will read after the mutations are
/// applied, plus the mutations themselves. An idempotent re-attach yields an
/// empty mutation list.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingResolution {
    pub phone: PhoneKey,
    pub account: Account,
    pub mutations: Vec<Mutation>,
}

/// Outcome of a detach. `mutation` is `None` when the device was not bound,
/// which is a no-op rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct RouterRemoval {
    pub account: Option<Account>,
    pub mutation: Option<Mutation>,
}

/// The canonical trial plan assigned to accounts created from a visitor
/// device that carries no `trialPlan` of its own.
pub fn default_trial_plan(end_date: &str) -> Plan {
    Plan {
        name: TRIAL_PLAN_NAME.to_string(),
        plan_type: TRIAL_PLAN_TYPE.to_string(),
        end_date: end_date.to_string(),
        ..Plan::default()
    }
}

/// Resolves a device record into an account attachment.
///
/// Target phone is the request's override, else the device record's `phone`.
/// An unclaimed phone creates a fresh account (full replace); a claimed phone
/// attaches the device id to the existing account (single-key replace, so
/// concurrent attaches union rather than clobber).
///
/// # Errors
///
/// * `MissingPhone` — no resolvable phone, no silent account creation.
/// * `AttachmentDeclined` — the phone is claimed and the caller did not
///   confirm the attachment.
pub fn bind_device(
    accounts: &AccountsSnapshot,
    device_id: &str,
    device: &DeviceRecord,
    request: &BindRequest<'_>,
) -> Result<BindingResolution, DomainError> {
    let phone = request
        .phone_override
        .or(device.phone.as_deref())
        .unwrap_or("");
    if phone.is_empty() {
        return Err(DomainError::MissingPhone(device_id.to_string()));
    }

    if let Some(existing) = accounts.get(phone) {
        if !request.confirm_existing {
            return Err(DomainError::AttachmentDeclined {
                phone: phone.to_string(),
                device_id: device_id.to_string(),
            });
        }
        if existing.has_router(device_id) {
            // Already bound; re-attaching is a no-op.
            return Ok(BindingResolution {
                phone: phone.to_string(),
                account: existing.clone(),
                mutations: Vec::new(),
            });
        }

        let mut account = existing.clone();
        account.routers_id.insert(device_id.to_string(), true);
        tracing::info!(phone, device_id, "attaching device to existing account");
        return Ok(BindingResolution {
            phone: phone.to_string(),
            account,
            mutations: vec![Mutation::Replace {
                path: StorePath::account_router(phone, device_id),
                value: Value::Bool(true),
            }],
        });
    }

    let plan = device
        .trial_plan
        .clone()
        .unwrap_or_else(|| default_trial_plan(request.trial_end_date.unwrap_or(TRIAL_PLAN_END_DATE)));

    let mut account = Account {
        name: device.name.clone(),
        is_active: true,
        is_premium: false,
        created_at: format_timestamp(request.now),
        plan: Some(plan),
        ..Account::default()
    };
    account.routers_id.insert(device_id.to_string(), true);

    tracing::info!(phone, device_id, "creating account for visitor device");
    let value = serde_json::to_value(&account).expect("account serializes to JSON");
    Ok(BindingResolution {
        phone: phone.to_string(),
        account,
        mutations: vec![Mutation::Replace {
            path: StorePath::account(phone),
            value,
        }],
    })
}

/// Detaches a device from an account's router set. Unknown accounts and
/// unbound device ids are no-ops, never errors.
pub fn remove_router(accounts: &AccountsSnapshot, phone: &str, device_id: &str) -> RouterRemoval {
    let Some(existing) = accounts.get(phone) else {
        return RouterRemoval {
            account: None,
            mutation: None,
        };
    };
    if !existing.has_router(device_id) {
        return RouterRemoval {
            account: Some(existing.clone()),
            mutation: None,
        };
    }

    let mut account = existing.clone();
    account.routers_id.remove(device_id);
    tracing::info!(phone, device_id, "detaching device from account");
    RouterRemoval {
        account: Some(account),
        mutation: Some(Mutation::Remove {
            path: StorePath::account_router(phone, device_id),
        }),
    }
}

/// Whether a device record is still a visitor: its phone is unset or maps to
/// no account key. This is the console's "new user" test.
pub fn is_visitor(accounts: &AccountsSnapshot, device: &DeviceRecord) -> bool {
    match device.phone.as_deref() {
        None | Some("") => true,
        Some(phone) => !accounts.contains_key(phone),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn request(confirm: bool) -> BindRequest<'static> {
        BindRequest {
            phone_override: None,
            confirm_existing: confirm,
            now: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            trial_end_date: None,
        }
    }

    fn visitor(phone: &str) -> DeviceRecord {
        DeviceRecord {
            phone: Some(phone.to_string()),
            name: Some("Visitor".into()),
            ..DeviceRecord::default()
        }
    }

    fn snapshot_with(phone: &str, account: Account) -> AccountsSnapshot {
        let mut accounts = BTreeMap::new();
        accounts.insert(phone.to_string(), account);
        accounts
    }

    #[test]
    fn missing_phone_is_rejected() {
        let accounts = AccountsSnapshot::new();
        let device = DeviceRecord::default();
        let err = bind_device(&accounts, "dev1", &device, &request(true)).unwrap_err();
        assert_eq!(err, DomainError::MissingPhone("dev1".into()));
    }

    #[test]
    fn creation_path_uses_defaults_and_trial_plan() {
        let accounts = AccountsSnapshot::new();
        let resolution = bind_device(&accounts, "dev1", &visitor("0555"), &request(true)).unwrap();

        let account = &resolution.account;
        assert!(account.is_active);
        assert!(!account.is_premium);
        assert_eq!(account.created_at, "2024-01-02 03:04:05");
        assert_eq!(account.name.as_deref(), Some("Visitor"));
        assert_eq!(
            account.routers_id.keys().collect::<Vec<_>>(),
            vec!["dev1"]
        );

        let plan = account.plan.as_ref().unwrap();
        assert_eq!(plan.name, TRIAL_PLAN_NAME);
        assert_eq!(plan.plan_type, "trial");
        assert_eq!(plan.end_date, TRIAL_PLAN_END_DATE);

        assert_eq!(resolution.mutations.len(), 1);
        assert!(matches!(
            &resolution.mutations[0],
            Mutation::Replace { path, .. } if *path == StorePath::account("0555")
        ));
    }

    #[test]
    fn device_trial_plan_wins_over_the_default() {
        let accounts = AccountsSnapshot::new();
        let mut device = visitor("0555");
        device.trial_plan = Some(Plan {
            name: "شهري".into(),
            plan_type: "monthly".into(),
            max_routers: 3,
            ..Plan::default()
        });
        let resolution = bind_device(&accounts, "dev1", &device, &request(true)).unwrap();
        let plan = resolution.account.plan.unwrap();
        assert_eq!(plan.plan_type, "monthly");
        assert_eq!(plan.max_routers, 3);
    }

    #[test]
    fn attach_to_existing_account_requires_confirmation() {
        let accounts = snapshot_with("0555", Account::default());
        let err = bind_device(&accounts, "dev1", &visitor("0555"), &request(false)).unwrap_err();
        assert_eq!(
            err,
            DomainError::AttachmentDeclined {
                phone: "0555".into(),
                device_id: "dev1".into(),
            }
        );
    }

    #[test]
    fn confirmed_attach_writes_only_the_router_key() {
        let mut existing = Account::default();
        existing.routers_id.insert("dev0".into(), true);
        let accounts = snapshot_with("0555", existing);

        let resolution = bind_device(&accounts, "dev1", &visitor("0555"), &request(true)).unwrap();
        assert_eq!(
            resolution.account.routers_id.keys().collect::<Vec<_>>(),
            vec!["dev0", "dev1"]
        );
        assert_eq!(
            resolution.mutations,
            vec![Mutation::Replace {
                path: StorePath::account_router("0555", "dev1"),
                value: Value::Bool(true),
            }]
        );
    }

    #[test]
    fn reattach_is_idempotent() {
        let mut existing = Account::default();
        existing.routers_id.insert("dev1".into(), true);
        let accounts = snapshot_with("0555", existing.clone());

        let resolution = bind_device(&accounts, "dev1", &visitor("0555"), &request(true)).unwrap();
        assert_eq!(resolution.account.routers_id, existing.routers_id);
        assert!(resolution.mutations.is_empty());
    }

    #[test]
    fn phone_override_beats_the_device_record() {
        let accounts = AccountsSnapshot::new();
        let mut req = request(true);
        req.phone_override = Some("0999");
        let resolution = bind_device(&accounts, "dev1", &visitor("0555"), &req).unwrap();
        assert_eq!(resolution.phone, "0999");
    }

    #[test]
    fn remove_router_on_non_member_is_a_noop() {
        let accounts = snapshot_with("0555", Account::default());
        let removal = remove_router(&accounts, "0555", "dev1");
        assert!(removal.mutation.is_none());
        assert!(removal.account.unwrap().routers_id.is_empty());

        let missing = remove_router(&accounts, "0777", "dev1");
        assert!(missing.account.is_none());
        assert!(missing.mutation.is_none());
    }

    #[test]
    fn remove_router_tombstones_the_binding() {
        let mut existing = Account::default();
        existing.routers_id.insert("dev1".into(), true);
        let accounts = snapshot_with("0555", existing);

        let removal = remove_router(&accounts, "0555", "dev1");
        assert!(removal.account.unwrap().routers_id.is_empty());
        assert_eq!(
            removal.mutation,
            Some(Mutation::Remove {
                path: StorePath::account_router("0555", "dev1"),
            })
        );
    }

    #[test]
    fn visitor_detection_checks_the_account_key() {
        let accounts = snapshot_with("0555", Account::default());
        assert!(!is_visitor(&accounts, &visitor("0555")));
        assert!(is_visitor(&accounts, &visitor("0777")));
        assert!(is_visitor(&accounts, &DeviceRecord::default()));
    }
}
