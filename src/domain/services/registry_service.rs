// src/domain/services/registry_service.rs
// Canonical account records: lookup, field-level upsert, activation toggle,
// and the listings the console renders. All functions operate on the caller's
// snapshot and return the mutation to persist; nothing is applied here.

use crate::{
    error::DomainError,
    models::{Account, PhoneKey, Plan},
    snapshot::{AccountsSnapshot, Mutation, StorePath},
};
use serde_json::{Map, Value};

/// Partial account fields for `upsert`. Only populated fields are written;
/// everything else on the stored record is preserved by the store's merge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub network_name: Option<String>,
    pub public_network_id: Option<String>,
    pub is_active: Option<bool>,
    pub is_premium: Option<bool>,
    pub plan: Option<Plan>,
}

impl AccountPatch {
    fn apply_to(&self, account: &mut Account) {
        if let Some(name) = &self.name {
            account.name = Some(name.clone());
        }
        if let Some(network_name) = &self.network_name {
            account.network_name = Some(network_name.clone());
        }
        if let Some(public_network_id) = &self.public_network_id {
            account.public_network_id = Some(public_network_id.clone());
        }
        if let Some(is_active) = self.is_active {
            account.is_active = is_active;
        }
        if let Some(is_premium) = self.is_premium {
            account.is_premium = is_premium;
        }
        if let Some(plan) = &self.plan {
            // Field-level overwrite: a supplied plan replaces the whole
            // embedded plan object, never merges into it.
            account.plan = Some(plan.clone());
        }
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(name) = &self.name {
            fields.insert("name".into(), Value::String(name.clone()));
        }
        if let Some(network_name) = &self.network_name {
            fields.insert("networkName".into(), Value::String(network_name.clone()));
        }
        if let Some(public_network_id) = &self.public_network_id {
            fields.insert(
                "publicNetworkId".into(),
                Value::String(public_network_id.clone()),
            );
        }
        if let Some(is_active) = self.is_active {
            fields.insert("isActive".into(), Value::Bool(is_active));
        }
        if let Some(is_premium) = self.is_premium {
            fields.insert("isPremium".into(), Value::Bool(is_premium));
        }
        if let Some(plan) = &self.plan {
            let value = serde_json::to_value(plan).expect("plan serializes to JSON");
            fields.insert("plan".into(), value);
        }
        fields
    }
}

/// Looks up an account by phone key.
pub fn get<'a>(accounts: &'a AccountsSnapshot, phone: &str) -> Option<&'a Account> {
    accounts.get(phone)
}

/// Merges partial fields into an existing or newly created account.
///
/// Returns the merged record as it will read after the mutation is applied,
/// plus the field-level merge to persist at `accounts/{phone}`.
///
/// # Errors
///
/// Returns `DomainError::InvalidKey` for an empty phone key.
pub fn upsert(
    accounts: &AccountsSnapshot,
    phone: &str,
    patch: &AccountPatch,
) -> Result<(Account, Mutation), DomainError> {
    if phone.is_empty() {
        return Err(DomainError::InvalidKey(phone.to_string()));
    }

    let mut account = accounts.get(phone).cloned().unwrap_or_default();
    patch.apply_to(&mut account);

    tracing::debug!(phone, "upserting account fields");
    let mutation = Mutation::Merge {
        path: StorePath::account(phone),
        fields: patch.to_fields(),
    };
    Ok((account, mutation))
}

/// Sets the account's active flag. A missing account is not an error: the
/// merge simply creates the path, matching the store's update semantics and
/// the never-block-an-admin-action policy.
pub fn set_active(
    accounts: &AccountsSnapshot,
    phone: &str,
    is_active: bool,
) -> Result<(Account, Mutation), DomainError> {
    upsert(
        accounts,
        phone,
        &AccountPatch {
            is_active: Some(is_active),
            ..AccountPatch::default()
        },
    )
}

/// All accounts in key order. Callers needing a different order sort the
/// result themselves.
pub fn list_all(accounts: &AccountsSnapshot) -> Vec<(&PhoneKey, &Account)> {
    accounts.iter().collect()
}

/// Accounts whose phone key or display name contains the needle. An empty
/// needle keeps everything, like the console's filter box.
pub fn list_filtered<'a>(
    accounts: &'a AccountsSnapshot,
    needle: &str,
) -> Vec<(&'a PhoneKey, &'a Account)> {
    accounts
        .iter()
        .filter(|(phone, account)| {
            needle.is_empty()
                || phone.contains(needle)
                || account
                    .name
                    .as_deref()
                    .is_some_and(|name| name.contains(needle))
        })
        .collect()
}
