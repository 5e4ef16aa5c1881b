// src/domain/stats.rs
use crate::snapshot::AccountsSnapshot;
use serde::{Deserialize, Serialize};

/// Aggregate counts the dashboard header renders.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountStats {
    pub total: usize,
    pub active: usize,
    pub premium: usize,
}

/// Derives dashboard counts from the account snapshot in a single pass.
/// `active` and `premium` are each bounded by `total`.
pub fn summarize(accounts: &AccountsSnapshot) -> AccountStats {
    accounts
        .values()
        .fold(AccountStats::default(), |mut stats, account| {
            stats.total += 1;
            if account.is_active {
                stats.active += 1;
            }
            if account.is_premium {
                stats.premium += 1;
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    fn account(is_active: bool, is_premium: bool) -> Account {
        Account {
            is_active,
            is_premium,
            ..Account::default()
        }
    }

    #[test]
    fn empty_snapshot_summarizes_to_zeroes() {
        assert_eq!(summarize(&AccountsSnapshot::new()), AccountStats::default());
    }

    #[test]
    fn counts_active_and_premium_independently() {
        let mut accounts = AccountsSnapshot::new();
        accounts.insert("0551".into(), account(true, true));
        accounts.insert("0552".into(), account(true, false));
        accounts.insert("0553".into(), account(false, false));

        let stats = summarize(&accounts);
        assert_eq!(
            stats,
            AccountStats {
                total: 3,
                active: 2,
                premium: 1,
            }
        );
    }

    #[test]
    fn active_and_premium_never_exceed_total() {
        let mut accounts = AccountsSnapshot::new();
        for i in 0..10 {
            accounts.insert(format!("055{i}"), account(i % 2 == 0, i % 3 == 0));
        }
        let stats = summarize(&accounts);
        assert!(stats.active <= stats.total);
        assert!(stats.premium <= stats.total);
    }
}
