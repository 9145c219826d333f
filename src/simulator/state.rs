use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::Amount;
use crate::config::Config;
use crate::model::{TransactionRecord, TxId, WalletUser};

/// Home screen wallet: the user, their recent transactions and the refresh flag.
#[derive(Debug, Clone)]
pub struct Wallet {
    user: WalletUser,
    opening_balance: Amount,
    recent: VecDeque<TransactionRecord>,
    capacity: usize,
    refreshing: bool,
    next_id: u64,
}

impl Wallet {
    pub fn new(config: &Config, recent: impl IntoIterator<Item = TransactionRecord>) -> Self {
        let capacity = config.recent_capacity.max(1);
        let recent: VecDeque<_> = recent.into_iter().take(capacity).collect();
        // numbering continues after the highest numeric seed id
        let next_id = recent
            .iter()
            .filter_map(|record| record.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            user: WalletUser::new(config.user_name.as_str(), config.opening_balance),
            opening_balance: config.opening_balance,
            recent,
            capacity,
            refreshing: false,
            next_id,
        }
    }

    pub fn user(&self) -> &WalletUser {
        &self.user
    }

    pub fn balance(&self) -> Amount {
        self.user.balance
    }

    /// Most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &TransactionRecord> + '_ {
        self.recent.iter()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
    }

    /// Mark the wallet busy until the returned guard is dropped.
    pub fn refresh_guard(&mut self) -> RefreshGuard<'_> {
        self.begin_refresh();
        RefreshGuard { wallet: self }
    }

    /// Apply a refresh result: the balance becomes the opening balance plus
    /// `delta` and `record` is prepended, evicting the oldest beyond capacity.
    pub fn finish_refresh(&mut self, delta: Amount, record: TransactionRecord) {
        self.user.balance = self.opening_balance + delta;
        self.push(record);
        self.refreshing = false;
    }

    /// Allocate the id of the next generated transaction.
    pub fn take_id(&mut self) -> TxId {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }

    pub fn push(&mut self, record: TransactionRecord) {
        self.recent.push_front(record);
        self.recent.truncate(self.capacity);
    }

    /// Timestamp of the newest transaction, if any.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.recent.front().map(|record| record.timestamp)
    }
}

/// Clears the refresh flag on drop, including when a refresh is abandoned.
#[derive(Debug)]
pub struct RefreshGuard<'a> {
    wallet: &'a mut Wallet,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.wallet.refreshing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::seed_recent;
    use crate::model::{Outcome, TxKind};

    fn generated(id: &str) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            timestamp: Utc::now(),
            amount: "₦1,000".to_string(),
            outcome: Outcome::Failed,
            kind: TxKind::Debit,
        }
    }

    #[test]
    fn wallet_starts_at_opening_balance() {
        let wallet = Wallet::new(&Config::default(), seed_recent(Utc::now()));
        assert_eq!(wallet.balance().to_string(), "₦14,003.98");
        assert_eq!(wallet.user().name, "Taiwo Adelaja");
        assert_eq!(wallet.recent().count(), 4);
        assert!(!wallet.is_refreshing());
    }

    #[test]
    fn push_keeps_newest_within_capacity() {
        let mut wallet = Wallet::new(&Config::default(), seed_recent(Utc::now()));
        wallet.push(generated("a"));
        assert_eq!(wallet.recent().count(), 5);
        wallet.push(generated("b"));

        let ids: Vec<&str> = wallet.recent().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "1", "2", "3"]);
    }

    #[test]
    fn guard_clears_refresh_flag() {
        let mut wallet = Wallet::new(&Config::default(), Vec::new());
        {
            let guard = wallet.refresh_guard();
            assert!(guard.wallet.is_refreshing());
        }
        assert!(!wallet.is_refreshing());
        assert_eq!(wallet.recent().count(), 0);
    }

    #[test]
    fn ids_continue_after_seed() {
        let mut wallet = Wallet::new(&Config::default(), seed_recent(Utc::now()));
        assert_eq!(wallet.take_id(), "5");
        assert_eq!(wallet.take_id(), "6");

        let mut empty = Wallet::new(&Config::default(), Vec::new());
        assert_eq!(empty.take_id(), "1");
    }

    #[test]
    fn refresh_adds_delta_to_opening_balance() {
        let mut wallet = Wallet::new(&Config::default(), Vec::new());
        wallet.begin_refresh();
        assert!(wallet.is_refreshing());
        wallet.finish_refresh(Amount::from_naira(500), generated("x"));
        assert!(!wallet.is_refreshing());
        assert_eq!(wallet.balance().to_string(), "₦14,503.98");

        // a second refresh does not compound
        wallet.finish_refresh(Amount::from_naira(100), generated("y"));
        assert_eq!(wallet.balance().to_string(), "₦14,103.98");
        assert_eq!(wallet.last_activity(), wallet.recent().next().map(|r| r.timestamp));
    }
}
