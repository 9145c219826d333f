//! Virtual accounts for wallet top-ups and their expiry countdown.

use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::config::Config;
use crate::generator::generate_account_number;
use crate::notice::Clipboard;
use crate::time::format_countdown;

/// Upper bound on an account's lifetime, in seconds.
pub const MAX_TTL: u32 = 3600;

const TICK: Duration = Duration::from_secs(1);

/// A temporary bank-transfer destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualAccount {
    pub account_number: String,
    pub bank_label: String,
    pub holder_label: String,
    remaining_seconds: u32,
}

impl VirtualAccount {
    /// `ttl` is clamped to `1..=MAX_TTL`.
    pub fn new(
        account_number: impl Into<String>,
        bank_label: impl Into<String>,
        holder_label: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            bank_label: bank_label.into(),
            holder_label: holder_label.into(),
            remaining_seconds: ttl.clamp(1, MAX_TTL),
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Remaining time as `M:SS`.
    pub fn countdown(&self) -> String {
        format_countdown(self.remaining_seconds)
    }

    /// Count one second down. Returns `false` once the account has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds > 0
    }
}

/// Owns at most one live virtual account and the task counting it down.
///
/// The account is published through a watch channel; the countdown task is the
/// only writer. Generating a new account or dropping the timer aborts the task.
#[derive(Debug, Default)]
pub struct AccountTimer {
    current: Option<watch::Receiver<Option<VirtualAccount>>>,
    task: Option<JoinHandle<()>>,
}

impl AccountTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a new account and start its countdown, replacing any previous one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &Config) -> VirtualAccount {
        self.cancel();

        let account = VirtualAccount::new(
            generate_account_number(rng),
            config.bank_label.as_str(),
            config.holder_label.as_str(),
            config.account_ttl,
        );
        info!(
            account = %account.account_number,
            ttl = account.remaining_seconds(),
            "virtual account generated"
        );

        let (tx, rx) = watch::channel(Some(account.clone()));
        self.task = Some(tokio::spawn(count_down(tx)));
        self.current = Some(rx);
        account
    }

    /// Snapshot of the live account, if any.
    pub fn current(&self) -> Option<VirtualAccount> {
        self.current.as_ref().and_then(|rx| rx.borrow().clone())
    }

    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|rx| rx.borrow().is_some())
    }

    /// Resolve once the live account has expired or been cancelled.
    pub async fn expired(&mut self) {
        if let Some(rx) = self.current.as_mut() {
            // an aborted task drops the sender, which also ends the wait
            let _ = rx.wait_for(Option::is_none).await;
        }
    }

    /// Copy the live account number. Without a live account this does nothing
    /// and returns `false`.
    pub fn copy_account_number(&self, clipboard: &mut impl Clipboard) -> bool {
        match self.current() {
            Some(account) => {
                clipboard.copy(&account.account_number);
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn subscribe(&self) -> Option<watch::Receiver<Option<VirtualAccount>>> {
        self.current.clone()
    }

    /// Stop the countdown and forget the account.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.current = None;
    }
}

impl Drop for AccountTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn count_down(tx: watch::Sender<Option<VirtualAccount>>) {
    let mut ticker = interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        ticker.tick().await;

        let mut alive = false;
        tx.send_modify(|slot| {
            if let Some(account) = slot {
                alive = account.tick();
                if !alive {
                    *slot = None;
                }
            }
        });

        if !alive {
            debug!("virtual account expired");
            break;
        }
        if tx.is_closed() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Recorder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokio::time::sleep;

    fn account() -> VirtualAccount {
        VirtualAccount::new("1234567890", "Sunpay NG", "Go Sunpay", MAX_TTL)
    }

    #[test]
    fn ttl_is_clamped() {
        let long = VirtualAccount::new("1", "b", "h", 10_000);
        assert_eq!(long.remaining_seconds(), MAX_TTL);
        let zero = VirtualAccount::new("1", "b", "h", 0);
        assert_eq!(zero.remaining_seconds(), 1);
    }

    #[test]
    fn still_present_after_3599_ticks() {
        let mut account = account();
        for _ in 0..3599 {
            assert!(account.tick());
        }
        assert_eq!(account.remaining_seconds(), 1);
        assert_eq!(account.countdown(), "0:01");
    }

    #[test]
    fn expires_on_tick_3600() {
        let mut account = account();
        let alive = (0..3600).map(|_| account.tick()).collect::<Vec<_>>();
        assert!(alive[..3599].iter().all(|a| *a));
        assert!(!alive[3599]);
        assert_eq!(account.remaining_seconds(), 0);
    }

    #[test]
    fn copy_without_account_is_noop() {
        let timer = AccountTimer::new();
        let mut clipboard = Recorder::default();
        assert!(!timer.copy_account_number(&mut clipboard));
        assert!(clipboard.copied.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_clears_account_at_zero() {
        let mut timer = AccountTimer::new();
        let mut rng = StdRng::seed_from_u64(1);
        let account = timer.generate(&mut rng, &Config::default());
        assert_eq!(account.remaining_seconds(), 3600);
        assert_eq!(account.bank_label, "Sunpay NG");

        sleep(Duration::from_millis(3_599_500)).await;
        let live = timer.current().unwrap();
        assert_eq!(live.remaining_seconds(), 1);
        assert_eq!(live.account_number, account.account_number);

        sleep(Duration::from_secs(1)).await;
        assert!(timer.current().is_none());
        assert!(!timer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_resolves_at_zero() {
        let config = Config {
            account_ttl: 5,
            ..Config::default()
        };
        let mut timer = AccountTimer::new();
        timer.generate(&mut StdRng::seed_from_u64(2), &config);

        let started = Instant::now();
        timer.expired().await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_secs(6));
        assert!(timer.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn regenerate_restarts_countdown() {
        let mut timer = AccountTimer::new();
        let mut rng = StdRng::seed_from_u64(3);
        let config = Config::default();

        let first = timer.generate(&mut rng, &config);
        sleep(Duration::from_millis(10_500)).await;
        assert_eq!(timer.current().unwrap().remaining_seconds(), 3590);

        let second = timer.generate(&mut rng, &config);
        assert_ne!(first.account_number, second.account_number);
        sleep(Duration::from_millis(1_500)).await;
        let live = timer.current().unwrap();
        assert_eq!(live.account_number, second.account_number);
        assert_eq!(live.remaining_seconds(), 3599);
    }

    #[tokio::test(start_paused = true)]
    async fn copy_uses_live_account_number() {
        let mut timer = AccountTimer::new();
        let account = timer.generate(&mut StdRng::seed_from_u64(4), &Config::default());
        let mut clipboard = Recorder::default();
        assert!(timer.copy_account_number(&mut clipboard));
        assert_eq!(clipboard.copied, vec![account.account_number]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_timer_stops_countdown() {
        let mut timer = AccountTimer::new();
        timer.generate(&mut StdRng::seed_from_u64(6), &Config::default());
        sleep(Duration::from_millis(2_500)).await;

        let mut rx = timer.subscribe().unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().remaining_seconds(), 3598);
        drop(timer);

        sleep(Duration::from_secs(10)).await;
        // the aborted task dropped its sender without another tick
        assert!(rx.has_changed().is_err());
        assert_eq!(rx.borrow().as_ref().unwrap().remaining_seconds(), 3598);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_forgets_account() {
        let mut timer = AccountTimer::new();
        timer.generate(&mut StdRng::seed_from_u64(5), &Config::default());
        assert!(timer.is_active());
        timer.cancel();
        assert!(!timer.is_active());
        timer.expired().await;
    }
}
