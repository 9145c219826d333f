//! Home screen session.
//!
//! The simulator owns every piece of per-screen state: the wallet and its recent
//! transactions, the payment and funding forms, the schedule dialog, the
//! virtual account countdown and the support chat. User actions are applied one
//! at a time; the only background work is the account countdown and chat
//! replies, both of which are cancelled when the simulator is dropped.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::account::{AccountTimer, VirtualAccount};
use crate::config::Config;
use crate::form::{CardFundingForm, PaymentForm, PaymentMethod, PaymentRequest};
use crate::generator::generate_transaction;
use crate::history::seed_recent;
use crate::model::{Action, TransactionRecord};
use crate::notice::{Clipboard, LogNotifier, Notice, NotificationFeed, Notifier};
use crate::schedule::{IntervalUnit, Schedule, ScheduleConfig, ScheduleError};
use crate::support::SupportChat;

mod state;
pub use state::{RefreshGuard, Wallet};

mod error;
pub use error::SimError;

/// Upper bound of the random balance delta applied on refresh, in kobo.
const REFRESH_DELTA_KOBO: i64 = 100_000;

type ScheduleListener = Box<dyn FnMut(&ScheduleConfig) + Send>;

/// One home screen instance.
pub struct Simulator<P = LogNotifier> {
    config: Config,
    rng: StdRng,
    wallet: Wallet,
    form: PaymentForm,
    funding: CardFundingForm,
    schedule: Schedule,
    on_schedule: Option<ScheduleListener>,
    account: AccountTimer,
    chat: SupportChat,
    feed: NotificationFeed,
    platform: P,
}

/// Public API
impl<P: Notifier + Clipboard> Simulator<P> {
    /// Seeded from `config.seed`, or from OS entropy without one.
    pub fn new(config: Config, platform: P) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng, platform)
    }

    pub fn with_rng(config: Config, rng: StdRng, platform: P) -> Self {
        let wallet = Wallet::new(&config, seed_recent(Utc::now()));
        let chat = SupportChat::new(config.reply_delay);
        Self {
            config,
            rng,
            wallet,
            form: PaymentForm::default(),
            funding: CardFundingForm::default(),
            schedule: Schedule::new(),
            on_schedule: None,
            account: AccountTimer::new(),
            chat,
            feed: NotificationFeed::seeded(),
            platform,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn chat(&self) -> &SupportChat {
        &self.chat
    }

    pub fn feed_mut(&mut self) -> &mut NotificationFeed {
        &mut self.feed
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Called with the committed config whenever a schedule is confirmed.
    pub fn on_schedule(&mut self, listener: impl FnMut(&ScheduleConfig) + Send + 'static) {
        self.on_schedule = Some(Box::new(listener));
    }

    /// Update the lamp field. Returns the mock address once the number is complete.
    pub fn set_lamp(&mut self, input: &str) -> Option<&'static str> {
        self.form.lamp.set(input);
        self.form.lamp.address()
    }

    pub fn set_amount(&mut self, input: &str) {
        self.form.amount = input.trim().to_string();
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        self.form.method = method;
    }

    pub fn payment_form_mut(&mut self) -> &mut PaymentForm {
        &mut self.form
    }

    pub fn funding_form_mut(&mut self) -> &mut CardFundingForm {
        &mut self.funding
    }

    /// Press "Continue" on the payment form.
    pub fn submit_payment(&mut self) -> Result<PaymentRequest, SimError> {
        let request = self.form.validate().inspect_err(|e| {
            self.platform.alert(Notice::new("Error", e.to_string()));
        })?;

        let notice = if self.schedule.is_scheduled() {
            Notice::new("Scheduled Successfully", "You can cancel anytime")
        } else {
            Notice::new(
                "Success",
                format!(
                    "Payment of {} sent to Lamp {}",
                    request.amount, request.lamp
                ),
            )
        };
        self.platform.alert(notice);
        Ok(request)
    }

    /// Top up the wallet by card. The form is cleared on success.
    pub fn fund_with_card(&mut self) -> Result<String, SimError> {
        let amount = self.funding.validate().inspect_err(|e| {
            self.platform.alert(Notice::new("Error", e.to_string()));
        })?;
        self.platform.alert(Notice::new(
            "Success",
            format!("₦{amount} added to your wallet successfully!"),
        ));
        self.funding.reset();
        Ok(amount)
    }

    pub fn open_schedule(&mut self) -> Result<(), SimError> {
        self.schedule.open(&self.form.amount)?;
        Ok(())
    }

    pub fn select_unit(&mut self, unit: IntervalUnit) -> Result<(), SimError> {
        self.schedule.select_unit(unit)?;
        Ok(())
    }

    pub fn increment_count(&mut self) -> Result<u32, SimError> {
        Ok(self.schedule.increment()?)
    }

    pub fn decrement_count(&mut self) -> Result<u32, SimError> {
        Ok(self.schedule.decrement()?)
    }

    pub fn set_schedule_count(&mut self, count: u32) -> Result<u32, SimError> {
        Ok(self.schedule.set_count(count)?)
    }

    pub fn set_schedule_amount(&mut self, amount: &str) -> Result<(), SimError> {
        self.schedule.set_amount(amount)?;
        Ok(())
    }

    /// Commit the schedule dialog and notify the listener.
    pub fn confirm_schedule(&mut self) -> Result<ScheduleConfig, SimError> {
        let config = self.schedule.confirm().inspect_err(|e| {
            if *e == ScheduleError::MissingAmount {
                self.platform
                    .alert(Notice::new("Error", "Please enter an amount to schedule"));
            }
        })?;
        if let Some(listener) = self.on_schedule.as_mut() {
            listener(&config);
        }
        Ok(config)
    }

    pub fn cancel_schedule_dialog(&mut self) -> Result<(), SimError> {
        self.schedule.cancel_dialog()?;
        Ok(())
    }

    /// Cancel the active schedule; `confirmed` is the answer to the prompt.
    pub fn cancel_schedule(&mut self, confirmed: bool) -> Result<bool, SimError> {
        let cleared = self.schedule.cancel_schedule(confirmed)?;
        if cleared {
            self.platform.alert(Notice::new(
                "Schedule Cancelled",
                "Your scheduled payment has been cancelled",
            ));
        }
        Ok(cleared)
    }

    pub fn schedule_description(&self) -> Option<String> {
        self.schedule.description()
    }

    /// Refresh the home screen: busy for the configured delay, then a new
    /// balance and one generated transaction.
    ///
    /// Dropping the returned future mid-delay clears the busy flag and leaves
    /// the balance and recent list untouched.
    pub async fn refresh(&mut self) -> TransactionRecord {
        {
            let _busy = self.wallet.refresh_guard();
            tokio::time::sleep(self.config.refresh_delay).await;
        }
        self.finish_refresh()
    }

    pub fn begin_refresh(&mut self) {
        self.wallet.begin_refresh();
    }

    pub fn finish_refresh(&mut self) -> TransactionRecord {
        let delta = Amount::from_kobo(self.rng.gen_range(0..REFRESH_DELTA_KOBO));
        let id = self.wallet.take_id();
        let record = generate_transaction(&mut self.rng, id, Utc::now());
        self.wallet.finish_refresh(delta, record.clone());
        info!(
            balance = %self.wallet.balance(),
            tx = %record.id,
            status = %record.status(),
            "wallet refreshed"
        );
        record
    }

    /// Generate a virtual account, replacing any live one.
    pub fn generate_account(&mut self) -> VirtualAccount {
        self.account.generate(&mut self.rng, &self.config)
    }

    pub fn current_account(&self) -> Option<VirtualAccount> {
        self.account.current()
    }

    /// Wait until the live virtual account expires.
    pub async fn account_expired(&mut self) {
        self.account.expired().await;
    }

    /// Copy the live account number. Returns `false` with no live account.
    pub fn copy_account(&mut self) -> bool {
        let Some(account) = self.account.current() else {
            return false;
        };
        self.account.copy_account_number(&mut self.platform);
        self.platform.alert(Notice::new(
            "Copied!",
            format!(
                "Account number copied to clipboard: {}",
                account.account_number
            ),
        ));
        true
    }

    /// Copy a history keycode. Failed payments have none, so nothing happens.
    pub fn copy_keycode(&mut self, record: &TransactionRecord) -> bool {
        let Some(code) = record.keycode() else {
            return false;
        };
        let code = code.to_string();
        self.platform.copy(&code);
        self.platform.alert(Notice::new(
            "Copied!",
            format!("Keycode copied to clipboard: {code}"),
        ));
        true
    }

    pub fn send_chat(&mut self, text: &str) -> bool {
        self.chat.send(text)
    }

    /// Collect support replies that have arrived.
    pub fn poll_chat(&mut self) -> usize {
        self.chat.drain_replies()
    }

    /// Header bell: show the unread count.
    pub fn show_notifications(&mut self) {
        let notice = self.feed.summary();
        self.platform.alert(notice);
    }

    /// Run the simulator over the given action stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Action> + Unpin) {
        while let Some(action) = stream.next().await {
            // a failed action is reported and skipped, never fatal
            let _ = self.apply(action).await;
        }
        self.poll_chat();
    }

    /// Apply a single scripted action
    pub async fn apply(&mut self, action: Action) -> Result<(), SimError> {
        let name = action.name();
        let result = match action {
            Action::Pay { lamp, amount } => {
                self.set_lamp(&lamp);
                self.set_amount(&amount);
                self.submit_payment().map(|_| ())
            }
            Action::Schedule {
                amount,
                unit,
                count,
            } => self.schedule_payment(&amount, unit, count),
            Action::Unschedule => self.cancel_schedule(true).map(|_| ()),
            Action::Refresh => {
                self.refresh().await;
                Ok(())
            }
            Action::GenerateAccount => {
                self.generate_account();
                Ok(())
            }
            Action::CopyAccount => {
                if self.copy_account() {
                    Ok(())
                } else {
                    Err(SimError::NoAccount)
                }
            }
            Action::Chat { text } => {
                self.send_chat(&text);
                Ok(())
            }
        };
        Self::log_result(name, &result);
        result
    }
}

/// Private API
impl<P: Notifier + Clipboard> Simulator<P> {
    fn log_result<E: std::fmt::Display>(action: &str, result: &Result<(), E>) {
        match result {
            Ok(()) => info!(action, "action applied"),
            Err(e) => info!(action, reason = %e, "action skipped"),
        }
    }

    /// Drive the whole schedule dialog. A failed step closes the dialog again.
    fn schedule_payment(
        &mut self,
        amount: &str,
        unit: IntervalUnit,
        count: u32,
    ) -> Result<(), SimError> {
        self.open_schedule()?;
        let result = self.fill_schedule(amount, unit, count);
        if result.is_err() {
            let _ = self.cancel_schedule_dialog();
        }
        result
    }

    fn fill_schedule(
        &mut self,
        amount: &str,
        unit: IntervalUnit,
        count: u32,
    ) -> Result<(), SimError> {
        if !amount.trim().is_empty() {
            self.set_schedule_amount(amount)?;
        }
        self.select_unit(unit)?;
        self.set_schedule_count(count)?;
        self.confirm_schedule()?;
        Ok(())
    }
}
