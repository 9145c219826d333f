//! Core domain types for the wallet simulator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::Amount;
use crate::schedule::IntervalUnit;

/// Placeholder shown wherever a keycode is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Transaction identifier.
pub type TxId = String;

/// Token issued on a successful payment, five 3-digit groups `DDD-DDD-DDD-DDD-DDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keycode([u16; 5]);

impl Keycode {
    /// Build a keycode from its groups. Each group prints as three digits, so
    /// it must be at most 999; `11` reads `011`.
    pub fn new(groups: [u16; 5]) -> Option<Self> {
        groups
            .iter()
            .all(|g| *g <= 999)
            .then_some(Keycode(groups))
    }

    pub fn groups(&self) -> [u16; 5] {
        self.0
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "{a:03}-{b:03}-{c:03}-{d:03}-{e:03}")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid keycode '{0}'")]
pub struct KeycodeParseError(String);

impl FromStr for Keycode {
    type Err = KeycodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || KeycodeParseError(s.to_string());
        let mut groups = [0u16; 5];
        let mut parts = s.split('-');
        for group in groups.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            if part.len() != 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            *group = part.parse().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Keycode::new(groups).ok_or_else(err)
    }
}

/// Outcome of a payment. A keycode exists only for successful payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Successful(Keycode),
    Failed,
}

/// Status label without the keycode payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Successful,
    Failed,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Successful => f.write_str("Successful"),
            TxStatus::Failed => f.write_str("Failed"),
        }
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Debit,
    TopUp,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Debit => f.write_str("Debit"),
            TxKind::TopUp => f.write_str("Top-up"),
        }
    }
}

/// A generated or seeded transaction, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TxId,
    pub timestamp: DateTime<Utc>,
    /// Pre-formatted amount, e.g. `₦2,750`.
    pub amount: String,
    pub outcome: Outcome,
    pub kind: TxKind,
}

impl TransactionRecord {
    pub fn status(&self) -> TxStatus {
        match self.outcome {
            Outcome::Successful(_) => TxStatus::Successful,
            Outcome::Failed => TxStatus::Failed,
        }
    }

    pub fn keycode(&self) -> Option<&Keycode> {
        match &self.outcome {
            Outcome::Successful(code) => Some(code),
            Outcome::Failed => None,
        }
    }

    /// Keycode text, or [`NOT_AVAILABLE`] for failed payments.
    pub fn keycode_label(&self) -> String {
        self.keycode()
            .map(Keycode::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// The signed-in wallet holder.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletUser {
    pub name: String,
    pub balance: Amount,
}

impl WalletUser {
    pub fn new(name: impl Into<String>, balance: Amount) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    /// Two-letter avatar initials, e.g. `TA` for `Taiwo Adelaja`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// One line of the support chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub from_user: bool,
    pub timestamp: DateTime<Utc>,
}

/// A scripted user interaction, the input of the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fill the payment form and press continue.
    Pay { lamp: String, amount: String },
    /// Open the schedule dialog, pick unit and count, confirm.
    Schedule {
        amount: String,
        unit: IntervalUnit,
        count: u32,
    },
    /// Cancel the active schedule, accepting the confirmation prompt.
    Unschedule,
    /// Pull to refresh the home screen.
    Refresh,
    /// Generate a virtual account for a bank-transfer top-up.
    GenerateAccount,
    /// Copy the live virtual account number.
    CopyAccount,
    /// Send a message to support.
    Chat { text: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Pay { .. } => "pay",
            Action::Schedule { .. } => "schedule",
            Action::Unschedule => "unschedule",
            Action::Refresh => "refresh",
            Action::GenerateAccount => "account",
            Action::CopyAccount => "copy",
            Action::Chat { .. } => "chat",
        }
    }
}
