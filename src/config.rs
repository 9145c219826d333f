//! Startup configuration, built once and never mutated afterwards.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::Amount;

/// Environment variable holding an optional RNG seed.
pub const SEED_VAR: &str = "SUNPAY_SEED";

/// Shared colour table used by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub primary_dark: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub naira: &'static str,
    pub tab_bar: &'static str,
}

pub const PALETTE: Palette = Palette {
    primary: "#FFD700",
    primary_dark: "#FFC400",
    secondary: "#FFA000",
    background: "#FFFFFF",
    text: "#333333",
    text_secondary: "#666666",
    border: "#E0E0E0",
    success: "#4CAF50",
    error: "#F44336",
    naira: "#1A4F1A",
    tab_bar: "#1a1a1a",
};

/// Simulator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub user_name: String,
    /// Balance before any refresh; refreshes add a random delta on top of it.
    pub opening_balance: Amount,
    pub bank_label: String,
    pub holder_label: String,
    /// Lifetime of a generated virtual account, in seconds.
    pub account_ttl: u32,
    pub refresh_delay: Duration,
    pub reply_delay: Duration,
    /// Number of recent transactions kept on the home screen.
    pub recent_capacity: usize,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: "Taiwo Adelaja".to_string(),
            opening_balance: Amount::from_kobo(1_400_398),
            bank_label: "Sunpay NG".to_string(),
            holder_label: "Go Sunpay".to_string(),
            account_ttl: 3600,
            refresh_delay: Duration::from_millis(1500),
            reply_delay: Duration::from_secs(2),
            recent_capacity: 5,
            seed: None,
        }
    }
}

impl Config {
    /// Defaults, with the seed taken from `SUNPAY_SEED` when it parses.
    pub fn from_env() -> Self {
        let seed = match env::var(SEED_VAR) {
            Ok(raw) => match raw.trim().parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!(value = %raw, "ignoring unparsable {SEED_VAR}");
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
