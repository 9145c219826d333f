//! Seed transactions and history screen summaries.

use chrono::{DateTime, Duration, Utc};

use crate::config::PALETTE;
use crate::model::{Keycode, Outcome, TransactionRecord, TxKind, TxStatus};

/// Totals shown above the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl HistorySummary {
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        records
            .iter()
            .fold(HistorySummary::default(), |mut summary, record| {
                summary.total += 1;
                match record.status() {
                    TxStatus::Successful => summary.successful += 1,
                    TxStatus::Failed => summary.failed += 1,
                }
                summary
            })
    }
}

/// Text colour for a status badge.
pub fn status_color(status: TxStatus) -> &'static str {
    match status {
        TxStatus::Successful => PALETTE.success,
        TxStatus::Failed => PALETTE.error,
    }
}

/// Text colour for a transaction direction.
pub fn kind_color(kind: TxKind) -> &'static str {
    match kind {
        TxKind::Debit => PALETTE.error,
        TxKind::TopUp => PALETTE.success,
    }
}

fn record(
    id: u32,
    now: DateTime<Utc>,
    hours_ago: i64,
    amount: &str,
    keycode: Option<&str>,
    kind: TxKind,
) -> TransactionRecord {
    let outcome = match keycode.and_then(|code| code.parse::<Keycode>().ok()) {
        Some(code) => Outcome::Successful(code),
        None => Outcome::Failed,
    };
    TransactionRecord {
        id: id.to_string(),
        timestamp: now - Duration::hours(hours_ago),
        amount: amount.to_string(),
        outcome,
        kind,
    }
}

/// Home screen transactions before any refresh.
pub fn seed_recent(now: DateTime<Utc>) -> Vec<TransactionRecord> {
    use TxKind::*;
    vec![
        record(1, now, 2, "₦2,750", Some("123-456-789-011-012"), Debit),
        record(2, now, 24, "₦7,000", Some("234-567-890-122-233"), Debit),
        record(3, now, 3, "₦5,000", None, Debit),
        record(4, now, 6, "₦10,000", Some("345-678-901-233-344"), TopUp),
    ]
}

/// Keycode history, newest first, two hours apart.
pub fn seed_history(now: DateTime<Utc>) -> Vec<TransactionRecord> {
    let rows: [(&str, Option<&str>); 10] = [
        ("₦2,000", Some("123-456-789-011-012")),
        ("₦3,500", None),
        ("₦1,200", Some("234-567-890-122-233")),
        ("₦5,000", Some("345-678-901-233-344")),
        ("₦1,800", None),
        ("₦7,000", Some("456-789-012-344-455")),
        ("₦2,750", Some("567-890-123-455-566")),
        ("₦3,100", None),
        ("₦4,600", Some("678-901-234-566-677")),
        ("₦2,300", Some("789-012-345-677-788")),
    ];
    rows.into_iter()
        .zip(1u32..)
        .map(|((amount, keycode), id)| {
            record(id, now, 2 * i64::from(id), amount, keycode, TxKind::Debit)
        })
        .collect()
}
