//! Pseudo-random mock data.
//!
//! Every generator takes the random source as an argument, so callers decide
//! between OS entropy and a seeded `StdRng` for reproducible runs.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::amount::format_naira_whole;
use crate::model::{Keycode, Outcome, TransactionRecord, TxId, TxKind};

/// Probability that a generated payment succeeds.
pub const SUCCESS_RATE: f64 = 0.7;
/// Probability that a generated transaction is a debit rather than a top-up.
pub const DEBIT_RATE: f64 = 0.7;

const MIN_AMOUNT: u64 = 500;
const MAX_AMOUNT: u64 = 2500;

const MIN_ACCOUNT_NUMBER: u64 = 1_000_000_000;
const MAX_ACCOUNT_NUMBER: u64 = 9_999_999_999;

/// Five random 3-digit groups.
pub fn generate_keycode<R: Rng + ?Sized>(rng: &mut R) -> Keycode {
    let mut groups = [0u16; 5];
    for group in groups.iter_mut() {
        *group = rng.gen_range(100..=999);
    }
    Keycode::new(groups).unwrap_or_else(|| unreachable!("groups drawn from 100..=999"))
}

/// A 10-digit account number, uniform over `[1_000_000_000, 9_999_999_999]`.
pub fn generate_account_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(MIN_ACCOUNT_NUMBER..=MAX_ACCOUNT_NUMBER).to_string()
}

/// A transaction stamped `now` with random amount, outcome and kind.
///
/// The caller owns id allocation; see [`Wallet::take_id`](crate::simulator::Wallet::take_id).
pub fn generate_transaction<R: Rng + ?Sized>(
    rng: &mut R,
    id: TxId,
    now: DateTime<Utc>,
) -> TransactionRecord {
    let amount = rng.gen_range(MIN_AMOUNT..MAX_AMOUNT);
    let outcome = if rng.gen_bool(SUCCESS_RATE) {
        Outcome::Successful(generate_keycode(rng))
    } else {
        Outcome::Failed
    };
    let kind = if rng.gen_bool(DEBIT_RATE) {
        TxKind::Debit
    } else {
        TxKind::TopUp
    };

    TransactionRecord {
        id,
        timestamp: now,
        amount: format_naira_whole(amount),
        outcome,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TxStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_keycode_shape(s: &str) -> bool {
        let parts: Vec<&str> = s.split('-').collect();
        parts.len() == 5
            && parts
                .iter()
                .all(|p| p.len() == 3 && p.bytes().all(|b| b.is_ascii_digit()))
    }

    #[test]
    fn keycode_matches_pattern() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(is_keycode_shape(&generate_keycode(&mut rng).to_string()));
        }
    }

    #[test]
    fn account_number_is_ten_digits() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let number = generate_account_number(&mut rng);
            assert_eq!(number.len(), 10);
            assert!(!number.starts_with('0'));
            assert!(number.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn keycode_present_only_on_success() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        for _ in 0..500 {
            let tx = generate_transaction(&mut rng, "g".into(), now);
            match tx.status() {
                TxStatus::Successful => {
                    assert!(is_keycode_shape(&tx.keycode_label()));
                }
                TxStatus::Failed => {
                    assert!(tx.keycode().is_none());
                    assert_eq!(tx.keycode_label(), "N/A");
                }
            }
        }
    }

    #[test]
    fn amount_within_range() {
        let mut rng = StdRng::seed_from_u64(4);
        let now = Utc::now();
        for _ in 0..500 {
            let tx = generate_transaction(&mut rng, "g".into(), now);
            let whole: u64 = tx
                .amount
                .trim_start_matches('₦')
                .replace(',', "")
                .parse()
                .unwrap();
            assert!((MIN_AMOUNT..MAX_AMOUNT).contains(&whole));
        }
    }

    #[test]
    fn outcome_and_kind_are_biased() {
        let mut rng = StdRng::seed_from_u64(5);
        let now = Utc::now();
        let draws = 10_000;
        let (mut successes, mut debits) = (0, 0);
        for _ in 0..draws {
            let tx = generate_transaction(&mut rng, "g".into(), now);
            if tx.status() == TxStatus::Successful {
                successes += 1;
            }
            if tx.kind == TxKind::Debit {
                debits += 1;
            }
        }
        // 0.7 +/- a wide margin
        assert!((6_500..7_500).contains(&successes), "successes = {successes}");
        assert!((6_500..7_500).contains(&debits), "debits = {debits}");
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let now = Utc::now();
        let a = generate_transaction(&mut StdRng::seed_from_u64(9), "7".into(), now);
        let b = generate_transaction(&mut StdRng::seed_from_u64(9), "7".into(), now);
        assert_eq!(a, b);
        assert_eq!(a.id, "7");
        assert_eq!(a.timestamp, now);
    }
}
