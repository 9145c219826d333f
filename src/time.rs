//! Relative and calendar time formatting.
//!
//! Every function takes `now` explicitly so output is a pure function of its inputs.

use chrono::{DateTime, Duration, Months, Utc};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Short "time ago" string: minutes under an hour, hours under a day, else days.
///
/// Each unit is floored. Timestamps in the future read as `0 minutes ago`.
pub fn time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - ts).num_milliseconds().max(0);
    if elapsed < HOUR_MS {
        format!("{} minutes ago", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{} hours ago", elapsed / HOUR_MS)
    } else {
        format!("{} days ago", elapsed / DAY_MS)
    }
}

/// Calendar date such as `5 Nov 2025`.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%-d %b %Y").to_string()
}

/// Countdown clock `M:SS`; minutes are not wrapped into hours.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Window selectable on the history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    Week,
    Month,
    Year,
}

impl DateRange {
    /// First instant covered by the range when it ends at `now`.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let start = match self {
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => now.checked_sub_months(Months::new(1)),
            DateRange::Year => now.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Header text for a range, e.g. `12 Oct - 19 Oct 2026`.
pub fn date_range_text(range: DateRange, now: DateTime<Utc>) -> String {
    let start = range.start(now);
    format!("{} - {}", start.format("%-d %b"), format_date(now))
}
