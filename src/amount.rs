use std::fmt;

/// Currency symbol prefixed to every formatted naira value.
pub const NAIRA: char = '₦';

/// Fixed-point naira value with 2 decimal places, stored in kobo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 100;

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_kobo(value: i64) -> Self {
        Amount(value)
    }

    pub fn from_naira(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    pub fn kobo(&self) -> i64 {
        self.0
    }

    /// Whole naira part, truncated toward zero.
    pub fn naira(&self) -> i64 {
        self.0 / Self::SCALE
    }
}

/// Format as `₦1,234.50`: thousands separators and exactly two decimals.
///
/// Negative amounts are not special-cased; callers add `+`/`-` for deltas.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / Self::SCALE as u64;
        let frac = abs % Self::SCALE as u64;
        write!(f, "{NAIRA}{sign}{}.{frac:02}", group_thousands(whole))
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Format a float amount the way wallet balances are shown.
pub fn format_naira(value: f64) -> String {
    Amount::from_float(value).to_string()
}

/// Format a whole naira value without decimals, e.g. `₦2,750`.
pub fn format_naira_whole(value: u64) -> String {
    format!("{NAIRA}{}", group_thousands(value))
}

/// Insert `,` between every group of three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_kobo_preserves_value() {
        let amount = Amount::from_kobo(123456);
        assert_eq!(amount, Amount(123456));
    }

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::from_float(100.0), Amount::from_kobo(10_000));
        assert_eq!(Amount::from_float(1.5), Amount::from_kobo(150));
        assert_eq!(Amount::from_float(0.01), Amount::from_kobo(1));
    }

    #[test]
    fn from_float_rounds_correctly() {
        assert_eq!(Amount::from_float(1.236), Amount::from_kobo(124));
        assert_eq!(Amount::from_float(1.234), Amount::from_kobo(123));
    }

    #[test]
    fn from_naira_scales() {
        assert_eq!(Amount::from_naira(14_003), Amount::from_kobo(1_400_300));
        assert_eq!(Amount::from_kobo(1_400_398).naira(), 14_003);
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_naira(0.0), "₦0.00");
        assert_eq!(Amount::default().to_string(), "₦0.00");
    }

    #[test]
    fn format_with_separator_and_two_decimals() {
        assert_eq!(format_naira(1234.5), "₦1,234.50");
        assert_eq!(format_naira(14003.98), "₦14,003.98");
        assert_eq!(format_naira(1_000_000.0), "₦1,000,000.00");
        assert_eq!(format_naira(999.999), "₦1,000.00");
    }

    #[test]
    fn format_negative_is_not_special_cased() {
        assert_eq!(Amount::from_kobo(-150).to_string(), "₦-1.50");
    }

    #[test]
    fn format_whole() {
        assert_eq!(format_naira_whole(2750), "₦2,750");
        assert_eq!(format_naira_whole(500), "₦500");
        assert_eq!(format_naira_whole(10_000), "₦10,000");
    }

    #[test]
    fn grouping_boundaries() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
    }

    #[test]
    fn add_and_add_assign() {
        let mut a = Amount::from_kobo(100);
        assert_eq!(a + Amount::from_kobo(50), Amount::from_kobo(150));
        a += Amount::from_kobo(25);
        assert_eq!(a, Amount::from_kobo(125));
    }

    #[test]
    fn ordering() {
        assert!(Amount::from_kobo(100) < Amount::from_kobo(200));
        assert!(Amount::from_kobo(-1) < Amount::default());
    }
}
