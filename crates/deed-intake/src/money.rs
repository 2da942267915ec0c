use serde::{Serialize, Serializer};
use std::fmt;

/// Parse a decimal money string into whole cents.
///
/// Accepts an optional leading `$` and thousands separators. Fails on
/// anything that is not an exact amount (more than two significant
/// fractional digits, stray characters, overflow).
pub fn parse_cents(value: &str) -> Option<i64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let (whole, frac) = match cleaned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut digits = frac.chars();
    let tenths = digits.next().map_or(0, |c| c as i64 - '0' as i64);
    let hundredths = digits.next().map_or(0, |c| c as i64 - '0' as i64);
    if digits.any(|c| c != '0') {
        return None;
    }

    whole.checked_mul(100)?.checked_add(tenths * 10 + hundredths)
}

/// Render cents back as a plain decimal string, e.g. `125000000` -> `"1250000.00"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Tax rate stored as an exact count of millionths (`0.0055` -> `5500`).
///
/// Copied verbatim from the reference record into enriched deeds, so the
/// representation must survive a parse/display round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaxRate(u32);

impl TaxRate {
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut millionths = whole.checked_mul(1_000_000)?;
        let mut digits = frac.chars();
        let mut unit: u64 = 100_000;
        for _ in 0..6 {
            match digits.next() {
                Some(c) => {
                    millionths = millionths.checked_add((c as u64 - '0' as u64) * unit)?;
                    unit /= 10;
                }
                None => break,
            }
        }
        if digits.any(|c| c != '0') {
            return None;
        }

        u32::try_from(millionths).ok().map(TaxRate)
    }

    pub const fn millionths(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1_000_000;
        let frac = self.0 % 1_000_000;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:06}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl Serialize for TaxRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Serde adapter for monetary fields carried as cents in memory but
/// exchanged as decimal numbers (or strings) on the wire.
pub mod serde_cents {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_cents(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        struct CentsVisitor;

        impl<'de> Visitor<'de> for CentsVisitor {
            type Value = i64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a decimal monetary amount")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|dollars| dollars.checked_mul(100))
                    .ok_or_else(|| E::custom(format!("amount {v} out of range")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
                v.checked_mul(100)
                    .ok_or_else(|| E::custom(format!("amount {v} out of range")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
                super::parse_cents(&format!("{v}"))
                    .ok_or_else(|| E::custom(format!("amount {v} is not an exact decimal")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
                super::parse_cents(v)
                    .ok_or_else(|| E::custom(format!("cannot parse amount '{v}'")))
            }
        }

        deserializer.deserialize_any(CentsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_cents("1250000"), Some(125_000_000));
        assert_eq!(parse_cents("1250000.00"), Some(125_000_000));
        assert_eq!(parse_cents("$1,250,000.00"), Some(125_000_000));
        assert_eq!(parse_cents("0.5"), Some(50));
        assert_eq!(parse_cents("12.34"), Some(1234));
        assert_eq!(parse_cents("12.3400"), Some(1234));
    }

    #[test]
    fn rejects_inexact_or_malformed_amounts() {
        assert_eq!(parse_cents(""), None);
        assert_eq!(parse_cents("."), None);
        assert_eq!(parse_cents("12.345"), None);
        assert_eq!(parse_cents("12.3.4"), None);
        assert_eq!(parse_cents("twelve"), None);
        assert_eq!(parse_cents("-5"), None);
    }

    #[test]
    fn formats_cents_as_decimal() {
        assert_eq!(format_cents(125_000_000), "1250000.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(5), "0.05");
    }

    #[test]
    fn tax_rate_round_trips() {
        let rate = TaxRate::parse("0.0055").expect("rate parses");
        assert_eq!(rate.millionths(), 5_500);
        assert_eq!(rate.to_string(), "0.0055");

        assert_eq!(TaxRate::parse("0").map(|r| r.millionths()), Some(0));
        assert_eq!(TaxRate::parse("1.5").map(|r| r.millionths()), Some(1_500_000));
    }

    #[test]
    fn tax_rate_rejects_excess_precision() {
        assert_eq!(TaxRate::parse("0.0000005"), None);
        assert_eq!(TaxRate::parse("rate"), None);
        assert_eq!(TaxRate::parse(""), None);
    }
}
