//! Ordered consistency checks over a parsed deed.
//!
//! Checks run in a fixed order and stop at the first violation: date
//! order first, amount consistency second. There is no partial-success
//! state, and converter parse failures are always reported in domain
//! terms as an amount mismatch.

use super::amount;
use super::domain::{DeedRejection, ParsedDeed};

/// The document must be signed on or before the day it was recorded.
pub fn validate_date_order(deed: &ParsedDeed) -> Result<(), DeedRejection> {
    if deed.date_recorded < deed.date_signed {
        return Err(DeedRejection::InvalidDateOrder {
            signed: deed.date_signed,
            recorded: deed.date_recorded,
        });
    }
    Ok(())
}

/// The spelled-out amount must equal the numeric amount exactly.
pub fn validate_amount_consistency(deed: &ParsedDeed) -> Result<(), DeedRejection> {
    let parsed_dollars = match amount::words_to_dollars(&deed.amount_text) {
        Ok(value) => value,
        Err(_) => {
            return Err(DeedRejection::AmountMismatch {
                numeric_cents: deed.amount_cents,
                parsed_dollars: None,
                text: deed.amount_text.clone(),
            })
        }
    };

    let parsed_cents = i64::try_from(parsed_dollars)
        .ok()
        .and_then(|dollars| dollars.checked_mul(100));
    if parsed_cents != Some(deed.amount_cents) {
        return Err(DeedRejection::AmountMismatch {
            numeric_cents: deed.amount_cents,
            parsed_dollars: Some(parsed_dollars),
            text: deed.amount_text.clone(),
        });
    }

    Ok(())
}

pub fn run_validations(deed: &ParsedDeed) -> Result<(), DeedRejection> {
    validate_date_order(deed)?;
    validate_amount_consistency(deed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn deed() -> ParsedDeed {
        ParsedDeed {
            document_type: "DEED-TRUST".to_string(),
            document_id: "DEED-TRUST-0042".to_string(),
            county_raw: "S. Clara".to_string(),
            state: "CA".to_string(),
            date_signed: date(2024, 1, 10),
            date_recorded: date(2024, 1, 15),
            grantor: "T.E.S.L.A. Holdings LLC".to_string(),
            grantee: vec!["John Connor".to_string(), "Sarah Connor".to_string()],
            amount_cents: 120_000_000,
            amount_text: "One Million Two Hundred Thousand Dollars".to_string(),
            apn: "992-001-XA".to_string(),
            status: "PRELIMINARY".to_string(),
        }
    }

    #[test]
    fn consistent_deed_passes_both_checks() {
        assert_eq!(run_validations(&deed()), Ok(()));
    }

    #[test]
    fn equal_dates_pass() {
        let mut deed = deed();
        deed.date_recorded = deed.date_signed;
        assert_eq!(validate_date_order(&deed), Ok(()));
    }

    #[test]
    fn recording_before_signing_is_rejected() {
        let mut deed = deed();
        deed.date_signed = date(2024, 1, 15);
        deed.date_recorded = date(2024, 1, 10);
        assert_eq!(
            run_validations(&deed),
            Err(DeedRejection::InvalidDateOrder {
                signed: date(2024, 1, 15),
                recorded: date(2024, 1, 10),
            })
        );
    }

    #[test]
    fn amount_disagreement_is_rejected_with_both_values() {
        let mut deed = deed();
        deed.amount_cents = 125_000_000;
        assert_eq!(
            run_validations(&deed),
            Err(DeedRejection::AmountMismatch {
                numeric_cents: 125_000_000,
                parsed_dollars: Some(1_200_000),
                text: deed.amount_text.clone(),
            })
        );
    }

    #[test]
    fn unreadable_amount_text_reports_a_mismatch_not_a_parse_error() {
        let mut deed = deed();
        deed.amount_text = "One Point Two Million USD".to_string();
        assert_eq!(
            validate_amount_consistency(&deed),
            Err(DeedRejection::AmountMismatch {
                numeric_cents: 120_000_000,
                parsed_dollars: None,
                text: "One Point Two Million USD".to_string(),
            })
        );
    }

    #[test]
    fn date_check_runs_before_amount_check() {
        let mut deed = deed();
        deed.date_signed = date(2024, 1, 15);
        deed.date_recorded = date(2024, 1, 10);
        deed.amount_cents = 1; // also inconsistent
        assert!(matches!(
            run_validations(&deed),
            Err(DeedRejection::InvalidDateOrder { .. })
        ));
    }
}
