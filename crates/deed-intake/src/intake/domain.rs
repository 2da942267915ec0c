use crate::money::{format_cents, TaxRate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured deed record handed over by the upstream extractor.
///
/// Field presence and basic typing are the extractor boundary's
/// responsibility; once a value of this type exists it is treated as
/// immutable input to the consistency checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDeed {
    pub document_type: String,
    pub document_id: String,
    pub county_raw: String,
    pub state: String,
    pub date_signed: NaiveDate,
    pub date_recorded: NaiveDate,
    pub grantor: String,
    pub grantee: Vec<String>,
    #[serde(rename = "amount_numeric", with = "crate::money::serde_cents")]
    pub amount_cents: i64,
    pub amount_text: String,
    pub apn: String,
    pub status: String,
}

/// A deed that passed every consistency check, enriched with the
/// canonical county record it resolved to.
///
/// The tax rate is copied verbatim from the reference record, never
/// derived or rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDeed {
    #[serde(flatten)]
    pub deed: ParsedDeed,
    pub county_canonical: String,
    pub tax_rate: TaxRate,
}

/// Expected, typed reasons for turning a deed away.
///
/// These are domain outcomes, not faults: infrastructure problems
/// (unreadable reference data, undecodable extractor output) live in
/// separate error types and never surface through this enum.
#[derive(Debug, Clone, PartialEq)]
pub enum DeedRejection {
    /// The recording date precedes the signing date.
    InvalidDateOrder {
        signed: NaiveDate,
        recorded: NaiveDate,
    },
    /// The spelled-out amount disagrees with (or cannot be read against)
    /// the numeric amount.
    AmountMismatch {
        numeric_cents: i64,
        parsed_dollars: Option<u64>,
        text: String,
    },
    /// No reference county matched with enough confidence.
    UnknownCounty {
        raw: String,
        best_candidate: Option<String>,
        best_score: u8,
    },
}

impl fmt::Display for DeedRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeedRejection::InvalidDateOrder { signed, recorded } => write!(
                f,
                "invalid date order: recorded date ({recorded}) is earlier than signed date ({signed})"
            ),
            DeedRejection::AmountMismatch {
                numeric_cents,
                parsed_dollars: Some(parsed),
                text,
            } => write!(
                f,
                "amount mismatch: numeric amount ({}) does not match textual amount '{text}' ({parsed})",
                format_cents(*numeric_cents)
            ),
            DeedRejection::AmountMismatch {
                numeric_cents,
                parsed_dollars: None,
                text,
            } => write!(
                f,
                "amount mismatch: textual amount '{text}' could not be read against numeric amount ({})",
                format_cents(*numeric_cents)
            ),
            DeedRejection::UnknownCounty {
                raw,
                best_candidate: Some(candidate),
                best_score,
            } => write!(
                f,
                "unable to confidently match county '{raw}' (best '{candidate}', score {best_score})"
            ),
            DeedRejection::UnknownCounty {
                raw,
                best_candidate: None,
                ..
            } => write!(f, "unable to match county '{raw}': no reference counties loaded"),
        }
    }
}

impl std::error::Error for DeedRejection {}
