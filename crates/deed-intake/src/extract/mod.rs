//! Boundary to the upstream deed extractor.
//!
//! Extraction itself (OCR plus a language model) is an external
//! collaborator; this module owns the seam: a [`DeedExtractor`] trait,
//! a deterministic offline stub, and the single structural shape check
//! a record must pass before it enters the intake pipeline.

use crate::config::ExtractorBackend;
use crate::intake::domain::ParsedDeed;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extractor returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("extractor output failed the shape check: {0}")]
    Schema(#[from] SchemaViolation),
}

/// Structural problems in extractor output, caught once at the
/// boundary so the intake core can assume a well-formed record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("state code '{0}' is not a two-letter code")]
    StateCode(String),
    #[error("numeric amount ({0} cents) is not positive")]
    NonPositiveAmount(i64),
    #[error("at least one grantee is required")]
    NoGrantees,
    #[error("required field '{0}' is blank")]
    BlankField(&'static str),
}

/// Anything that can turn raw document text into a structured deed.
pub trait DeedExtractor {
    fn extract(&self, raw_text: &str) -> Result<ParsedDeed, ExtractError>;
}

/// Raw text of the bundled sample deed, as a scanner would emit it.
/// Note the deliberately inconsistent dates and amount.
pub const SAMPLE_DEED_TEXT: &str = "*** RECORDING REQ ***\n\
Doc: DEED-TRUST-0042\n\
County: S. Clara | State: CA\n\
Date Signed: 2024-01-15\n\
Date Recorded: 2024-01-10\n\
Grantor: T.E.S.L.A. Holdings LLC\n\
Grantee: John & Sarah Connor\n\
Amount: $1,250,000.00 (One Million Two Hundred Thousand Dollars)\n\
APN: 992-001-XA\n\
Status: PRELIMINARY\n\
*** END ***";

const STUB_OUTPUT: &str = r#"{
    "document_type": "DEED-TRUST",
    "document_id": "DEED-TRUST-0042",
    "county_raw": "S. Clara",
    "state": "CA",
    "date_signed": "2024-01-15",
    "date_recorded": "2024-01-10",
    "grantor": "T.E.S.L.A. Holdings LLC",
    "grantee": ["John Connor", "Sarah Connor"],
    "amount_numeric": 1250000,
    "amount_text": "One Million Two Hundred Thousand Dollars",
    "apn": "992-001-XA",
    "status": "PRELIMINARY"
}"#;

/// Offline extractor returning the canned structured output for the
/// bundled sample deed. Keeps development and demos network-free.
pub struct StubExtractor;

impl DeedExtractor for StubExtractor {
    fn extract(&self, _raw_text: &str) -> Result<ParsedDeed, ExtractError> {
        parse_extractor_output(STUB_OUTPUT)
    }
}

/// Construct the extractor selected by configuration. Remote backends
/// would plug in here; only the offline stub ships with this crate.
pub fn build_extractor(backend: ExtractorBackend) -> Box<dyn DeedExtractor> {
    match backend {
        ExtractorBackend::Stub => Box::new(StubExtractor),
    }
}

/// Decode extractor output (JSON, possibly wrapped in Markdown code
/// fences) and apply the structural shape check.
pub fn parse_extractor_output(payload: &str) -> Result<ParsedDeed, ExtractError> {
    let deed: ParsedDeed = serde_json::from_str(strip_code_fences(payload))?;
    check_shape(&deed)?;
    Ok(deed)
}

/// Validate the structural contract the intake core relies on.
pub fn check_shape(deed: &ParsedDeed) -> Result<(), SchemaViolation> {
    if deed.state.len() != 2 || !deed.state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SchemaViolation::StateCode(deed.state.clone()));
    }
    if deed.amount_cents <= 0 {
        return Err(SchemaViolation::NonPositiveAmount(deed.amount_cents));
    }
    if deed.grantee.is_empty() {
        return Err(SchemaViolation::NoGrantees);
    }
    for (field, value) in [
        ("document_id", &deed.document_id),
        ("county_raw", &deed.county_raw),
        ("amount_text", &deed.amount_text),
    ] {
        if value.trim().is_empty() {
            return Err(SchemaViolation::BlankField(field));
        }
    }
    Ok(())
}

fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
