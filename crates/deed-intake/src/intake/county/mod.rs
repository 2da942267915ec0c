//! County resolution against the canonical reference dataset.

mod normalizer;
mod reference;
mod similarity;

pub use normalizer::normalize_county;
pub use reference::{counties_from_path, counties_from_reader, ReferenceError};

use super::domain::{DeedRejection, EnrichedDeed, ParsedDeed};
use crate::money::TaxRate;
use similarity::token_set_ratio;

/// Minimum token-set similarity for a confident county match.
pub const MATCH_THRESHOLD: u8 = 70;

/// Canonical reference entry for one county.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyRecord {
    pub name: String,
    pub tax_rate: TaxRate,
}

/// A resolved county together with its similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountyMatch<'a> {
    pub record: &'a CountyRecord,
    pub score: u8,
}

/// Resolve a raw, possibly OCR-damaged county string to the best
/// reference record at or above [`MATCH_THRESHOLD`].
///
/// When several records tie for the best score, the earliest one in the
/// reference sequence wins, keeping resolution deterministic.
pub fn resolve_county<'a>(
    raw: &str,
    reference: &'a [CountyRecord],
) -> Result<CountyMatch<'a>, DeedRejection> {
    let needle = normalize_county(raw);

    let mut best: Option<(usize, u8)> = None;
    for (index, record) in reference.iter().enumerate() {
        let score = token_set_ratio(&needle, &normalize_county(&record.name));
        // strictly greater keeps the earliest record on tied scores
        if best.map_or(true, |(_, held)| score > held) {
            best = Some((index, score));
        }
    }

    match best {
        Some((index, score)) if score >= MATCH_THRESHOLD => {
            let matched = CountyMatch {
                record: &reference[index],
                score,
            };
            tracing::debug!(raw, county = %matched.record.name, score, "county resolved");
            Ok(matched)
        }
        Some((index, score)) => Err(DeedRejection::UnknownCounty {
            raw: raw.to_string(),
            best_candidate: Some(reference[index].name.clone()),
            best_score: score,
        }),
        None => Err(DeedRejection::UnknownCounty {
            raw: raw.to_string(),
            best_candidate: None,
            best_score: 0,
        }),
    }
}

/// Combine a validated deed with its resolved reference record.
///
/// Only constructed when resolution succeeds; the canonical name and
/// tax rate are copied straight from the matched record.
pub fn enrich_deed(
    deed: ParsedDeed,
    reference: &[CountyRecord],
) -> Result<EnrichedDeed, DeedRejection> {
    let matched = resolve_county(&deed.county_raw, reference)?;
    Ok(EnrichedDeed {
        county_canonical: matched.record.name.clone(),
        tax_rate: matched.record.tax_rate,
        deed,
    })
}
